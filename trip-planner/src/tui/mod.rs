//! Terminal UI for the trip planner.
//!
//! Layout:
//! - Centered window frame titled "Singapore Trip Planner"
//! - Left banner panel with logo and progress
//! - Main content panel: welcome, one wizard step, or the results tabs
//! - Bottom button row: [ Back ] [ Next ] [ Quit ] (labels change per screen)
//! - Quit confirmation modal
//!
//! Note: Logging is file-only in TUI mode (stdout logging is disabled) to avoid corrupting the terminal UI.

use crate::catalog::Catalog;
use crate::models::preferences::{
    Budget, Duration as TripDuration, TourStyle, TravelGroup, TravelPreferences, TravelType,
    INTEREST_OPTIONS,
};
use crate::planner::suggestions_by_popularity;
use crate::session::{
    ResultsTab, ResultsView, Screen, Session, ESSENTIAL_TIPS, PRO_TIPS, PRO_TIPS_TITLE,
};
use crate::wizard::{NextOutcome, PreferenceWizard, WizardStep, STEP_COUNT};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::info;
use ratatui::backend::{CrosstermBackend, TestBackend};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

const ASCII_LOGO: &str = r#"   _____ _____
  / ____/ ____|
 | (___| |  __
  \___ \ |_ |
  ____) | |__| |
 |_____/ \_____|"#;

const WINDOW_WIDTH: u16 = 100;
const WINDOW_HEIGHT: u16 = 30;
const BANNER_WIDTH: u16 = 34;

// Content panel interior at full window size: outer and panel borders, button row.
const CONTENT_WIDTH: u16 = WINDOW_WIDTH - 4 - BANNER_WIDTH;
const CONTENT_HEIGHT: u16 = WINDOW_HEIGHT - 5;
// Rows kept below the focused line when scrolling down.
const FOLLOW_MARGIN: u16 = 3;

/// Smoke targets accepted by `--tui-smoke=<target>`.
pub const SMOKE_TARGETS: [&str; 8] = [
    "welcome",
    "travel-type",
    "duration",
    "group",
    "interests",
    "requirements",
    "destinations",
    "itinerary",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonFocus {
    Back,
    Next,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modal {
    ConfirmQuit { yes_focused: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusTarget {
    Field(usize),
    Button(ButtonFocus),
}

/// Single-line editor; `cursor` counts chars, not bytes.
#[derive(Debug, Clone, Default)]
struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        let len = self.value.chars().count();
        match code {
            KeyCode::Char(c) => {
                let idx = self.byte_index(self.cursor);
                self.value.insert(idx, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let idx = self.byte_index(self.cursor);
                    self.value.remove(idx);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < len {
                    let idx = self.byte_index(self.cursor);
                    self.value.remove(idx);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(len);
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = len;
                true
            }
            _ => false,
        }
    }
}

/// Something on the current screen that Space/Enter acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Field {
    TravelType(TravelType),
    Duration(TripDuration),
    Budget(Budget),
    Group(TravelGroup),
    Style(TourStyle),
    Interest(&'static str),
    Requirements,
    Destination(String),
    Attraction(String),
    Day(u8),
}

struct TuiState {
    session: Session,
    focus: FocusTarget,
    modal: Option<Modal>,
    requirements: TextInput,
    scroll: u16,
    quit: bool,
}

impl TuiState {
    fn new(catalog: Catalog) -> Self {
        Self {
            session: Session::new(catalog),
            focus: FocusTarget::Button(ButtonFocus::Next),
            modal: None,
            requirements: TextInput::default(),
            scroll: 0,
            quit: false,
        }
    }
}

fn screen_fields(session: &Session) -> Vec<Field> {
    match session.screen() {
        Screen::Welcome => Vec::new(),
        Screen::Wizard(w) => wizard_fields(w.step()),
        Screen::Results(r) => results_fields(r),
    }
}

fn wizard_fields(step: WizardStep) -> Vec<Field> {
    match step {
        WizardStep::TravelType => TravelType::ALL.iter().copied().map(Field::TravelType).collect(),
        WizardStep::DurationBudget => TripDuration::OPTIONS
            .iter()
            .cloned()
            .map(Field::Duration)
            .chain(Budget::ALL.iter().copied().map(Field::Budget))
            .collect(),
        WizardStep::GroupStyle => TravelGroup::ALL
            .iter()
            .copied()
            .map(Field::Group)
            .chain(TourStyle::ALL.iter().copied().map(Field::Style))
            .collect(),
        WizardStep::Interests => INTEREST_OPTIONS.iter().copied().map(Field::Interest).collect(),
        WizardStep::Requirements => vec![Field::Requirements],
    }
}

fn results_fields(view: &ResultsView) -> Vec<Field> {
    match view.tab {
        ResultsTab::Destinations => {
            let mut out = Vec::new();
            for d in &view.destinations {
                out.push(Field::Destination(d.id.clone()));
                if view.destination_view.is_expanded(&d.id) {
                    out.extend(d.attractions.iter().map(|a| Field::Attraction(a.id.clone())));
                }
            }
            out
        }
        ResultsTab::Itinerary => view.itinerary.iter().map(|d| Field::Day(d.day)).collect(),
    }
}

fn focused_field(state: &TuiState) -> Option<Field> {
    match state.focus {
        FocusTarget::Field(i) => screen_fields(&state.session).get(i).cloned(),
        FocusTarget::Button(_) => None,
    }
}

fn set_focused_button(state: &mut TuiState, b: ButtonFocus) {
    state.focus = FocusTarget::Button(b);
}

/// First field if the screen has any, otherwise the primary button.
fn focus_first(state: &mut TuiState) {
    state.scroll = 0;
    state.focus = if screen_fields(&state.session).is_empty() {
        FocusTarget::Button(ButtonFocus::Next)
    } else {
        FocusTarget::Field(0)
    };
}

fn back_label(screen: &Screen) -> &'static str {
    match screen {
        Screen::Results(_) => "Start over",
        _ => "Back",
    }
}

fn next_label(screen: &Screen) -> &'static str {
    match screen {
        Screen::Welcome => "Start your journey",
        Screen::Wizard(w) => w.step().advance_label(),
        Screen::Results(r) => r.tab.other().label(),
    }
}

fn can_go_back(screen: &Screen) -> bool {
    match screen {
        Screen::Welcome => false,
        Screen::Wizard(w) => w.step().can_go_back(),
        Screen::Results(_) => true,
    }
}

pub fn run(catalog: Catalog) -> Result<()> {
    info!("[PHASE: tui] [STEP: start] Starting TUI planner");

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, catalog);
    restore_terminal(&mut terminal)?;

    info!("[PHASE: tui] [STEP: exit] Terminal restored");
    result
}

fn new_smoke_state(catalog: Catalog, target: &str) -> Result<TuiState> {
    // Smoke-only: seeded state for deterministic page rendering in CI/tooling.
    let mut state = TuiState::new(catalog);

    let seeded_preferences = TravelPreferences {
        travel_type: vec![TravelType::Cultural, TravelType::Culinary],
        duration: TripDuration::FiveToSeven,
        interests: vec!["Street Food".to_string(), "Temples".to_string()],
        ..TravelPreferences::default()
    };

    let step = match target {
        "welcome" => None,
        "travel-type" => Some(WizardStep::TravelType),
        "duration" => Some(WizardStep::DurationBudget),
        "group" => Some(WizardStep::GroupStyle),
        "interests" => Some(WizardStep::Interests),
        "requirements" => Some(WizardStep::Requirements),
        "destinations" | "itinerary" => {
            state.session.submit(seeded_preferences);
            if let Some(view) = state.session.results_mut() {
                if target == "itinerary" {
                    view.switch_tab();
                } else if let Some(first) = view.destinations.first().map(|d| d.id.clone()) {
                    view.destination_view.toggle_destination(&first);
                }
            }
            focus_first(&mut state);
            return Ok(state);
        }
        other => anyhow::bail!(
            "Unknown smoke target '{}' (expected one of: {})",
            other,
            SMOKE_TARGETS.join(", ")
        ),
    };

    if let Some(step) = step {
        state.session.start();
        if let Some(w) = state.session.wizard_mut() {
            if step == WizardStep::TravelType {
                // Show the refused-Next suggestion panel.
                w.next();
            } else {
                for t in &seeded_preferences.travel_type {
                    w.toggle_travel_type(*t);
                }
                for i in &seeded_preferences.interests {
                    w.toggle_interest(i);
                }
                while w.step() != step {
                    w.next();
                }
            }
        }
        focus_first(&mut state);
    }
    Ok(state)
}

fn render_frame(state: &TuiState, width: u16, height: u16) -> Result<Buffer> {
    // Use an in-memory backend so this can be executed in CI/tooling without
    // manipulating the real terminal (no raw mode / alternate screen).
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;
    terminal.draw(|f| draw(f.size(), f, state))?;
    Ok(terminal.backend().buffer().clone())
}

pub fn smoke(catalog: Catalog, target: &str) -> Result<()> {
    info!(
        "[PHASE: tui] [STEP: smoke] Rendering single-frame TUI smoke target={}",
        target
    );

    let t = target.trim().to_ascii_lowercase();
    let state = new_smoke_state(catalog, t.as_str())?;
    render_frame(&state, WINDOW_WIDTH, WINDOW_HEIGHT)?;

    info!("[PHASE: tui] [STEP: smoke] Rendered target={}", t);
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, catalog: Catalog) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();
    let mut state = TuiState::new(catalog);

    while !state.quit {
        terminal.draw(|f| draw(f.size(), f, &state))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                handle_key(&mut state, key.code);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn activate_field(state: &mut TuiState, field: Field) {
    if field == Field::Requirements {
        set_focused_button(state, ButtonFocus::Next);
        return;
    }

    if let Some(w) = state.session.wizard_mut() {
        match field {
            Field::TravelType(t) => w.toggle_travel_type(t),
            Field::Duration(d) => w.set_duration(d),
            Field::Budget(b) => w.set_budget(b),
            Field::Group(g) => w.set_travel_group(g),
            Field::Style(s) => w.set_tour_style(s),
            Field::Interest(i) => w.toggle_interest(i),
            _ => {}
        }
        return;
    }

    if let Some(view) = state.session.results_mut() {
        match field {
            Field::Destination(id) => view.destination_view.toggle_destination(&id),
            Field::Attraction(id) => view.destination_view.toggle_attraction(&id),
            Field::Day(d) => view.itinerary_view.toggle_day(d),
            _ => {}
        }
    }
}

fn press_back(state: &mut TuiState) {
    match state.session.screen() {
        Screen::Wizard(_) => {
            if let Some(w) = state.session.wizard_mut() {
                if w.back() {
                    focus_first(state);
                }
            }
        }
        Screen::Results(_) => {
            state.session.reset();
            state.requirements = TextInput::default();
            state.scroll = 0;
            set_focused_button(state, ButtonFocus::Next);
        }
        Screen::Welcome => {}
    }
}

fn press_next(state: &mut TuiState) {
    match state.session.screen() {
        Screen::Welcome => {
            state.session.start();
            state.requirements = TextInput::default();
            focus_first(state);
        }
        Screen::Wizard(_) => match state.session.wizard_next() {
            Some(NextOutcome::Advanced(WizardStep::Requirements)) => {
                let current = state
                    .session
                    .wizard()
                    .map(|w| w.form().special_requirements.clone())
                    .unwrap_or_default();
                state.requirements.set(current);
                focus_first(state);
            }
            Some(NextOutcome::Advanced(_)) | Some(NextOutcome::Submitted(_)) => focus_first(state),
            Some(NextOutcome::Blocked) | None => {}
        },
        Screen::Results(_) => {
            if let Some(view) = state.session.results_mut() {
                view.switch_tab();
            }
            focus_first(state);
        }
    }
}

fn press_button(state: &mut TuiState, button: ButtonFocus) {
    match button {
        ButtonFocus::Back => press_back(state),
        ButtonFocus::Next => press_next(state),
        ButtonFocus::Cancel => state.modal = Some(Modal::ConfirmQuit { yes_focused: false }),
    }
}

fn handle_key(state: &mut TuiState, code: KeyCode) {
    // Modal handling
    if let Some(Modal::ConfirmQuit { yes_focused }) = state.modal {
        match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                state.modal = Some(Modal::ConfirmQuit {
                    yes_focused: !yes_focused,
                });
            }
            KeyCode::Enter => {
                state.modal = None;
                if yes_focused {
                    info!("[PHASE: tui] [STEP: quit] Quit confirmed");
                    state.quit = true;
                }
            }
            KeyCode::Esc => state.modal = None,
            _ => {}
        }
        return;
    }

    // Global keys
    if matches!(code, KeyCode::Esc) {
        state.modal = Some(Modal::ConfirmQuit { yes_focused: false });
        return;
    }

    // Text input handling (when the requirements field is focused)
    if focused_field(state) == Some(Field::Requirements) && state.requirements.handle_key(code) {
        let text = state.requirements.value.clone();
        if let Some(w) = state.session.wizard_mut() {
            w.set_special_requirements(text);
        }
        return;
    }

    let fields = screen_fields(&state.session).len();

    match code {
        KeyCode::Tab => {
            state.focus = match state.focus {
                FocusTarget::Button(ButtonFocus::Back) => FocusTarget::Button(ButtonFocus::Next),
                FocusTarget::Button(ButtonFocus::Next) => FocusTarget::Button(ButtonFocus::Cancel),
                FocusTarget::Button(ButtonFocus::Cancel) if fields > 0 => FocusTarget::Field(0),
                FocusTarget::Button(ButtonFocus::Cancel) => FocusTarget::Button(ButtonFocus::Back),
                FocusTarget::Field(_) => FocusTarget::Button(ButtonFocus::Back),
            };
        }
        KeyCode::Up => {
            if let FocusTarget::Field(i) = state.focus {
                state.focus = FocusTarget::Field(i.saturating_sub(1));
            }
        }
        KeyCode::Down => {
            state.focus = match state.focus {
                FocusTarget::Field(i) => FocusTarget::Field((i + 1).min(fields.saturating_sub(1))),
                FocusTarget::Button(_) if fields > 0 => FocusTarget::Field(0),
                other => other,
            };
        }
        KeyCode::Char(' ') | KeyCode::Enter => match state.focus {
            FocusTarget::Field(_) => {
                if let Some(field) = focused_field(state) {
                    activate_field(state, field);
                }
            }
            FocusTarget::Button(b) if code == KeyCode::Enter => {
                let enabled = b != ButtonFocus::Back || can_go_back(state.session.screen());
                if enabled {
                    press_button(state, b);
                }
            }
            FocusTarget::Button(_) => {}
        },
        KeyCode::Char('a') | KeyCode::Char('A') => {
            if let Some(w) = state.session.wizard_mut() {
                if w.show_suggestion() {
                    w.apply_suggestion();
                }
            }
        }
        KeyCode::Char('d') | KeyCode::Char('D') => {
            if let Some(w) = state.session.wizard_mut() {
                w.dismiss_suggestion();
            }
        }
        KeyCode::Char('t') | KeyCode::Char('T') | KeyCode::Left | KeyCode::Right => {
            if let Some(view) = state.session.results_mut() {
                view.switch_tab();
                focus_first(state);
            }
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            if state.session.results().is_some() {
                press_back(state);
            }
        }
        KeyCode::PageDown => {
            state.scroll = state.scroll.saturating_add(5);
            return;
        }
        KeyCode::PageUp => {
            state.scroll = state.scroll.saturating_sub(5);
            return;
        }
        _ => {}
    }

    // Expanded cards can shrink the field list.
    let fields = screen_fields(&state.session).len();
    if let FocusTarget::Field(i) = state.focus {
        if i >= fields {
            state.focus = if fields == 0 {
                FocusTarget::Button(ButtonFocus::Next)
            } else {
                FocusTarget::Field(fields - 1)
            };
        }
    }

    follow_focus(state);
}

/// Scroll the content panel so the focused field stays visible.
fn follow_focus(state: &mut TuiState) {
    let (_, text, focus_line) = content(state);
    let focus_line = match focus_line {
        Some(line) => line,
        None => return,
    };

    let row: usize = text.lines[..focus_line]
        .iter()
        .map(|l| wrapped_rows(l, CONTENT_WIDTH))
        .sum();
    let row = u16::try_from(row).unwrap_or(u16::MAX);
    let last_visible = CONTENT_HEIGHT.saturating_sub(1 + FOLLOW_MARGIN);

    if row < state.scroll {
        state.scroll = row;
    } else if row > state.scroll.saturating_add(last_visible) {
        state.scroll = row - last_visible;
    }
}

/// Rows a line occupies once wrapped to `width` columns.
fn wrapped_rows(line: &Line<'_>, width: u16) -> usize {
    let width = usize::from(width.max(1));
    line.width().max(1).div_ceil(width)
}

/// Panel title, body and the body line holding the focused field.
fn content(state: &TuiState) -> (String, Text<'static>, Option<usize>) {
    match state.session.screen() {
        Screen::Welcome => ("Welcome".to_string(), welcome_text(), None),
        Screen::Wizard(w) => {
            let (text, focus_line) = wizard_text(w, state);
            (
                format!("STEP {} OF {}", w.step().number(), STEP_COUNT),
                text,
                focus_line,
            )
        }
        Screen::Results(r) => {
            let (text, focus_line) = results_text(r, state);
            ("Your Singapore plan".to_string(), text, focus_line)
        }
    }
}

fn draw(area: Rect, f: &mut ratatui::Frame<'_>, state: &TuiState) {
    let window_area = centered_window(area, WINDOW_WIDTH, WINDOW_HEIGHT);

    // Outer frame
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("Singapore Trip Planner");
    f.render_widget(outer_block, window_area);

    // Inner layout: banner + content + buttons row
    let inner = window_area.inner(&ratatui::layout::Margin {
        vertical: 1,
        horizontal: 1,
    });
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(inner);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(BANNER_WIDTH), Constraint::Min(0)].as_ref())
        .split(rows[0]);

    // Left banner
    let banner = Paragraph::new(banner_text(&state.session))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });
    f.render_widget(banner, cols[0]);

    // Right content
    let (title, content_text, _) = content(state);

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    f.render_widget(content, cols[1]);

    // Bottom buttons row (right-aligned)
    draw_buttons(f, rows[1], state);

    if let Some(Modal::ConfirmQuit { yes_focused }) = state.modal {
        draw_quit_modal(f, window_area, yes_focused);
    }
}

fn centered_window(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(2)).max(60).min(area.width);
    let h = height.min(area.height.saturating_sub(2)).max(20).min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

fn banner_text(session: &Session) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = ASCII_LOGO.lines().map(|l| Line::from(l.to_string())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "DISCOVER SINGAPORE",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    match session.screen() {
        Screen::Welcome => {
            lines.push(Line::from("Your personalized journey"));
            lines.push(Line::from("through the Lion City awaits."));
        }
        Screen::Wizard(w) => {
            let current = w.step().number();
            for n in 1..=STEP_COUNT {
                let marker = if n < current {
                    "[x]"
                } else if n == current {
                    "[>]"
                } else {
                    "[ ]"
                };
                let title = WizardStep::from_number(n).map(|s| s.title()).unwrap_or("");
                lines.push(Line::from(format!("{} {}", marker, title)));
            }
        }
        Screen::Results(r) => {
            lines.push(Line::from("Trip summary:"));
            for chip in r.header_summary() {
                lines.push(Line::from(format!("  {}", chip)));
            }
        }
    }
    Text::from(lines)
}

fn welcome_text() -> Text<'static> {
    Text::from(vec![
        Line::from(Span::styled(
            "DISCOVER SINGAPORE",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Your personalized journey through the Lion City awaits."),
        Line::from("Experience the future of travel discovery."),
        Line::from(""),
        Line::from("PERSONALIZED  Tailored recommendations based on your unique preferences"),
        Line::from("CURATED       Handpicked experiences from local experts"),
        Line::from("IMMERSIVE     Dive deep into Singapore's vibrant culture"),
        Line::from(""),
        Line::from("Press Enter to start your journey. Esc quits."),
    ])
}

fn option_line(focused: bool, marker: &str, label: String) -> Line<'static> {
    let prefix = if focused { ">" } else { " " };
    let style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(Span::styled(format!("{} {} {}", prefix, marker, label), style))
}

/// Push an option line, remembering its index when it holds the focus.
fn push_option(
    lines: &mut Vec<Line<'static>>,
    focus_line: &mut Option<usize>,
    focused: bool,
    marker: &str,
    label: String,
) {
    if focused {
        *focus_line = Some(lines.len());
    }
    lines.push(option_line(focused, marker, label));
}

fn check(selected: bool) -> &'static str {
    if selected {
        "[x]"
    } else {
        "[ ]"
    }
}

fn radio(selected: bool) -> &'static str {
    if selected {
        "(x)"
    } else {
        "( )"
    }
}

fn wizard_text(w: &PreferenceWizard, state: &TuiState) -> (Text<'static>, Option<usize>) {
    let form = w.form();
    let step = w.step();
    let focused = match state.focus {
        FocusTarget::Field(i) => Some(i),
        FocusTarget::Button(_) => None,
    };

    let mut focus_line = None;
    let mut lines = vec![
        Line::from(Span::styled(
            step.title().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(step.subtitle().to_string()),
        Line::from(""),
    ];

    for (idx, field) in wizard_fields(step).into_iter().enumerate() {
        let is_focused = focused == Some(idx);
        match field {
            Field::TravelType(t) => push_option(
                &mut lines,
                &mut focus_line,
                is_focused,
                check(form.travel_type.contains(&t)),
                format!("{} {}", t.icon(), t.label()),
            ),
            Field::Duration(d) => push_option(
                &mut lines,
                &mut focus_line,
                is_focused,
                radio(form.duration == d),
                format!("{} days", d.label()),
            ),
            Field::Budget(b) => {
                if b == Budget::ALL[0] {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        "What's your budget style?",
                        Style::default().add_modifier(Modifier::BOLD),
                    )));
                }
                push_option(
                    &mut lines,
                    &mut focus_line,
                    is_focused,
                    radio(form.budget == b),
                    format!("{} {} ({})", b.symbol(), b.label(), b.daily_range()),
                )
            }
            Field::Group(g) => push_option(
                &mut lines,
                &mut focus_line,
                is_focused,
                radio(form.travel_group == g),
                g.label().to_string(),
            ),
            Field::Style(s) => {
                if s == TourStyle::ALL[0] {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        "Tour preference?",
                        Style::default().add_modifier(Modifier::BOLD),
                    )));
                }
                push_option(
                    &mut lines,
                    &mut focus_line,
                    is_focused,
                    radio(form.tour_style == s),
                    format!("{} - {}", s.label(), s.blurb()),
                )
            }
            Field::Interest(i) => push_option(
                &mut lines,
                &mut focus_line,
                is_focused,
                check(form.interests.iter().any(|x| x == i)),
                i.to_string(),
            ),
            Field::Requirements => {
                let cursor = if is_focused { "_" } else { "" };
                push_option(
                    &mut lines,
                    &mut focus_line,
                    is_focused,
                    ">>",
                    format!("{}{}", state.requirements.value, cursor),
                );
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Your journey summary",
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(format!("Travel type: {}", form.travel_type_summary())));
                lines.push(Line::from(format!("Duration: {} days", form.duration)));
                lines.push(Line::from(format!("Budget: {}", form.budget.as_id())));
                lines.push(Line::from(format!("Group: {}", form.travel_group.as_id())));
                lines.push(Line::from(format!("Style: {}", form.tour_style.summary_label())));
                lines.push(Line::from(format!("Interests: {}", form.interests_summary())));
            }
            _ => {}
        }
    }

    if w.show_suggestion() {
        if let Some((headline, body)) = step.suggestion_copy() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                headline,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(body));
            lines.push(Line::from("Press 'a' to apply the suggestion, 'd' to dismiss."));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(
        "Up/Down move, Space selects, Tab reaches the buttons, Enter activates.",
    ));
    (Text::from(lines), focus_line)
}

fn results_text(view: &ResultsView, state: &TuiState) -> (Text<'static>, Option<usize>) {
    let focused = match state.focus {
        FocusTarget::Field(i) => Some(i),
        FocusTarget::Button(_) => None,
    };

    let tabs: Vec<Span<'static>> = [ResultsTab::Destinations, ResultsTab::Itinerary]
        .iter()
        .flat_map(|t| {
            let style = if *t == view.tab {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            [Span::styled(format!(" {} ", t.label()), style), Span::raw(" ")]
        })
        .collect();

    let mut lines = vec![
        Line::from(view.header_summary().join("  |  ")),
        Line::from(""),
        Line::from(tabs),
        Line::from(""),
    ];

    let mut focus_line = None;
    let mut idx = 0usize;
    match view.tab {
        ResultsTab::Destinations => {
            for d in &view.destinations {
                let expanded = view.destination_view.is_expanded(&d.id);
                push_option(
                    &mut lines,
                    &mut focus_line,
                    focused == Some(idx),
                    if expanded { "[-]" } else { "[+]" },
                    format!("{}  {}%  ({})", d.name, d.match_score, d.category),
                );
                idx += 1;
                if !expanded {
                    continue;
                }

                let info = &d.detailed_info;
                lines.push(Line::from(format!("      {}", d.description)));
                lines.push(Line::from(format!("      Location: {}", info.location)));
                lines.push(Line::from(format!("      Hours: {}", info.opening_hours)));
                lines.push(Line::from(format!("      Best time: {}", info.best_time_to_visit)));
                lines.push(Line::from(format!("      Duration: {}", info.average_duration)));
                lines.push(Line::from(format!("      Price: {}", info.price_range)));
                lines.push(Line::from("      Attractions:"));
                for a in &d.attractions {
                    let open = view.destination_view.is_attraction_open(&a.id);
                    let action = if open { "Hide Details" } else { "View Details" };
                    push_option(
                        &mut lines,
                        &mut focus_line,
                        focused == Some(idx),
                        "   ",
                        format!("{} [{}]", a.name, action),
                    );
                    idx += 1;
                    if open {
                        let det = &a.details;
                        lines.push(Line::from(format!("          {}", a.description)));
                        lines.push(Line::from(format!("          Location: {}", det.location)));
                        lines.push(Line::from(format!("          Hours: {}", det.opening_hours)));
                        lines.push(Line::from(format!("          Entry: {}", det.entry_fee)));
                        lines.push(Line::from(format!("          Duration: {}", det.duration)));
                        lines.push(Line::from(format!("          Best time: {}", det.best_time)));
                        lines.push(Line::from(format!(
                            "          Accessibility: {}",
                            det.accessibility
                        )));
                        for h in &det.highlights {
                            lines.push(Line::from(format!("          * {}", h)));
                        }
                    }
                }
                lines.push(Line::from("      Top things to do:"));
                for (rank, s) in suggestions_by_popularity(d).into_iter().enumerate() {
                    lines.push(Line::from(format!(
                        "      {}. {} ({}%) - {}",
                        rank + 1,
                        s.title,
                        s.popularity,
                        s.description
                    )));
                    lines.push(Line::from(Span::styled(
                        format!("         {}", s.tips),
                        Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC),
                    )));
                }
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                PRO_TIPS_TITLE,
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for (topic, tip) in PRO_TIPS {
                lines.push(Line::from(format!("  {}: {}", topic, tip)));
            }
        }
        ResultsTab::Itinerary => {
            lines.push(Line::from(Span::styled(
                view.itinerary_headline(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for day in &view.itinerary {
                let expanded = view.itinerary_view.is_expanded(day.day);
                push_option(
                    &mut lines,
                    &mut focus_line,
                    focused == Some(idx),
                    if expanded { "[-]" } else { "[+]" },
                    format!("Day {}  {}", day.day, day.theme),
                );
                idx += 1;
                if !expanded {
                    continue;
                }
                for (period, a) in day.activities() {
                    lines.push(Line::from(format!(
                        "      {} {}  {} @ {} ({})",
                        period.label(),
                        a.time,
                        a.title,
                        a.location,
                        a.duration
                    )));
                    lines.push(Line::from(format!("        {}", a.description)));
                    lines.push(Line::from(format!("        Tip: {}", a.tips)));
                    if let Some(url) = a.booking_url.as_deref() {
                        lines.push(Line::from(Span::styled(
                            format!("        BOOK TICKETS NOW  {}", url),
                            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                        )));
                    }
                }
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Essential travel tips",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for (topic, tip) in ESSENTIAL_TIPS {
                lines.push(Line::from(format!("  {}: {}", topic, tip)));
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(
        "Space expands, Left/Right switch tabs, PgUp/PgDn scroll, 'r' starts over.",
    ));
    (Text::from(lines), focus_line)
}

fn draw_buttons(f: &mut ratatui::Frame<'_>, area: Rect, state: &TuiState) {
    let screen = state.session.screen();
    let back = button_text(
        back_label(screen),
        state.focus == FocusTarget::Button(ButtonFocus::Back),
        can_go_back(screen),
    );
    let next = button_text(
        next_label(screen),
        state.focus == FocusTarget::Button(ButtonFocus::Next),
        true,
    );
    let cancel = button_text(
        "Quit",
        state.focus == FocusTarget::Button(ButtonFocus::Cancel),
        true,
    );

    let line = Line::from(vec![back, Span::raw(" "), next, Span::raw(" "), cancel]);
    let p = Paragraph::new(Text::from(line)).alignment(Alignment::Right);
    f.render_widget(p, area);
}

fn button_text(label: &str, focused: bool, enabled: bool) -> Span<'static> {
    let mut style = Style::default();
    if !enabled {
        style = style.fg(Color::DarkGray);
    }
    if focused && enabled {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(format!("[ {} ]", label), style)
}

fn draw_quit_modal(f: &mut ratatui::Frame<'_>, window_area: Rect, yes_focused: bool) {
    let modal_w = 56u16
        .min(window_area.width.saturating_sub(4))
        .max(40)
        .min(window_area.width);
    let modal_h = 7u16.min(window_area.height);
    let x = window_area.x + (window_area.width.saturating_sub(modal_w)) / 2;
    let y = window_area.y + (window_area.height.saturating_sub(modal_h)) / 2;
    let area = Rect {
        x,
        y,
        width: modal_w,
        height: modal_h,
    };

    f.render_widget(Clear, area);
    let block = Block::default().borders(Borders::ALL).title("Leave planner?");
    let body = Paragraph::new(Text::from(vec![
        Line::from("Your answers and recommendations will be discarded."),
        Line::from(""),
        Line::from(""),
    ]))
    .block(block)
    .wrap(Wrap { trim: false });
    f.render_widget(body, area);

    // Buttons: [Yes, quit] [No] (primary on right)
    let buttons_area = Rect {
        x: area.x + 1,
        y: area.y + area.height.saturating_sub(2),
        width: area.width.saturating_sub(2),
        height: area.height.min(1),
    };
    let styled = |focused: bool| {
        if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        }
    };
    let line = Line::from(vec![
        Span::styled("[ Yes, quit ]", styled(yes_focused)),
        Span::raw(" "),
        Span::styled("[ No ]", styled(!yes_focused)),
    ]);
    let p = Paragraph::new(Text::from(line)).alignment(Alignment::Right);
    f.render_widget(p, buttons_area);
}
