// Screen flow: welcome -> wizard -> results -> (start over) welcome
//
// The session owns the catalog and the current screen. Starting, submitting and
// resetting are the only transitions between screens.

use crate::catalog::Catalog;
use crate::models::catalog::{DayItinerary, Destination};
use crate::models::preferences::{TravelPreferences, TravelType};
use crate::planner::{generate_itinerary, select_destinations, DestinationView, ItineraryView};
use crate::wizard::{NextOutcome, PreferenceWizard};
use anyhow::Result;
use log::info;

/// Fixed advice shown under the itinerary.
pub const ESSENTIAL_TIPS: [(&str, &str); 6] = [
    ("Transportation", "Get an EZ-Link card for MRT and buses"),
    ("Weather", "Tropical climate, bring umbrella and sunscreen"),
    ("Dress Code", "Smart casual for upscale venues, modest for temples"),
    ("Booking", "Reserve popular attractions online in advance"),
    ("Food", "Hawker centers are cash-preferred, cards elsewhere"),
    ("Timing", "Start early to avoid crowds and heat"),
];

/// Closing card of the destinations tab.
pub const PRO_TIPS_TITLE: &str = "Pro Tips for Your Singapore Adventure";
pub const PRO_TIPS: [(&str, &str); 3] = [
    (
        "Transportation",
        "Get an EZ-Link card for seamless MRT and bus travel across the island",
    ),
    (
        "Weather",
        "Tropical climate year-round. Carry an umbrella and stay hydrated!",
    ),
    (
        "Payment",
        "Cards accepted everywhere, but carry some cash for hawker centers",
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultsTab {
    #[default]
    Destinations,
    Itinerary,
}

impl ResultsTab {
    pub fn label(&self) -> &'static str {
        match self {
            ResultsTab::Destinations => "Destinations",
            ResultsTab::Itinerary => "Itinerary",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            ResultsTab::Destinations => ResultsTab::Itinerary,
            ResultsTab::Itinerary => ResultsTab::Destinations,
        }
    }
}

/// Everything the results screen shows, computed once at submit time.
#[derive(Debug, Clone)]
pub struct ResultsView {
    pub preferences: TravelPreferences,
    pub destinations: Vec<Destination>,
    pub itinerary: Vec<DayItinerary>,
    pub tab: ResultsTab,
    pub destination_view: DestinationView,
    pub itinerary_view: ItineraryView,
}

impl ResultsView {
    pub fn new(preferences: TravelPreferences, catalog: &Catalog) -> Self {
        let destinations = select_destinations(&preferences, catalog.destinations());
        let itinerary = generate_itinerary(&preferences, catalog.day_templates());
        Self {
            preferences,
            destinations,
            itinerary,
            tab: ResultsTab::default(),
            destination_view: DestinationView::default(),
            itinerary_view: ItineraryView::default(),
        }
    }

    /// Switch tabs; expansion state of both tabs is kept.
    pub fn switch_tab(&mut self) {
        self.tab = self.tab.other();
    }

    /// Chips for the header: duration, budget, group, style, interest count.
    pub fn header_summary(&self) -> Vec<String> {
        let p = &self.preferences;
        vec![
            format!("{} days", p.duration),
            p.budget.symbol().to_string(),
            p.travel_group.short_label().to_string(),
            p.tour_style.summary_label(),
            format!("{} interests", p.interests.len()),
        ]
    }

    pub fn itinerary_headline(&self) -> String {
        format!("{} days of unforgettable experiences", self.itinerary.len())
    }
}

#[derive(Debug, Clone)]
pub enum Screen {
    Welcome,
    Wizard(PreferenceWizard),
    Results(Box<ResultsView>),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Welcome => "welcome",
            Screen::Wizard(_) => "wizard",
            Screen::Results(_) => "results",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    screen: Screen,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            screen: Screen::Welcome,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn wizard(&self) -> Option<&PreferenceWizard> {
        match &self.screen {
            Screen::Wizard(w) => Some(w),
            _ => None,
        }
    }

    pub fn wizard_mut(&mut self) -> Option<&mut PreferenceWizard> {
        match &mut self.screen {
            Screen::Wizard(w) => Some(w),
            _ => None,
        }
    }

    pub fn results(&self) -> Option<&ResultsView> {
        match &self.screen {
            Screen::Results(r) => Some(r),
            _ => None,
        }
    }

    pub fn results_mut(&mut self) -> Option<&mut ResultsView> {
        match &mut self.screen {
            Screen::Results(r) => Some(r),
            _ => None,
        }
    }

    /// Welcome -> fresh wizard. Ignored on other screens.
    pub fn start(&mut self) -> bool {
        if !matches!(self.screen, Screen::Welcome) {
            return false;
        }
        info!("[PHASE: session] [STEP: start] Entering preference wizard");
        self.screen = Screen::Wizard(PreferenceWizard::new());
        true
    }

    pub fn submit(&mut self, preferences: TravelPreferences) {
        let view = ResultsView::new(preferences, &self.catalog);
        info!(
            "[PHASE: session] [STEP: submit] Results ready (destinations={}, days={})",
            view.destinations.len(),
            view.itinerary.len()
        );
        self.screen = Screen::Results(Box::new(view));
    }

    /// Press the wizard's advance button; a submit moves to the results screen.
    pub fn wizard_next(&mut self) -> Option<NextOutcome> {
        let outcome = self.wizard_mut()?.next();
        if let NextOutcome::Submitted(preferences) = &outcome {
            self.submit(preferences.clone());
        }
        Some(outcome)
    }

    /// Discard everything and return to the welcome screen.
    pub fn reset(&mut self) {
        info!(
            "[PHASE: session] [STEP: reset] Start over requested from {} screen",
            self.screen.name()
        );
        self.screen = Screen::Welcome;
    }
}

/// Drive a full session with scripted answers and describe what came out.
///
/// The script exercises a refused Next on step 1, the canned suggestion, a
/// manual interest pick and a submit.
pub fn plan_smoke(catalog: Catalog) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut session = Session::new(catalog);
    lines.push("PLAN_SMOKE begin".to_string());

    session.start();
    let refused = session.wizard_next();
    lines.push(format!("step1 next_without_selection={:?}", refused));
    if refused != Some(NextOutcome::Blocked) {
        anyhow::bail!("expected step 1 to refuse an empty travel type selection");
    }

    let wizard = session
        .wizard_mut()
        .ok_or_else(|| anyhow::anyhow!("wizard not active after start"))?;
    let applied = wizard.apply_suggestion();
    lines.push(format!(
        "step1 suggestion_applied={} travel_type=[{}]",
        applied,
        wizard.form().travel_type_summary()
    ));
    wizard.toggle_travel_type(TravelType::Adventure);

    for _ in 0..3 {
        match session.wizard_next() {
            Some(NextOutcome::Advanced(step)) => {
                lines.push(format!("advanced to step {}", step.number()))
            }
            other => anyhow::bail!("unexpected wizard outcome: {:?}", other),
        }
    }

    let wizard = session
        .wizard_mut()
        .ok_or_else(|| anyhow::anyhow!("wizard closed before step 4"))?;
    wizard.toggle_interest("Street Food");
    wizard.toggle_interest("Gardens");
    lines.push(format!(
        "step4 interests=[{}]",
        wizard.form().interests_summary()
    ));

    match session.wizard_next() {
        Some(NextOutcome::Advanced(step)) => lines.push(format!("advanced to step {}", step.number())),
        other => anyhow::bail!("unexpected wizard outcome: {:?}", other),
    }
    match session.wizard_next() {
        Some(NextOutcome::Submitted(_)) => lines.push("submitted".to_string()),
        other => anyhow::bail!("expected submit, got {:?}", other),
    }

    let results = session
        .results()
        .ok_or_else(|| anyhow::anyhow!("results screen not shown after submit"))?;
    lines.push(format!("header {}", results.header_summary().join(" | ")));
    for (rank, d) in results.destinations.iter().enumerate() {
        lines.push(format!(
            "destination #{} {} ({}%)",
            rank + 1,
            d.name,
            d.match_score
        ));
    }
    lines.push(results.itinerary_headline());
    for day in &results.itinerary {
        lines.push(format!("day {} {}", day.day, day.theme));
        for (period, activity) in day.activities() {
            let booking = activity
                .booking_url
                .as_deref()
                .map(|u| format!(" [book: {}]", u))
                .unwrap_or_default();
            lines.push(format!(
                "  {} {} {}{}",
                period.label(),
                activity.time,
                activity.title,
                booking
            ));
        }
    }

    session.reset();
    lines.push(format!("reset screen={}", session.screen().name()));
    lines.push("PLAN_SMOKE end".to_string());
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::preferences::{Budget, Duration, TourStyle, TravelGroup};
    use crate::wizard::WizardStep;

    fn session() -> Session {
        Session::new(Catalog::embedded().unwrap())
    }

    fn walk_to_results(s: &mut Session) {
        s.start();
        let w = s.wizard_mut().unwrap();
        w.toggle_travel_type(TravelType::Cultural);
        w.set_duration(Duration::OneToTwo);
        w.toggle_interest("Temples");
        for _ in 0..4 {
            assert!(matches!(s.wizard_next(), Some(NextOutcome::Advanced(_))));
        }
        assert!(matches!(s.wizard_next(), Some(NextOutcome::Submitted(_))));
    }

    #[test]
    fn starts_on_welcome() {
        let s = session();
        assert!(matches!(s.screen(), Screen::Welcome));
        assert!(s.wizard().is_none());
    }

    #[test]
    fn submit_moves_to_results_with_generated_content() {
        let mut s = session();
        walk_to_results(&mut s);
        let r = s.results().expect("results screen");
        assert_eq!(r.destinations.len(), 8);
        assert_eq!(r.itinerary.len(), 2);
        assert_eq!(r.tab, ResultsTab::Destinations);
        assert_eq!(r.itinerary_view.expanded_day(), Some(1));
        assert_eq!(r.itinerary_headline(), "2 days of unforgettable experiences");
    }

    #[test]
    fn start_is_ignored_outside_welcome() {
        let mut s = session();
        assert!(s.start());
        s.wizard_mut().unwrap().toggle_travel_type(TravelType::Leisure);
        assert!(!s.start());
        assert_eq!(
            s.wizard().unwrap().form().travel_type,
            vec![TravelType::Leisure],
            "second start must not replace the wizard"
        );
    }

    #[test]
    fn reset_then_start_gives_a_fresh_wizard() {
        let mut s = session();
        walk_to_results(&mut s);
        s.reset();
        assert!(matches!(s.screen(), Screen::Welcome));

        s.start();
        let w = s.wizard().unwrap();
        assert_eq!(w.step(), WizardStep::TravelType);
        assert_eq!(w.form(), &TravelPreferences::default());
        assert!(!w.show_suggestion());
    }

    #[test]
    fn reset_mid_wizard_discards_answers() {
        let mut s = session();
        s.start();
        s.wizard_mut().unwrap().toggle_travel_type(TravelType::Shopping);
        s.wizard_next();
        s.reset();
        s.start();
        assert!(s.wizard().unwrap().form().travel_type.is_empty());
    }

    #[test]
    fn switching_tabs_keeps_expansion_state() {
        let mut s = session();
        walk_to_results(&mut s);
        let r = s.results_mut().unwrap();
        let first = r.destinations[0].id.clone();
        r.destination_view.toggle_destination(&first);
        r.switch_tab();
        assert_eq!(r.tab, ResultsTab::Itinerary);
        r.itinerary_view.toggle_day(2);
        r.switch_tab();
        assert_eq!(r.tab, ResultsTab::Destinations);
        assert!(r.destination_view.is_expanded(&first));
        assert_eq!(r.itinerary_view.expanded_day(), Some(2));
    }

    #[test]
    fn header_summary_formats_preferences() {
        let catalog = Catalog::embedded().unwrap();
        let prefs = TravelPreferences {
            duration: Duration::FiveToSeven,
            budget: Budget::Luxury,
            travel_group: TravelGroup::Family,
            tour_style: TourStyle::FreeEasy,
            interests: vec!["Beaches".to_string(), "Museums".to_string()],
            ..TravelPreferences::default()
        };
        let view = ResultsView::new(prefs, &catalog);
        assert_eq!(
            view.header_summary(),
            vec!["5-7 days", "$$$", "Family", "free easy", "2 interests"]
        );
    }

    #[test]
    fn wizard_next_outside_wizard_is_none() {
        let mut s = session();
        assert_eq!(s.wizard_next(), None);
    }

    #[test]
    fn plan_smoke_transcript_covers_the_whole_flow() {
        let lines = plan_smoke(Catalog::embedded().unwrap()).unwrap();
        assert_eq!(lines.first().map(String::as_str), Some("PLAN_SMOKE begin"));
        assert_eq!(lines.last().map(String::as_str), Some("PLAN_SMOKE end"));
        assert!(lines.iter().any(|l| l == "step1 next_without_selection=Some(Blocked)"));
        assert!(lines
            .iter()
            .any(|l| l == "step1 suggestion_applied=true travel_type=[leisure, cultural, culinary]"));
        assert!(lines.iter().any(|l| l == "destination #1 Hawker Centers (96%)"));
        assert!(lines.iter().any(|l| l == "4 days of unforgettable experiences"));
        assert!(lines
            .iter()
            .any(|l| l.contains("[book: https://viator.tpk.mx/Xc1Z4LAB]")));
        assert!(lines.iter().any(|l| l == "reset screen=welcome"));
    }
}
