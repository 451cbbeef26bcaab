//! Five-step preference wizard.
//!
//! Steps:
//! 1. Travel type (multi-select, blocks when empty)
//! 2. Duration + budget
//! 3. Travel group + tour style
//! 4. Interests (multi-select, blocks when empty)
//! 5. Special requirements (free text); advancing here submits
//!
//! A blocked Next keeps the step and raises the suggestion flag. The flag is
//! cleared by any successful transition, any manual selection, applying the
//! suggestion, or an explicit dismissal.

use crate::models::preferences::{
    toggle_in, Budget, Duration, TourStyle, TravelGroup, TravelPreferences, TravelType,
    SUGGESTED_INTERESTS, SUGGESTED_TRAVEL_TYPES,
};
use crate::utils::logging::describe_free_text;
use log::info;
use uuid::Uuid;

pub const STEP_COUNT: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    TravelType,
    DurationBudget,
    GroupStyle,
    Interests,
    Requirements,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::TravelType => 1,
            WizardStep::DurationBudget => 2,
            WizardStep::GroupStyle => 3,
            WizardStep::Interests => 4,
            WizardStep::Requirements => 5,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(WizardStep::TravelType),
            2 => Some(WizardStep::DurationBudget),
            3 => Some(WizardStep::GroupStyle),
            4 => Some(WizardStep::Interests),
            5 => Some(WizardStep::Requirements),
            _ => None,
        }
    }

    fn as_id(&self) -> &'static str {
        match self {
            WizardStep::TravelType => "travel_type",
            WizardStep::DurationBudget => "duration_budget",
            WizardStep::GroupStyle => "group_style",
            WizardStep::Interests => "interests",
            WizardStep::Requirements => "requirements",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::TravelType => "What brings you to Singapore?",
            WizardStep::DurationBudget => "How long will you stay?",
            WizardStep::GroupStyle => "Who's traveling with you?",
            WizardStep::Interests => "What interests you most?",
            WizardStep::Requirements => "Any special requirements?",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            WizardStep::TravelType => "Select all that apply",
            WizardStep::DurationBudget => "Choose your duration",
            WizardStep::GroupStyle => "Select your travel companions",
            WizardStep::Interests => "Select your favorite activities",
            WizardStep::Requirements => {
                "Tell us about dietary restrictions, accessibility needs, or other preferences"
            }
        }
    }

    fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    fn prev(&self) -> Option<Self> {
        Self::from_number(self.number().saturating_sub(1))
    }

    pub fn can_go_back(&self) -> bool {
        self.prev().is_some()
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }

    /// Label of the advance button.
    pub fn advance_label(&self) -> &'static str {
        if self.is_last() {
            "Discover Singapore"
        } else {
            "Next"
        }
    }

    /// Headline + body for the canned answer, on steps that have one.
    pub fn suggestion_copy(&self) -> Option<(&'static str, &'static str)> {
        match self {
            WizardStep::TravelType => Some((
                "Need help deciding?",
                "We recommend starting with Leisure, Cultural, and Culinary experiences for first-time visitors!",
            )),
            WizardStep::Interests => Some((
                "Not sure what to choose?",
                "Try these popular interests: Street Food, Gardens, Architecture, and Local Markets!",
            )),
            _ => None,
        }
    }
}

/// Result of pressing the advance button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOutcome {
    /// Moved to the given step.
    Advanced(WizardStep),
    /// Required selection missing; the suggestion flag is now raised.
    Blocked,
    /// Step 5 submit: the completed preferences.
    Submitted(TravelPreferences),
}

#[derive(Debug, Clone)]
pub struct PreferenceWizard {
    step: WizardStep,
    form: TravelPreferences,
    show_suggestion: bool,
    correlation_id: String,
}

impl Default for PreferenceWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceWizard {
    /// Fresh wizard: step 1, all defaults, no suggestion shown.
    pub fn new() -> Self {
        let correlation_id = Uuid::new_v4().to_string();
        info!(
            "[PHASE: wizard] [STEP: start] Preference wizard started (correlation_id={})",
            correlation_id
        );
        Self {
            step: WizardStep::TravelType,
            form: TravelPreferences::default(),
            show_suggestion: false,
            correlation_id,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// The preferences accumulated so far.
    pub fn form(&self) -> &TravelPreferences {
        &self.form
    }

    pub fn show_suggestion(&self) -> bool {
        self.show_suggestion
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    fn blocked(&self) -> bool {
        match self.step {
            WizardStep::TravelType => self.form.travel_type.is_empty(),
            WizardStep::Interests => self.form.interests.is_empty(),
            _ => false,
        }
    }

    pub fn next(&mut self) -> NextOutcome {
        if self.blocked() {
            self.show_suggestion = true;
            info!(
                "[PHASE: wizard] [STEP: {}] Next refused: selection required (correlation_id={})",
                self.step.as_id(),
                self.correlation_id
            );
            return NextOutcome::Blocked;
        }

        self.show_suggestion = false;
        match self.step.next() {
            Some(next) => {
                info!(
                    "[PHASE: wizard] [STEP: {}] Advanced to step {} (correlation_id={})",
                    self.step.as_id(),
                    next.number(),
                    self.correlation_id
                );
                self.step = next;
                NextOutcome::Advanced(next)
            }
            None => {
                info!(
                    "[PHASE: wizard] [STEP: submit] Preferences submitted (travel_types={}, duration={}, budget={}, group={}, style={}, interests={}, special_requirements={}, correlation_id={})",
                    self.form.travel_type.len(),
                    self.form.duration,
                    self.form.budget.as_id(),
                    self.form.travel_group.as_id(),
                    self.form.tour_style.as_id(),
                    self.form.interests.len(),
                    describe_free_text(&self.form.special_requirements),
                    self.correlation_id
                );
                NextOutcome::Submitted(self.form.clone())
            }
        }
    }

    /// Go back one step without validating. No-op on step 1.
    pub fn back(&mut self) -> bool {
        self.show_suggestion = false;
        match self.step.prev() {
            Some(prev) => {
                info!(
                    "[PHASE: wizard] [STEP: {}] Back to step {} (correlation_id={})",
                    self.step.as_id(),
                    prev.number(),
                    self.correlation_id
                );
                self.step = prev;
                true
            }
            None => false,
        }
    }

    /// Fill the current step's required field with the canned answer.
    /// Does not advance. Returns false on steps without a suggestion.
    pub fn apply_suggestion(&mut self) -> bool {
        let applied = match self.step {
            WizardStep::TravelType => {
                self.form.travel_type = SUGGESTED_TRAVEL_TYPES.to_vec();
                true
            }
            WizardStep::Interests => {
                self.form.interests = SUGGESTED_INTERESTS.iter().map(|s| s.to_string()).collect();
                true
            }
            _ => false,
        };
        self.show_suggestion = false;
        if applied {
            info!(
                "[PHASE: wizard] [STEP: {}] Suggestion applied (correlation_id={})",
                self.step.as_id(),
                self.correlation_id
            );
        }
        applied
    }

    pub fn dismiss_suggestion(&mut self) {
        self.show_suggestion = false;
    }

    pub fn toggle_travel_type(&mut self, travel_type: TravelType) {
        toggle_in(&mut self.form.travel_type, travel_type);
        self.show_suggestion = false;
    }

    pub fn toggle_interest(&mut self, interest: &str) {
        toggle_in(&mut self.form.interests, interest.to_string());
        self.show_suggestion = false;
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.form.duration = duration;
        self.show_suggestion = false;
    }

    pub fn set_budget(&mut self, budget: Budget) {
        self.form.budget = budget;
        self.show_suggestion = false;
    }

    pub fn set_travel_group(&mut self, group: TravelGroup) {
        self.form.travel_group = group;
        self.show_suggestion = false;
    }

    pub fn set_tour_style(&mut self, style: TourStyle) {
        self.form.tour_style = style;
        self.show_suggestion = false;
    }

    pub fn set_special_requirements(&mut self, text: impl Into<String>) {
        self.form.special_requirements = text.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard_at(step: WizardStep) -> PreferenceWizard {
        let mut w = PreferenceWizard::new();
        w.toggle_travel_type(TravelType::Adventure);
        w.toggle_interest("Wildlife");
        while w.step() != step {
            assert!(matches!(w.next(), NextOutcome::Advanced(_)));
        }
        w
    }

    #[test]
    fn starts_on_step_one_with_defaults() {
        let w = PreferenceWizard::new();
        assert_eq!(w.step(), WizardStep::TravelType);
        assert_eq!(w.form(), &TravelPreferences::default());
        assert!(!w.show_suggestion());
    }

    #[test]
    fn empty_travel_type_blocks_and_suggestion_unblocks() {
        let mut w = PreferenceWizard::new();
        assert_eq!(w.next(), NextOutcome::Blocked);
        assert_eq!(w.step(), WizardStep::TravelType);
        assert!(w.show_suggestion());

        assert!(w.apply_suggestion());
        assert_eq!(
            w.form().travel_type,
            vec![TravelType::Leisure, TravelType::Cultural, TravelType::Culinary]
        );
        // Applying does not advance.
        assert_eq!(w.step(), WizardStep::TravelType);
        assert!(!w.show_suggestion());

        assert_eq!(w.next(), NextOutcome::Advanced(WizardStep::DurationBudget));
        assert!(!w.show_suggestion());
    }

    #[test]
    fn empty_interests_block_step_four() {
        let mut w = PreferenceWizard::new();
        w.toggle_travel_type(TravelType::Culinary);
        w.next();
        w.next();
        w.next();
        assert_eq!(w.step(), WizardStep::Interests);

        assert_eq!(w.next(), NextOutcome::Blocked);
        assert!(w.show_suggestion());
        assert_eq!(w.step(), WizardStep::Interests);

        w.apply_suggestion();
        assert_eq!(
            w.form().interests,
            vec!["Street Food", "Gardens", "Architecture", "Local Markets"]
        );
        assert_eq!(w.next(), NextOutcome::Advanced(WizardStep::Requirements));
    }

    #[test]
    fn middle_steps_always_advance() {
        let mut w = wizard_at(WizardStep::DurationBudget);
        assert_eq!(w.next(), NextOutcome::Advanced(WizardStep::GroupStyle));
        assert_eq!(w.next(), NextOutcome::Advanced(WizardStep::Interests));
    }

    #[test]
    fn manual_selection_clears_suggestion_flag() {
        let mut w = PreferenceWizard::new();
        w.next();
        assert!(w.show_suggestion());
        w.toggle_travel_type(TravelType::Shopping);
        assert!(!w.show_suggestion());
        assert_eq!(w.step(), WizardStep::TravelType);
    }

    #[test]
    fn dismiss_clears_suggestion_flag() {
        let mut w = PreferenceWizard::new();
        w.next();
        w.dismiss_suggestion();
        assert!(!w.show_suggestion());
        assert!(w.form().travel_type.is_empty());
    }

    #[test]
    fn toggle_twice_restores_travel_types() {
        let mut w = PreferenceWizard::new();
        w.toggle_travel_type(TravelType::Leisure);
        let before = w.form().travel_type.clone();
        w.toggle_travel_type(TravelType::Business);
        w.toggle_travel_type(TravelType::Business);
        assert_eq!(w.form().travel_type, before);
    }

    #[test]
    fn back_never_validates() {
        let mut w = wizard_at(WizardStep::Requirements);
        // Empty the required sets; Back must still move.
        w.toggle_interest("Wildlife");
        w.toggle_travel_type(TravelType::Adventure);
        assert!(w.form().interests.is_empty());

        for expected in [
            WizardStep::Interests,
            WizardStep::GroupStyle,
            WizardStep::DurationBudget,
            WizardStep::TravelType,
        ] {
            assert!(w.back());
            assert_eq!(w.step(), expected);
        }
    }

    #[test]
    fn back_on_step_one_is_a_no_op() {
        let mut w = PreferenceWizard::new();
        assert!(!w.back());
        assert_eq!(w.step(), WizardStep::TravelType);
        assert!(!WizardStep::TravelType.can_go_back());
    }

    #[test]
    fn back_clears_suggestion_flag() {
        let mut w = wizard_at(WizardStep::Interests);
        w.toggle_interest("Wildlife");
        w.next();
        assert!(w.show_suggestion());
        w.back();
        assert!(!w.show_suggestion());
        assert_eq!(w.step(), WizardStep::GroupStyle);
    }

    #[test]
    fn suggestion_only_exists_on_blocking_steps() {
        let mut w = wizard_at(WizardStep::GroupStyle);
        let before = w.form().clone();
        assert!(!w.apply_suggestion());
        assert_eq!(w.form(), &before);
    }

    #[test]
    fn submit_emits_accumulated_preferences() {
        let mut w = PreferenceWizard::new();
        w.toggle_travel_type(TravelType::Cultural);
        w.toggle_travel_type(TravelType::Leisure);
        w.next();
        w.set_duration(Duration::FiveToSeven);
        w.set_budget(Budget::Luxury);
        w.next();
        w.set_travel_group(TravelGroup::Family);
        w.set_tour_style(TourStyle::Guided);
        w.next();
        w.toggle_interest("Beaches");
        w.next();
        w.set_special_requirements("");
        assert_eq!(w.step().advance_label(), "Discover Singapore");

        let expected = TravelPreferences {
            travel_type: vec![TravelType::Cultural, TravelType::Leisure],
            duration: Duration::FiveToSeven,
            budget: Budget::Luxury,
            travel_group: TravelGroup::Family,
            tour_style: TourStyle::Guided,
            interests: vec!["Beaches".to_string()],
            special_requirements: String::new(),
        };
        assert_eq!(w.next(), NextOutcome::Submitted(expected));
        // Submitting does not move the step.
        assert_eq!(w.step(), WizardStep::Requirements);
    }

    #[test]
    fn step_numbers_round_trip() {
        for n in 1..=STEP_COUNT {
            let step = WizardStep::from_number(n).unwrap();
            assert_eq!(step.number(), n);
        }
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(6), None);
    }
}
