// Itinerary generator
//
// Only `duration` matters: it picks how many of the fixed day templates are shown.
// Budget, group, interests etc. never change the activities.

use crate::models::catalog::DayItinerary;
use crate::models::preferences::{Duration, TravelPreferences};

/// Day count used when the duration label is not one of the known buckets.
pub const FALLBACK_DAY_COUNT: usize = 4;

pub fn day_count_for(duration: &Duration) -> usize {
    match duration {
        Duration::OneToTwo => 2,
        Duration::ThreeToFour => 4,
        Duration::FiveToSeven => 5,
        Duration::SevenPlus => 7,
        Duration::Other(_) => FALLBACK_DAY_COUNT,
    }
}

/// The first N day templates, in template order.
pub fn generate_itinerary(
    preferences: &TravelPreferences,
    templates: &[DayItinerary],
) -> Vec<DayItinerary> {
    let days = day_count_for(&preferences.duration);
    templates.iter().take(days).cloned().collect()
}

/// Expansion state for the itinerary tab: zero or one day open, day 1 initially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryView {
    expanded_day: Option<u8>,
}

impl Default for ItineraryView {
    fn default() -> Self {
        Self {
            expanded_day: Some(1),
        }
    }
}

impl ItineraryView {
    pub fn toggle_day(&mut self, day: u8) {
        if self.expanded_day == Some(day) {
            self.expanded_day = None;
        } else {
            self.expanded_day = Some(day);
        }
    }

    pub fn is_expanded(&self, day: u8) -> bool {
        self.expanded_day == Some(day)
    }

    pub fn expanded_day(&self) -> Option<u8> {
        self.expanded_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::preferences::{Budget, TravelGroup};

    fn days_for(duration: Duration) -> Vec<u8> {
        let catalog = Catalog::embedded().unwrap();
        let prefs = TravelPreferences {
            duration,
            ..TravelPreferences::default()
        };
        generate_itinerary(&prefs, catalog.day_templates())
            .iter()
            .map(|d| d.day)
            .collect()
    }

    #[test]
    fn buckets_map_to_fixed_day_counts() {
        assert_eq!(days_for(Duration::OneToTwo), vec![1, 2]);
        assert_eq!(days_for(Duration::ThreeToFour), vec![1, 2, 3, 4]);
        assert_eq!(days_for(Duration::FiveToSeven), vec![1, 2, 3, 4, 5]);
        assert_eq!(days_for(Duration::SevenPlus), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn unknown_duration_falls_back_to_four_days() {
        assert_eq!(
            days_for(Duration::Other("fortnight".to_string())),
            vec![1, 2, 3, 4]
        );
        assert_eq!(days_for(Duration::parse("")), vec![1, 2, 3, 4]);
    }

    #[test]
    fn other_preferences_do_not_alter_day_content() {
        let catalog = Catalog::embedded().unwrap();
        let plain = TravelPreferences {
            duration: Duration::SevenPlus,
            ..TravelPreferences::default()
        };
        let fancy = TravelPreferences {
            duration: Duration::SevenPlus,
            budget: Budget::Luxury,
            travel_group: TravelGroup::Family,
            interests: vec!["Wildlife".to_string()],
            ..TravelPreferences::default()
        };
        let a = generate_itinerary(&plain, catalog.day_templates());
        let b = generate_itinerary(&fancy, catalog.day_templates());
        assert_eq!(a, b);
        assert_eq!(a.as_slice(), catalog.day_templates());
    }

    #[test]
    fn short_template_list_is_not_padded() {
        let catalog = Catalog::embedded().unwrap();
        let prefs = TravelPreferences {
            duration: Duration::SevenPlus,
            ..TravelPreferences::default()
        };
        let out = generate_itinerary(&prefs, &catalog.day_templates()[..3]);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn booking_url_is_carried_through() {
        let catalog = Catalog::embedded().unwrap();
        let prefs = TravelPreferences {
            duration: Duration::OneToTwo,
            ..TravelPreferences::default()
        };
        let out = generate_itinerary(&prefs, catalog.day_templates());
        assert_eq!(
            out[0].morning.booking_url.as_deref(),
            Some("https://viator.tpk.mx/Xc1Z4LAB")
        );
        assert!(out[1].activities().all(|(_, a)| a.booking_url.is_none()));
    }

    #[test]
    fn day_one_starts_expanded() {
        let view = ItineraryView::default();
        assert_eq!(view.expanded_day(), Some(1));
    }

    #[test]
    fn selecting_another_day_keeps_exactly_one_open() {
        let mut view = ItineraryView::default();
        view.toggle_day(3);
        assert!(view.is_expanded(3));
        assert!(!view.is_expanded(1));
        view.toggle_day(2);
        assert_eq!(view.expanded_day(), Some(2));
    }

    #[test]
    fn selecting_the_open_day_collapses_everything() {
        let mut view = ItineraryView::default();
        view.toggle_day(1);
        assert_eq!(view.expanded_day(), None);
        view.toggle_day(1);
        assert_eq!(view.expanded_day(), Some(1));
    }
}
