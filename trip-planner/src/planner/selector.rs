// Recommendation selector
//
// Ranking is purely by the authored `matchScore`; preferences are accepted so the
// call site reads like a personalization step, but they do not influence the
// order or the cut.

use crate::models::catalog::{Destination, Suggestion};
use crate::models::preferences::TravelPreferences;

/// Upper bound on destinations shown in the results view.
pub const MAX_RECOMMENDATIONS: usize = 8;

/// Top destinations by `matchScore` descending. Ties keep catalog order.
pub fn select_destinations(
    _preferences: &TravelPreferences,
    catalog: &[Destination],
) -> Vec<Destination> {
    let mut ranked = catalog.to_vec();
    // `sort_by` is stable; equal scores stay in catalog order.
    ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    ranked.truncate(MAX_RECOMMENDATIONS);
    ranked
}

/// A destination's suggestions by popularity, most popular first.
pub fn suggestions_by_popularity(destination: &Destination) -> Vec<&Suggestion> {
    let mut out: Vec<&Suggestion> = destination.suggestions.iter().collect();
    out.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    out
}

/// Expansion state for the destinations tab.
///
/// At most one destination is expanded and at most one attraction panel is open.
/// Changing the expanded destination always closes the open attraction panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationView {
    expanded: Option<String>,
    open_attraction: Option<String>,
}

impl DestinationView {
    pub fn toggle_destination(&mut self, destination_id: &str) {
        if self.expanded.as_deref() == Some(destination_id) {
            self.expanded = None;
        } else {
            self.expanded = Some(destination_id.to_string());
        }
        self.open_attraction = None;
    }

    pub fn toggle_attraction(&mut self, attraction_id: &str) {
        if self.open_attraction.as_deref() == Some(attraction_id) {
            self.open_attraction = None;
        } else {
            self.open_attraction = Some(attraction_id.to_string());
        }
    }

    pub fn is_expanded(&self, destination_id: &str) -> bool {
        self.expanded.as_deref() == Some(destination_id)
    }

    pub fn is_attraction_open(&self, attraction_id: &str) -> bool {
        self.open_attraction.as_deref() == Some(attraction_id)
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn open_attraction(&self) -> Option<&str> {
        self.open_attraction.as_deref()
    }
}
