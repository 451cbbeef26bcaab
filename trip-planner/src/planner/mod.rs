// Preference -> recommendation pipeline
//
// Both halves are pure functions over the static catalog; the view structs only
// track which cards are expanded in the results screen.

pub mod itinerary;
pub mod selector;

pub use itinerary::{day_count_for, generate_itinerary, ItineraryView};
pub use selector::{select_destinations, suggestions_by_popularity, DestinationView};
