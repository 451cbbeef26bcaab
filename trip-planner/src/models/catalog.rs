// Static reference records: destinations and day templates.
//
// Shapes match the bundled JSON datasets (camelCase keys).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    pub description: String,
    pub popularity: u8,
    pub tips: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttractionDetails {
    pub location: String,
    pub opening_hours: String,
    pub entry_fee: String,
    pub duration: String,
    pub best_time: String,
    pub accessibility: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub details: AttractionDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationInfo {
    pub location: String,
    pub opening_hours: String,
    pub best_time_to_visit: String,
    pub average_duration: String,
    pub price_range: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
    /// Authored 0-100 score. Used for ordering only.
    pub match_score: u8,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    #[serde(default)]
    pub attractions: Vec<Attraction>,
    pub detailed_info: DestinationInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Morning,
    Afternoon,
    Night,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Morning, Period::Afternoon, Period::Night];

    pub fn label(&self) -> &'static str {
        match self {
            Period::Morning => "Morning",
            Period::Afternoon => "Afternoon",
            Period::Night => "Night",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub time: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub duration: String,
    pub tips: String,
    pub icon: String,
    /// Opaque external link; carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayItinerary {
    pub day: u8,
    pub theme: String,
    pub morning: Activity,
    pub afternoon: Activity,
    pub night: Activity,
}

impl DayItinerary {
    pub fn activity(&self, period: Period) -> &Activity {
        match period {
            Period::Morning => &self.morning,
            Period::Afternoon => &self.afternoon,
            Period::Night => &self.night,
        }
    }

    /// Morning, afternoon, night, in that order.
    pub fn activities(&self) -> impl Iterator<Item = (Period, &Activity)> {
        Period::ALL.into_iter().map(move |p| (p, self.activity(p)))
    }
}
