// Travel preference contracts
//
// `TravelPreferences` is the single value the wizard hands to the selector and the
// itinerary generator. Wire ids match the labels the catalog/UI have always used
// (e.g. "free-easy", "7+") so serialized preferences stay readable.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TravelType {
    Leisure,
    Business,
    Adventure,
    Cultural,
    Culinary,
    Shopping,
}

impl TravelType {
    pub const ALL: [TravelType; 6] = [
        TravelType::Leisure,
        TravelType::Business,
        TravelType::Adventure,
        TravelType::Cultural,
        TravelType::Culinary,
        TravelType::Shopping,
    ];

    pub fn as_id(&self) -> &'static str {
        match self {
            TravelType::Leisure => "leisure",
            TravelType::Business => "business",
            TravelType::Adventure => "adventure",
            TravelType::Cultural => "cultural",
            TravelType::Culinary => "culinary",
            TravelType::Shopping => "shopping",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TravelType::Leisure => "Leisure & Relaxation",
            TravelType::Business => "Business & Networking",
            TravelType::Adventure => "Adventure & Thrills",
            TravelType::Cultural => "Cultural Exploration",
            TravelType::Culinary => "Culinary Journey",
            TravelType::Shopping => "Shopping Paradise",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TravelType::Leisure => "🌴",
            TravelType::Business => "💼",
            TravelType::Adventure => "🎢",
            TravelType::Cultural => "🏛️",
            TravelType::Culinary => "🍜",
            TravelType::Shopping => "🛍️",
        }
    }
}

/// Trip length bucket.
///
/// Only the four offered buckets can be picked in the wizard, but a value read from
/// elsewhere (e.g. a hand-edited preferences file) may carry any label. Those land in
/// `Other` so the itinerary generator can apply its fallback instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Duration {
    OneToTwo,
    ThreeToFour,
    FiveToSeven,
    SevenPlus,
    Other(String),
}

impl Duration {
    pub const OPTIONS: [Duration; 4] = [
        Duration::OneToTwo,
        Duration::ThreeToFour,
        Duration::FiveToSeven,
        Duration::SevenPlus,
    ];

    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "1-2" => Duration::OneToTwo,
            "3-4" => Duration::ThreeToFour,
            "5-7" => Duration::FiveToSeven,
            "7+" => Duration::SevenPlus,
            other => Duration::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Duration::OneToTwo => "1-2",
            Duration::ThreeToFour => "3-4",
            Duration::FiveToSeven => "5-7",
            Duration::SevenPlus => "7+",
            Duration::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for Duration {
    fn from(value: String) -> Self {
        Duration::parse(&value)
    }
}

impl From<Duration> for String {
    fn from(value: Duration) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Budget {
    Budget,
    Moderate,
    Luxury,
}

impl Budget {
    pub const ALL: [Budget; 3] = [Budget::Budget, Budget::Moderate, Budget::Luxury];

    pub fn as_id(&self) -> &'static str {
        match self {
            Budget::Budget => "budget",
            Budget::Moderate => "moderate",
            Budget::Luxury => "luxury",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Budget::Budget => "Budget",
            Budget::Moderate => "Moderate",
            Budget::Luxury => "Luxury",
        }
    }

    pub fn daily_range(&self) -> &'static str {
        match self {
            Budget::Budget => "$50-100/day",
            Budget::Moderate => "$100-250/day",
            Budget::Luxury => "$250+/day",
        }
    }

    /// Compact symbol used in the results header.
    pub fn symbol(&self) -> &'static str {
        match self {
            Budget::Budget => "$",
            Budget::Moderate => "$$",
            Budget::Luxury => "$$$",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TravelGroup {
    Solo,
    Couple,
    Family,
    Group,
}

impl TravelGroup {
    pub const ALL: [TravelGroup; 4] = [
        TravelGroup::Solo,
        TravelGroup::Couple,
        TravelGroup::Family,
        TravelGroup::Group,
    ];

    pub fn as_id(&self) -> &'static str {
        match self {
            TravelGroup::Solo => "solo",
            TravelGroup::Couple => "couple",
            TravelGroup::Family => "family",
            TravelGroup::Group => "group",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TravelGroup::Solo => "Solo Traveler",
            TravelGroup::Couple => "Couple",
            TravelGroup::Family => "Family",
            TravelGroup::Group => "Group",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            TravelGroup::Solo => "Solo",
            TravelGroup::Couple => "Couple",
            TravelGroup::Family => "Family",
            TravelGroup::Group => "Group",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TourStyle {
    Guided,
    FreeEasy,
    Mixed,
}

impl TourStyle {
    pub const ALL: [TourStyle; 3] = [TourStyle::Guided, TourStyle::FreeEasy, TourStyle::Mixed];

    pub fn as_id(&self) -> &'static str {
        match self {
            TourStyle::Guided => "guided",
            TourStyle::FreeEasy => "free-easy",
            TourStyle::Mixed => "mixed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TourStyle::Guided => "Guided Tours",
            TourStyle::FreeEasy => "Free & Easy",
            TourStyle::Mixed => "Mixed",
        }
    }

    pub fn blurb(&self) -> &'static str {
        match self {
            TourStyle::Guided => "Expert-led experiences",
            TourStyle::FreeEasy => "Explore at your pace",
            TourStyle::Mixed => "Best of both worlds",
        }
    }

    /// Summary form: the id with the hyphen replaced by a space ("free easy").
    pub fn summary_label(&self) -> String {
        self.as_id().replace('-', " ")
    }
}

/// Interests offered on step 4, in display order.
pub const INTEREST_OPTIONS: [&str; 15] = [
    "Architecture",
    "Street Food",
    "Nightlife",
    "Museums",
    "Nature Parks",
    "Beaches",
    "Photography",
    "Local Markets",
    "Fine Dining",
    "Temples",
    "Modern Art",
    "History",
    "Wildlife",
    "Rooftop Bars",
    "Gardens",
];

/// Canned answer offered when step 1 is left empty.
pub const SUGGESTED_TRAVEL_TYPES: [TravelType; 3] = [
    TravelType::Leisure,
    TravelType::Cultural,
    TravelType::Culinary,
];

/// Canned answer offered when step 4 is left empty.
pub const SUGGESTED_INTERESTS: [&str; 4] = ["Street Food", "Gardens", "Architecture", "Local Markets"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPreferences {
    #[serde(default)]
    pub travel_type: Vec<TravelType>,
    pub duration: Duration,
    pub budget: Budget,
    pub travel_group: TravelGroup,
    pub tour_style: TourStyle,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub special_requirements: String,
}

impl Default for TravelPreferences {
    fn default() -> Self {
        Self {
            travel_type: Vec::new(),
            duration: Duration::ThreeToFour,
            budget: Budget::Moderate,
            travel_group: TravelGroup::Solo,
            tour_style: TourStyle::FreeEasy,
            interests: Vec::new(),
            special_requirements: String::new(),
        }
    }
}

impl TravelPreferences {
    /// "leisure, cultural" or "Not specified".
    pub fn travel_type_summary(&self) -> String {
        if self.travel_type.is_empty() {
            return "Not specified".to_string();
        }
        self.travel_type
            .iter()
            .map(|t| t.as_id())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn interests_summary(&self) -> String {
        if self.interests.is_empty() {
            return "Not specified".to_string();
        }
        self.interests.join(", ")
    }
}

/// Multi-select toggle: remove the value if present, otherwise append it.
/// Insertion order of the remaining values is preserved.
pub fn toggle_in<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if let Some(pos) = values.iter().position(|v| *v == value) {
        values.remove(pos);
    } else {
        values.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_wizard_step_defaults() {
        let p = TravelPreferences::default();
        assert!(p.travel_type.is_empty());
        assert_eq!(p.duration, Duration::ThreeToFour);
        assert_eq!(p.budget, Budget::Moderate);
        assert_eq!(p.travel_group, TravelGroup::Solo);
        assert_eq!(p.tour_style, TourStyle::FreeEasy);
        assert!(p.interests.is_empty());
        assert_eq!(p.special_requirements, "");
    }

    #[test]
    fn toggle_twice_restores_original_contents() {
        let mut types = vec![TravelType::Business];
        toggle_in(&mut types, TravelType::Culinary);
        assert_eq!(types, vec![TravelType::Business, TravelType::Culinary]);
        toggle_in(&mut types, TravelType::Culinary);
        assert_eq!(types, vec![TravelType::Business]);
    }

    #[test]
    fn toggle_removes_from_the_middle_keeping_order() {
        let mut interests = vec!["Museums".to_string(), "Beaches".to_string(), "History".to_string()];
        toggle_in(&mut interests, "Beaches".to_string());
        assert_eq!(interests, vec!["Museums".to_string(), "History".to_string()]);
    }

    #[test]
    fn duration_labels_parse_to_buckets() {
        for d in Duration::OPTIONS.iter() {
            assert_eq!(&Duration::parse(d.label()), d, "label {} should round back", d);
        }
        assert_eq!(
            Duration::parse("10-14"),
            Duration::Other("10-14".to_string())
        );
    }

    #[test]
    fn preferences_serialize_with_stable_wire_ids() {
        let p = TravelPreferences {
            travel_type: vec![TravelType::Leisure, TravelType::Culinary],
            duration: Duration::SevenPlus,
            budget: Budget::Luxury,
            travel_group: TravelGroup::Family,
            tour_style: TourStyle::FreeEasy,
            interests: vec!["Beaches".to_string()],
            special_requirements: "halal food".to_string(),
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["travelType"], serde_json::json!(["leisure", "culinary"]));
        assert_eq!(json["duration"], "7+");
        assert_eq!(json["tourStyle"], "free-easy");
        assert_eq!(json["travelGroup"], "family");
        assert_eq!(json["specialRequirements"], "halal food");
    }

    #[test]
    fn unknown_duration_survives_deserialization() {
        let json = r#"{"duration":"2 weeks","budget":"budget","travelGroup":"solo","tourStyle":"mixed"}"#;
        let p: TravelPreferences = serde_json::from_str(json).unwrap();
        assert_eq!(p.duration, Duration::Other("2 weeks".to_string()));
        assert!(p.travel_type.is_empty());
        assert!(p.interests.is_empty());
    }

    #[test]
    fn summaries_fall_back_to_not_specified() {
        let mut p = TravelPreferences::default();
        assert_eq!(p.travel_type_summary(), "Not specified");
        assert_eq!(p.interests_summary(), "Not specified");
        p.travel_type = vec![TravelType::Cultural, TravelType::Shopping];
        p.interests = vec!["Temples".to_string(), "History".to_string()];
        assert_eq!(p.travel_type_summary(), "cultural, shopping");
        assert_eq!(p.interests_summary(), "Temples, History");
    }

    #[test]
    fn tour_style_summary_replaces_hyphen() {
        assert_eq!(TourStyle::FreeEasy.summary_label(), "free easy");
        assert_eq!(TourStyle::Guided.summary_label(), "guided");
    }
}
