// Reference datasets (destinations + day templates)
//
// Both datasets are embedded at build time. Settings may point at replacement
// JSON files on disk; those are validated with the same rules before use.

use crate::config::CatalogSettings;
use crate::models::catalog::{DayItinerary, Destination};
use log::info;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const EMBEDDED_DESTINATIONS: &str = include_str!("../../data/destinations.json");
const EMBEDDED_ITINERARY: &str = include_str!("../../data/itinerary.json");

/// Number of day templates the itinerary generator draws from.
pub const DAY_TEMPLATE_COUNT: usize = 7;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read {what} from {path:?}: {source}")]
    Io {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {what}: {reason}")]
    Invalid { what: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Catalog {
    destinations: Vec<Destination>,
    day_templates: Vec<DayItinerary>,
}

impl Catalog {
    /// The datasets compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_parts(
            parse_destinations(EMBEDDED_DESTINATIONS)?,
            parse_itinerary(EMBEDDED_ITINERARY)?,
        )
    }

    /// Embedded datasets, with any configured on-disk overrides swapped in.
    pub fn load(settings: &CatalogSettings) -> Result<Self, CatalogError> {
        let destinations = match settings.destinations_path.as_deref() {
            Some(path) => {
                info!(
                    "[PHASE: catalog] [STEP: load] Loading destinations override from {:?}",
                    path
                );
                parse_destinations(&read_file("destinations", path)?)?
            }
            None => parse_destinations(EMBEDDED_DESTINATIONS)?,
        };
        let day_templates = match settings.itinerary_path.as_deref() {
            Some(path) => {
                info!(
                    "[PHASE: catalog] [STEP: load] Loading itinerary override from {:?}",
                    path
                );
                parse_itinerary(&read_file("itinerary", path)?)?
            }
            None => parse_itinerary(EMBEDDED_ITINERARY)?,
        };
        Self::from_parts(destinations, day_templates)
    }

    pub fn from_parts(
        destinations: Vec<Destination>,
        day_templates: Vec<DayItinerary>,
    ) -> Result<Self, CatalogError> {
        validate_destinations(&destinations)?;
        validate_day_templates(&day_templates)?;
        info!(
            "[PHASE: catalog] [STEP: validate] Catalog ready (destinations={}, day_templates={})",
            destinations.len(),
            day_templates.len()
        );
        Ok(Self {
            destinations,
            day_templates,
        })
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn day_templates(&self) -> &[DayItinerary] {
        &self.day_templates
    }
}

fn read_file(what: &'static str, path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        what,
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_destinations(json: &str) -> Result<Vec<Destination>, CatalogError> {
    serde_json::from_str(json).map_err(|source| CatalogError::Parse {
        what: "destinations",
        source,
    })
}

pub fn parse_itinerary(json: &str) -> Result<Vec<DayItinerary>, CatalogError> {
    serde_json::from_str(json).map_err(|source| CatalogError::Parse {
        what: "itinerary",
        source,
    })
}

fn validate_destinations(destinations: &[Destination]) -> Result<(), CatalogError> {
    let invalid = |reason: String| CatalogError::Invalid {
        what: "destinations",
        reason,
    };

    let mut seen = HashSet::new();
    for d in destinations {
        if !seen.insert(d.id.as_str()) {
            return Err(invalid(format!("duplicate destination id '{}'", d.id)));
        }
        if d.match_score > 100 {
            return Err(invalid(format!(
                "matchScore {} for '{}' is outside 0-100",
                d.match_score, d.id
            )));
        }
        if let Some(s) = d.suggestions.iter().find(|s| s.popularity > 100) {
            return Err(invalid(format!(
                "popularity {} for suggestion '{}' is outside 0-100",
                s.popularity, s.id
            )));
        }
    }
    Ok(())
}

fn validate_day_templates(days: &[DayItinerary]) -> Result<(), CatalogError> {
    let invalid = |reason: String| CatalogError::Invalid {
        what: "itinerary",
        reason,
    };

    if days.len() != DAY_TEMPLATE_COUNT {
        return Err(invalid(format!(
            "expected {} day templates, found {}",
            DAY_TEMPLATE_COUNT,
            days.len()
        )));
    }
    for (idx, d) in days.iter().enumerate() {
        let expected = idx + 1;
        if usize::from(d.day) != expected {
            return Err(invalid(format!(
                "day template at position {} is numbered {} (expected {})",
                idx, d.day, expected
            )));
        }
    }

    let with_booking = days
        .iter()
        .flat_map(|d| d.activities())
        .filter(|(_, a)| a.booking_url.is_some())
        .count();
    if with_booking > 1 {
        return Err(invalid(format!(
            "at most one activity may carry a booking URL, found {}",
            with_booking
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn embedded_catalog_loads_and_validates() {
        let catalog = Catalog::embedded().expect("embedded catalog must be valid");
        assert_eq!(catalog.destinations().len(), 8);
        assert_eq!(catalog.day_templates().len(), DAY_TEMPLATE_COUNT);

        let scores: Vec<u8> = catalog.destinations().iter().map(|d| d.match_score).collect();
        assert_eq!(scores, vec![95, 92, 88, 96, 90, 85, 87, 89]);
    }

    #[test]
    fn embedded_itinerary_has_exactly_one_booking_link() {
        let catalog = Catalog::embedded().unwrap();
        let links: Vec<(u8, &str)> = catalog
            .day_templates()
            .iter()
            .flat_map(|d| {
                d.activities()
                    .filter_map(move |(_, a)| a.booking_url.as_deref().map(|u| (d.day, u)))
            })
            .collect();
        assert_eq!(links, vec![(1, "https://viator.tpk.mx/Xc1Z4LAB")]);
    }

    #[test]
    fn rejects_itinerary_with_wrong_day_count() {
        let mut days = parse_itinerary(EMBEDDED_ITINERARY).unwrap();
        days.pop();
        let err = Catalog::from_parts(parse_destinations(EMBEDDED_DESTINATIONS).unwrap(), days)
            .unwrap_err();
        assert!(
            err.to_string().contains("expected 7 day templates, found 6"),
            "unexpected error: {}",
            err
        );
    }

    #[test]
    fn rejects_out_of_order_days() {
        let mut days = parse_itinerary(EMBEDDED_ITINERARY).unwrap();
        days.swap(0, 1);
        let err = Catalog::from_parts(parse_destinations(EMBEDDED_DESTINATIONS).unwrap(), days)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { what: "itinerary", .. }));
    }

    #[test]
    fn rejects_duplicate_destination_ids() {
        let mut destinations = parse_destinations(EMBEDDED_DESTINATIONS).unwrap();
        destinations[1].id = destinations[0].id.clone();
        let err = Catalog::from_parts(destinations, parse_itinerary(EMBEDDED_ITINERARY).unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("duplicate destination id"));
    }

    #[test]
    fn rejects_out_of_range_match_score() {
        let mut destinations = parse_destinations(EMBEDDED_DESTINATIONS).unwrap();
        destinations[2].match_score = 101;
        let err = Catalog::from_parts(destinations, parse_itinerary(EMBEDDED_ITINERARY).unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("outside 0-100"));
    }

    #[test]
    fn rejects_second_booking_link() {
        let mut days = parse_itinerary(EMBEDDED_ITINERARY).unwrap();
        days[3].night.booking_url = Some("https://example.invalid/book".to_string());
        let err = Catalog::from_parts(parse_destinations(EMBEDDED_DESTINATIONS).unwrap(), days)
            .unwrap_err();
        assert!(err.to_string().contains("found 2"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse_destinations("[{\"id\": 1}]").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { what: "destinations", .. }));
    }

    #[test]
    fn load_reads_destination_override_from_disk() {
        let mut destinations = parse_destinations(EMBEDDED_DESTINATIONS).unwrap();
        destinations.truncate(3);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&destinations).unwrap().as_bytes())
            .unwrap();

        let settings = CatalogSettings {
            destinations_path: Some(file.path().to_path_buf()),
            itinerary_path: None,
        };
        let catalog = Catalog::load(&settings).unwrap();
        assert_eq!(catalog.destinations().len(), 3);
        assert_eq!(catalog.day_templates().len(), DAY_TEMPLATE_COUNT);
    }

    #[test]
    fn load_reports_missing_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = CatalogSettings {
            destinations_path: None,
            itinerary_path: Some(dir.path().join("missing.json")),
        };
        let err = Catalog::load(&settings).unwrap_err();
        assert!(matches!(err, CatalogError::Io { what: "itinerary", .. }));
    }
}
