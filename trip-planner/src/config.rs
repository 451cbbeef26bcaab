// Layered settings
//
// defaults -> trip-planner.toml (or $TRIP_PLANNER_CONFIG) -> TRIP_PLANNER_* env vars

use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_CONFIG_FILE: &str = "trip-planner.toml";
pub const CONFIG_PATH_ENV: &str = "TRIP_PLANNER_CONFIG";
const ENV_PREFIX: &str = "TRIP_PLANNER";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid log level '{0}' (expected off, error, warn, info, debug or trace)")]
    InvalidLogLevel(String),
}

/// Optional on-disk replacements for the embedded datasets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub destinations_path: Option<PathBuf>,
    pub itinerary_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
    /// Mirror log lines to stdout in non-interactive modes.
    pub log_stdout: bool,
    pub catalog: CatalogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_dir: None,
            log_level: "debug".to_string(),
            log_stdout: false,
            catalog: CatalogSettings::default(),
        }
    }
}

impl Settings {
    /// Settings for the running process: config file (if any) plus environment.
    pub fn load() -> Result<Self, SettingsError> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_layered(Some(&path), true)
    }

    /// A missing file is not an error; a malformed one is.
    pub fn load_layered(path: Option<&Path>, include_env: bool) -> Result<Self, SettingsError> {
        let mut builder = config::Config::builder().set_default("log_level", "debug")?;

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }

        if include_env {
            builder = builder.add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            );
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.log_level_filter()?;
        Ok(settings)
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter, SettingsError> {
        LevelFilter::from_str(self.log_level.trim())
            .map_err(|_| SettingsError::InvalidLogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings =
            Settings::load_layered(Some(&dir.path().join("absent.toml")), false).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.log_level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn file_overrides_defaults() {
        let file = toml_file(
            r#"
log_dir = "/tmp/trip-logs"
log_level = "warn"
log_stdout = true

[catalog]
destinations_path = "/srv/data/destinations.json"
"#,
        );
        let settings = Settings::load_layered(Some(file.path()), false).unwrap();
        assert_eq!(settings.log_dir, Some(PathBuf::from("/tmp/trip-logs")));
        assert_eq!(settings.log_level_filter().unwrap(), LevelFilter::Warn);
        assert!(settings.log_stdout);
        assert_eq!(
            settings.catalog.destinations_path,
            Some(PathBuf::from("/srv/data/destinations.json"))
        );
        assert_eq!(settings.catalog.itinerary_path, None);
    }

    #[test]
    fn rejects_unknown_log_level() {
        let file = toml_file("log_level = \"chatty\"\n");
        let err = Settings::load_layered(Some(file.path()), false).unwrap_err();
        assert!(
            matches!(err, SettingsError::InvalidLogLevel(ref l) if l == "chatty"),
            "unexpected error: {}",
            err
        );
    }

    #[test]
    fn malformed_file_is_a_load_error() {
        let file = toml_file("log_level = [unterminated\n");
        let err = Settings::load_layered(Some(file.path()), false).unwrap_err();
        assert!(matches!(err, SettingsError::Load(_)), "unexpected error: {}", err);
    }
}
