use crate::config::Settings;
use anyhow::Result;
use std::path::PathBuf;

const LOCAL_FALLBACK_DIR: &str = "trip_planner_logs";

/// Log folder to use when settings do not name one.
pub fn default_log_folder() -> PathBuf {
    match dirs::data_local_dir() {
        Some(base) => base.join("trip-planner").join("logs"),
        None => std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(LOCAL_FALLBACK_DIR),
    }
}

/// Resolve log folder (created if missing)
pub fn resolve_log_folder(settings: &Settings) -> Result<PathBuf> {
    let log_dir = settings
        .log_dir
        .clone()
        .unwrap_or_else(default_log_folder);
    std::fs::create_dir_all(&log_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create log folder {:?}: {}", log_dir, e))?;
    Ok(log_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_folder_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("logs");
        let settings = Settings {
            log_dir: Some(target.clone()),
            ..Settings::default()
        };
        let resolved = resolve_log_folder(&settings).unwrap();
        assert_eq!(resolved, target);
        assert!(target.is_dir());
    }

    #[test]
    fn default_folder_is_app_specific() {
        let path = default_log_folder();
        assert!(
            path.ends_with("trip-planner/logs") || path.ends_with(LOCAL_FALLBACK_DIR),
            "unexpected default: {:?}",
            path
        );
    }
}
