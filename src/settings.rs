//! Persisted settings snapshot.
//!
//! A flat JSON record of the fields worth keeping between sessions.
//! Loading is tolerant: an absent or corrupt snapshot yields defaults and a
//! log line, never an error the caller has to handle.

use crate::catalog::FontStyle;
use crate::config::{DEFAULT_BG_COLOR, DEFAULT_SAMPLE_TEXT, DEFAULT_SIZE_PX, DEFAULT_WEIGHT};
use crate::error::{AppError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// The persisted fields, in exactly the shape written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub left_id: Option<String>,
    pub right_id: Option<String>,
    pub background_color: String,
    pub weight: u16,
    pub style: FontStyle,
    pub size_px: u32,
    pub sample_text: String,
    pub favorites: BTreeSet<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            left_id: None,
            right_id: None,
            background_color: DEFAULT_BG_COLOR.to_string(),
            weight: DEFAULT_WEIGHT,
            style: FontStyle::Normal,
            size_px: DEFAULT_SIZE_PX,
            sample_text: DEFAULT_SAMPLE_TEXT.to_string(),
            favorites: BTreeSet::new(),
        }
    }
}

impl Settings {
    /// Reads a snapshot, falling back to defaults on any problem.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings at {}; using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                warn!("Failed to read settings at {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring corrupt settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Writes the snapshot.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .map_err(|e| AppError::Settings(format!("Failed to write {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("font-compare-settings-test-{}", name))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let path = temp_path("corrupt.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn partial_snapshot_fills_missing_fields() {
        let path = temp_path("partial.json");
        std::fs::write(&path, r#"{"leftId": "roboto", "sizePx": 64}"#).unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.left_id.as_deref(), Some("roboto"));
        assert_eq!(settings.size_px, 64);
        assert_eq!(settings.weight, DEFAULT_WEIGHT);
        assert_eq!(settings.sample_text, DEFAULT_SAMPLE_TEXT);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn saved_snapshot_loads_back() {
        let path = temp_path("roundtrip.json");
        let settings = Settings {
            left_id: Some("lato".to_string()),
            right_id: Some("poppins".to_string()),
            weight: 700,
            style: FontStyle::Italic,
            favorites: ["lato".to_string()].into_iter().collect(),
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        std::fs::remove_file(&path).ok();
    }
}
