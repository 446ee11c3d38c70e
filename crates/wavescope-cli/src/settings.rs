//! Settings file handling.
//!
//! Settings come from, in order: `--config <path>`, then
//! `<config dir>/wavescope/settings.json` if it exists, then defaults.
//! Command-line flags override whatever was loaded.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wavescope_core::{LoadLimits, TimeUnit};

/// Settings file name inside the per-user config directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// User-adjustable settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Size cap for loaded files.
    pub limits: LoadLimits,
    /// Unit marker values are entered in when `--unit` is not given.
    pub default_unit: TimeUnit,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            limits: LoadLimits::default(),
            default_unit: TimeUnit::Seconds,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
        Ok(settings)
    }

    /// Default per-user settings location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wavescope").join(SETTINGS_FILE))
    }

    /// Resolves settings from an explicit path, the user config, or defaults.
    pub fn load(explicit: Option<&str>, max_minutes: Option<u32>) -> Result<Self> {
        let mut settings = match explicit {
            Some(path) => Self::from_file(Path::new(path))?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    log::debug!("using settings from {}", path.display());
                    Self::from_file(&path)?
                }
                None => Self::default(),
            },
        };
        if let Some(minutes) = max_minutes {
            settings.limits.max_minutes = minutes;
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.limits.max_bytes(), 44_100 * 60 * 60);
        assert_eq!(settings.default_unit, TimeUnit::Seconds);
    }

    #[test]
    fn test_from_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{ "limits": { "max_minutes": 10 }, "default_unit": "milliseconds" }"#,
        )
        .unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.limits, LoadLimits::minutes(10));
        assert_eq!(settings.default_unit, TimeUnit::Milliseconds);
    }

    #[test]
    fn test_from_file_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Settings::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings file"));
    }

    #[test]
    fn test_load_explicit_with_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        std::fs::write(&path, r#"{ "limits": { "max_minutes": 10 } }"#).unwrap();

        let settings = Settings::load(path.to_str(), Some(2)).unwrap();
        assert_eq!(settings.limits.max_minutes, 2);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        assert!(Settings::load(Some("/nonexistent/wavescope.json"), None).is_err());
    }
}
