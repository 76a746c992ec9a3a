// ABOUTME: Persisted user preferences (theme, language, role)
// ABOUTME: Three plain strings in a JSON file under the user config dir; defaults when absent

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Settings errors
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("No config directory available on this platform")]
    NoConfigDir,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// The three preference strings that survive a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preferences {
    pub theme: String,
    pub language: String,
    pub role: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            theme: "light".to_string(),
            language: "en".to_string(),
            role: "manager".to_string(),
        }
    }
}

impl Preferences {
    /// Default preferences file location
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(dir.join("crewboard").join("preferences.json"))
    }

    /// Load preferences from `path`, falling back to defaults when the
    /// file is missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(prefs) => prefs,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "malformed preferences, using defaults");
                    Preferences::default()
                }
            },
            Err(_) => Preferences::default(),
        }
    }

    /// Load from the default location
    pub fn load() -> Self {
        match Self::default_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Preferences::default(),
        }
    }

    /// Persist preferences to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!(path = %path.display(), "preferences saved");
        Ok(())
    }

    /// Persist to the default location
    pub fn save(&self) -> SettingsResult<()> {
        self.save_to(&Self::default_path()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load_from(&dir.path().join("nope.json"));
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let prefs = Preferences {
            theme: "dark".to_string(),
            language: "tr".to_string(),
            role: "teamLead".to_string(),
        };
        prefs.save_to(&path).unwrap();

        assert_eq!(Preferences::load_from(&path), prefs);
    }

    #[test]
    fn test_malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{not json").unwrap();

        assert_eq!(Preferences::load_from(&path), Preferences::default());
    }
}
