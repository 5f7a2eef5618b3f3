use crate::domain::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the settings file location.
pub const SETTINGS_ENV: &str = "TCALC_SETTINGS";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings format - {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("No configuration directory available")]
    NoConfigDir,
}

/// User preferences that survive restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
}

#[derive(Debug)]
pub struct SettingsRepository {
    path: PathBuf,
}

impl SettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `$TCALC_SETTINGS`, falling back to `<config dir>/tcalc/settings.json`.
    pub fn from_env() -> Result<Self, PersistenceError> {
        if let Ok(path) = std::env::var(SETTINGS_ENV) {
            return Ok(Self::new(path));
        }
        let dir = dirs::config_dir().ok_or(PersistenceError::NoConfigDir)?;
        Ok(Self::new(dir.join("tcalc").join("settings.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file yields the defaults.
    pub fn load(&self) -> Result<Settings, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let repo = SettingsRepository::new(dir.path().join("settings.json"));
        assert_eq!(repo.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let repo = SettingsRepository::new(dir.path().join("nested").join("settings.json"));
        let settings = Settings { theme: Theme::Light };

        repo.save(&settings).unwrap();
        assert_eq!(repo.load().unwrap(), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{}").unwrap();

        let repo = SettingsRepository::new(&path);
        assert_eq!(repo.load().unwrap().theme, Theme::Dark);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let repo = SettingsRepository::new(&path);
        assert!(matches!(repo.load(), Err(PersistenceError::Json(_))));
    }
}
