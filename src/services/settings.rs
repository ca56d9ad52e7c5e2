//! Persisted settings stored as a small JSON file

use std::{
    fs, io,
    path::PathBuf,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Errors raised while reading or writing the settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("settings file {path} is malformed: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Contents of the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Last dial position in seconds. Kept raw so a hand-edited value can
    /// be rejected by the dial instead of failing the whole file.
    #[serde(default)]
    pub last_position: Option<i64>,
}

/// Settings store backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonSettings {
    path: PathBuf,
}

impl JsonSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the settings; a missing file yields the defaults
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No settings file at {}, using defaults", self.path.display());
                return Ok(Settings::default());
            }
            Err(source) => return Err(self.io_error(source)),
        };

        serde_json::from_str(&contents).map_err(|source| SettingsError::Json {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings).map_err(|source| SettingsError::Json {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        fs::write(&self.path, json).map_err(|source| self.io_error(source))
    }

    /// Update only the dial position, keeping whatever else the file holds
    pub fn save_last_position(&self, total_seconds: u32) -> Result<(), SettingsError> {
        // A broken file is replaced rather than blocking persistence forever
        let mut settings = self.load().unwrap_or_default();
        settings.last_position = Some(i64::from(total_seconds));
        self.save(&settings)
    }

    fn io_error(&self, source: io::Error) -> SettingsError {
        SettingsError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettings::new(dir.path().join("settings.json"));
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_save_and_reload_position() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettings::new(dir.path().join("nested").join("settings.json"));
        store.save_last_position(1230).unwrap();
        assert_eq!(store.load().unwrap().last_position, Some(1230));
    }

    #[test]
    fn test_malformed_file_is_reported_then_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonSettings::new(&path);

        assert!(matches!(store.load(), Err(SettingsError::Json { .. })));
        store.save_last_position(60).unwrap();
        assert_eq!(store.load().unwrap().last_position, Some(60));
    }

    #[test]
    fn test_out_of_range_value_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"last_position": 99999}"#).unwrap();
        assert_eq!(JsonSettings::new(&path).load().unwrap().last_position, Some(99999));
    }
}
