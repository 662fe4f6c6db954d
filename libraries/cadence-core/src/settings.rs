//! Persistent player settings
//!
//! Settings are stored as key-value pairs with JSON values. Keys are namespaced
//! with a dotted prefix (`player.volume`).
//!
//! # Example
//!
//! ```rust
//! use cadence_core::settings::{MemorySettings, SettingsStore, SETTING_VOLUME};
//!
//! let mut settings = MemorySettings::new();
//! settings.set(SETTING_VOLUME, serde_json::json!(70)).unwrap();
//! assert_eq!(settings.get_i64(SETTING_VOLUME), Some(70));
//! ```

use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CoreError, Result};

/// Player volume (0-100)
pub const SETTING_VOLUME: &str = "player.volume";

/// Key-value settings store
pub trait SettingsStore: Send {
    /// Read a value
    fn get(&self, key: &str) -> Option<Value>;

    /// Write a value
    ///
    /// # Errors
    /// Returns an error if the value cannot be persisted.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Read an integer value
    fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|value| value.as_i64())
    }
}

/// In-memory settings, lost on drop
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: BTreeMap<String, Value>,
}

impl MemorySettings {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Settings persisted to a JSON file
///
/// The whole file is rewritten on every change.
#[derive(Debug, Clone)]
pub struct JsonFileSettings {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl JsonFileSettings {
    /// Open the store at `path`, starting empty if the file does not exist yet
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or is not a JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), keys = values.len(), "Opened settings file");
        Ok(Self { path, values })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, contents).map_err(|e| {
            CoreError::settings(format!("cannot write {}: {e}", self.path.display()))
        })
    }
}

impl SettingsStore for JsonFileSettings {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_settings_round_trip_values() {
        let mut settings = MemorySettings::new();
        assert_eq!(settings.get(SETTING_VOLUME), None);

        settings.set(SETTING_VOLUME, json!(42)).unwrap();
        assert_eq!(settings.get_i64(SETTING_VOLUME), Some(42));
    }

    #[test]
    fn json_file_settings_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = JsonFileSettings::open(&path).unwrap();
        settings.set(SETTING_VOLUME, json!(65)).unwrap();
        assert!(path.exists());

        let reopened = JsonFileSettings::open(&path).unwrap();
        assert_eq!(reopened.get_i64(SETTING_VOLUME), Some(65));
    }

    #[test]
    fn json_file_settings_reject_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            JsonFileSettings::open(&path),
            Err(CoreError::Serialization(_))
        ));
    }

    #[test]
    fn empty_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "").unwrap();

        let settings = JsonFileSettings::open(&path).unwrap();
        assert_eq!(settings.get(SETTING_VOLUME), None);
    }
}
