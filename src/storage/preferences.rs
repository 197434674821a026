//! In-memory preference model backed by a JSON object file

use std::path::PathBuf;
use std::sync::RwLock;

use log::{debug, info};
use serde_json::{Map, Value};

use crate::error::BackupError;

use super::file_io::{read_text, write_json_atomic, write_text_atomic};
use super::{PreferenceReloader, StoreHandle};

/// What the model last loaded
#[derive(Default)]
struct ModelState {
    path: Option<PathBuf>,
    /// File text as read; persisted verbatim so a reload never reformats it
    raw: Option<String>,
    data: Map<String, Value>,
}

/// Preferences held as a flat JSON object
///
/// On a first load with nothing on disk the model seeds itself from its
/// defaults; any later reload takes the file as-is.
pub struct JsonPreferenceModel {
    defaults: Map<String, Value>,
    state: RwLock<ModelState>,
}

impl JsonPreferenceModel {
    /// Create an empty model with no first-run defaults
    pub fn new() -> Self {
        Self::with_defaults(Map::new())
    }

    /// Create an empty model seeded from `defaults` on first load
    pub fn with_defaults(defaults: Map<String, Value>) -> Self {
        Self {
            defaults,
            state: RwLock::new(ModelState::default()),
        }
    }

    /// Get a preference value by key
    pub fn get(&self, key: &str) -> Result<Option<Value>, BackupError> {
        let state = self.state.read().map_err(|e| {
            BackupError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(state.data.get(key).cloned())
    }

    /// Number of preferences currently loaded
    pub fn len(&self) -> Result<usize, BackupError> {
        let state = self.state.read().map_err(|e| {
            BackupError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(state.data.len())
    }

    pub fn is_empty(&self) -> Result<bool, BackupError> {
        Ok(self.len()? == 0)
    }
}

impl Default for JsonPreferenceModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceReloader for JsonPreferenceModel {
    fn reload(&self, handle: &StoreHandle, is_first_load: bool) -> Result<(), BackupError> {
        let path = handle.path().to_path_buf();

        let (raw, data) = match read_text(&path)? {
            Some(text) => {
                let data: Map<String, Value> = serde_json::from_str(&text).map_err(|e| {
                    BackupError::Storage(format!("Failed to parse {}: {}", path.display(), e))
                })?;
                (Some(text), data)
            }
            None if is_first_load => {
                debug!("first load of '{}', seeding defaults", handle.name());
                (None, self.defaults.clone())
            }
            None => (None, Map::new()),
        };

        let mut state = self.state.write().map_err(|e| {
            BackupError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        info!("reloaded {} preferences from '{}'", data.len(), handle.name());
        *state = ModelState {
            path: Some(path),
            raw,
            data,
        };

        Ok(())
    }

    fn persist(&self) -> Result<(), BackupError> {
        let state = self.state.read().map_err(|e| {
            BackupError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let Some(path) = state.path.as_ref() else {
            return Err(BackupError::Storage(
                "Cannot persist preferences before they were loaded".into(),
            ));
        };

        match &state.raw {
            Some(raw) => write_text_atomic(path, raw),
            None => write_json_atomic(path, &state.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn defaults() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("theme".into(), json!("floris_day"));
        map
    }

    #[test]
    fn test_first_load_seeds_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let handle = StoreHandle::new("prefs", temp_dir.path().join("prefs.json"));
        let model = JsonPreferenceModel::with_defaults(defaults());

        model.reload(&handle, true).unwrap();

        assert_eq!(model.get("theme").unwrap(), Some(json!("floris_day")));
    }

    #[test]
    fn test_reload_skips_seeding() {
        let temp_dir = TempDir::new().unwrap();
        let handle = StoreHandle::new("prefs", temp_dir.path().join("prefs.json"));
        let model = JsonPreferenceModel::with_defaults(defaults());

        model.reload(&handle, false).unwrap();

        assert!(model.is_empty().unwrap());
    }

    #[test]
    fn test_reload_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"theme":"night","vibrate":true}"#).unwrap();
        let handle = StoreHandle::new("prefs", path);
        let model = JsonPreferenceModel::with_defaults(defaults());

        model.reload(&handle, true).unwrap();

        assert_eq!(model.len().unwrap(), 2);
        assert_eq!(model.get("theme").unwrap(), Some(json!("night")));
    }

    #[test]
    fn test_reload_rejects_non_object() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        let model = JsonPreferenceModel::new();

        assert!(model.reload(&StoreHandle::new("prefs", path), false).is_err());
    }

    #[test]
    fn test_persist_keeps_loaded_text_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        let contents = r#"{"z":"1","a":12345678901234567890123}"#;
        std::fs::write(&path, contents).unwrap();
        let handle = StoreHandle::new("prefs", path.clone());
        let model = JsonPreferenceModel::new();

        model.reload(&handle, false).unwrap();
        model.persist().unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), contents);
    }

    #[test]
    fn test_persist_writes_seeded_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        let handle = StoreHandle::new("prefs", path.clone());
        let model = JsonPreferenceModel::with_defaults(defaults());

        model.reload(&handle, true).unwrap();
        model.persist().unwrap();

        let written: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written, json!({"theme": "floris_day"}));
    }

    #[test]
    fn test_persist_before_load_fails() {
        let model = JsonPreferenceModel::new();
        assert!(model.persist().is_err());
    }
}
