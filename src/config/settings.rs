//! User settings for prefs-backup
//!
//! Persisted as `config.json` in the base directory. Every field has a
//! serde default so older or hand-edited files keep loading.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::BackupPaths;
use crate::error::BackupError;

/// Name of the preference store when nothing else is configured
pub const DEFAULT_STORE_NAME: &str = "florisboard-app-prefs";

/// User settings for prefs-backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Name of the live preference store to back up
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// Where `export` writes when no destination is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Whether import asks the preference model to reload and persist
    #[serde(default = "default_reload_after_import")]
    pub reload_after_import: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_store_name() -> String {
    DEFAULT_STORE_NAME.to_string()
}

fn default_reload_after_import() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            store_name: default_store_name(),
            export_dir: None,
            reload_after_import: default_reload_after_import(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BackupPaths) -> Result<Self, BackupError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                BackupError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BackupError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BackupPaths) -> Result<(), BackupError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            BackupError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            BackupError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Directory used for exports without an explicit destination
    pub fn effective_export_dir(&self, paths: &BackupPaths) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| paths.backup_dir())
    }
}
