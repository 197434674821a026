//! File-backed preference store
//!
//! Each named store is a single JSON file `<dir>/<name>.json`.

use std::path::PathBuf;

use log::debug;

use crate::error::BackupError;

use super::file_io::{read_text, write_text_atomic};
use super::{PreferenceStore, StoreHandle};

/// Preference store keeping one file per store name in a directory
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    dir: PathBuf,
    current_name: String,
}

impl FilePreferenceStore {
    /// Create a store rooted at `dir` whose active store is `current_name`
    pub fn new(dir: PathBuf, current_name: impl Into<String>) -> Self {
        Self {
            dir,
            current_name: current_name.into(),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn current_name(&self) -> String {
        self.current_name.clone()
    }

    fn locate(&self, name: &str) -> Result<StoreHandle, BackupError> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(BackupError::Storage(format!(
                "Invalid preference store name: '{}'",
                name
            )));
        }

        let path = self.dir.join(format!("{}.json", name));
        debug!("located preference store '{}' at {}", name, path.display());
        Ok(StoreHandle::new(name, path))
    }

    fn read_all(&self, handle: &StoreHandle) -> Result<Option<String>, BackupError> {
        read_text(handle.path())
    }

    fn write_all(&self, handle: &StoreHandle, contents: &str) -> Result<(), BackupError> {
        write_text_atomic(handle.path(), contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FilePreferenceStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FilePreferenceStore::new(temp_dir.path().join("datastore"), "prefs");
        (store, temp_dir)
    }

    #[test]
    fn test_locate_uses_name() {
        let (store, temp) = create_test_store();

        let handle = store.locate(&store.current_name()).unwrap();
        assert_eq!(handle.name(), "prefs");
        assert_eq!(handle.path(), temp.path().join("datastore").join("prefs.json"));
    }

    #[test]
    fn test_locate_rejects_path_names() {
        let (store, _temp) = create_test_store();

        assert!(store.locate("../escape").is_err());
        assert!(store.locate("").is_err());
        assert!(store.locate("..").is_err());
    }

    #[test]
    fn test_read_missing_store() {
        let (store, _temp) = create_test_store();

        let handle = store.locate("prefs").unwrap();
        assert!(store.read_all(&handle).unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let (store, _temp) = create_test_store();
        let handle = store.locate("prefs").unwrap();

        store.write_all(&handle, r#"{"theme":"dark"}"#).unwrap();

        assert_eq!(
            store.read_all(&handle).unwrap().as_deref(),
            Some(r#"{"theme":"dark"}"#)
        );
    }
}
