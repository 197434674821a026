//! Live preference store access
//!
//! The backup flow treats the application's preference store as an opaque
//! blob addressed by name. [`PreferenceStore`] covers raw read/write of that
//! blob; [`PreferenceReloader`] covers the application's in-memory model,
//! which is asked to re-read the blob after an import.

pub mod file_io;
pub mod file_store;
pub mod preferences;

use std::path::{Path, PathBuf};

pub use file_io::{read_json, read_text, write_json_atomic, write_text_atomic};
pub use file_store::FilePreferenceStore;
pub use preferences::JsonPreferenceModel;

use crate::error::BackupError;

/// Location of a named store's backing content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreHandle {
    name: String,
    path: PathBuf,
}

impl StoreHandle {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Raw access to the live preference store
pub trait PreferenceStore {
    /// Name of the store currently in use
    fn current_name(&self) -> String;

    /// Resolve the backing content for a store name
    fn locate(&self, name: &str) -> Result<StoreHandle, BackupError>;

    /// Read the full backing content, or `None` if nothing was saved yet
    fn read_all(&self, handle: &StoreHandle) -> Result<Option<String>, BackupError>;

    /// Replace the full backing content
    fn write_all(&self, handle: &StoreHandle, contents: &str) -> Result<(), BackupError>;
}

/// The application's in-memory preference model
pub trait PreferenceReloader {
    /// Re-read state from `handle`. `is_first_load` enables first-run seeding.
    fn reload(&self, handle: &StoreHandle, is_first_load: bool) -> Result<(), BackupError>;

    /// Write the in-memory state back out now
    fn persist(&self) -> Result<(), BackupError>;
}
