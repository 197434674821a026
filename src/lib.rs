//! prefs-backup - portable backups of a keyboard preference store
//!
//! The application keeps its live configuration in one key-value file. This
//! crate exports that file's raw contents inside a small versioned JSON
//! envelope and imports such envelopes back, re-activating the restored
//! values.
//!
//! # Architecture
//!
//! - `envelope`: the backup format and its encode/decode
//! - `backup`: export/import orchestration, file naming, backup listing
//! - `storage`: the live preference store and in-memory model collaborators
//! - `stream`: turning destinations/sources into byte streams
//! - `environment`: application version and clock collaborators
//! - `config`: paths and settings
//! - `error`: custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use prefs_backup::backup::BackupManager;
//! use prefs_backup::config::{paths::BackupPaths, settings::Settings};
//! use prefs_backup::storage::FilePreferenceStore;
//!
//! let paths = BackupPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = FilePreferenceStore::new(paths.prefs_dir(), settings.store_name);
//! let manager = BackupManager::new(store);
//!
//! let mut out = Vec::new();
//! manager.export(&mut out)?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod envelope;
pub mod environment;
pub mod error;
pub mod storage;
pub mod stream;

pub use error::{BackupError, BackupResult};
