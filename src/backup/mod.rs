//! Backup system for prefs-backup
//!
//! Exports the live preference store into a versioned envelope and restores
//! it again.
//!
//! # Architecture
//!
//! - `BackupManager`: holds the store and host collaborators; export lives in
//!   `manager.rs`, import in `restore.rs`
//! - `naming`: default backup file names
//! - `catalog`: listing backups found in a directory
//!
//! # Flow
//!
//! Export reads the store's raw content (or `{}` if there is none), wraps it
//! with the format version, export time and producing app version, encodes it
//! and writes it to the destination. Import decodes a backup, overwrites the
//! store with the payload, then asks the preference model to reload (not as a
//! first load) and persist.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use prefs_backup::backup::BackupManager;
//! use prefs_backup::storage::{FilePreferenceStore, JsonPreferenceModel};
//! use prefs_backup::stream::FileStreamResolver;
//!
//! let store = FilePreferenceStore::new(paths.prefs_dir(), "florisboard-app-prefs");
//! let manager = BackupManager::new(store)
//!     .with_reloader(Arc::new(JsonPreferenceModel::new()));
//! let resolver = FileStreamResolver::new();
//!
//! manager.export_to(&resolver, &manager.default_file_name())?;
//! let result = manager.import_from(&resolver, "backup.json")?;
//! println!("{}", result.summary());
//! ```

pub mod catalog;
mod manager;
pub mod naming;
mod restore;

pub use catalog::{latest_backup, list_backups, BackupEntry};
pub use manager::BackupManager;
pub use naming::{format_backup_file_name, generate_backup_file_name, parse_backup_file_name};
pub use restore::{approximate_preference_count, inspect_backup, BackupInfo, RestoreResult};
