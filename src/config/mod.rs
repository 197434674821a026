//! Configuration module for prefs-backup
//!
//! This module provides configuration management including:
//! - Path resolution for the datastore, backups and settings
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BackupPaths;
pub use settings::Settings;
