//! Custom error types for prefs-backup
//!
//! This module defines the error hierarchy for the backup and restore flow
//! using thiserror. Leaf variants carry a message; `ExportFailed` and
//! `ImportFailed` wrap the cause that terminated the operation.

use thiserror::Error;

/// The main error type for prefs-backup operations
#[derive(Error, Debug)]
pub enum BackupError {
    /// The backup content is not a structurally valid envelope
    #[error("Malformed backup envelope: {0}")]
    MalformedEnvelope(String),

    /// The envelope was written by an incompatible format generation
    #[error("Unsupported backup format version: {found}")]
    UnsupportedFormatVersion { found: String },

    /// An export did not complete; no valid backup was produced
    #[error("Export failed: {0}")]
    ExportFailed(#[source] Box<BackupError>),

    /// An import did not complete
    #[error("Import failed: {0}")]
    ImportFailed(#[source] Box<BackupError>),

    /// A destination or source could not be opened as a stream
    #[error("Stream unavailable for '{target}': {reason}")]
    StreamUnavailable { target: String, reason: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Preference store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl BackupError {
    /// Wrap a cause as a failed export
    pub fn export_failed(cause: BackupError) -> Self {
        Self::ExportFailed(Box::new(cause))
    }

    /// Wrap a cause as a failed import
    pub fn import_failed(cause: BackupError) -> Self {
        Self::ImportFailed(Box::new(cause))
    }

    /// Create a "stream unavailable" error for a target
    pub fn stream_unavailable(target: impl Into<String>, reason: impl ToString) -> Self {
        Self::StreamUnavailable {
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a "not found" error for backup files
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Check if this error (or the cause it wraps) is a malformed envelope
    pub fn is_malformed(&self) -> bool {
        match self {
            Self::MalformedEnvelope(_) => true,
            Self::ExportFailed(cause) | Self::ImportFailed(cause) => cause.is_malformed(),
            _ => false,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for BackupError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BackupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for prefs-backup operations
pub type BackupResult<T> = Result<T, BackupError>;
