//! Backup restoration for prefs-backup
//!
//! Handles importing a backup into the live preference store and inspecting
//! backups without applying them.

use std::io::Read;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::envelope::{self, BackupEnvelope};
use crate::error::{BackupError, BackupResult};
use crate::storage::{PreferenceStore, StoreHandle};
use crate::stream::StreamResolver;

use super::manager::BackupManager;

impl<S: PreferenceStore> BackupManager<S> {
    /// Import a backup from `source`, replacing the live store's content
    ///
    /// The source is read to the end but not closed; its lifetime belongs to
    /// the caller. Nothing is modified unless the backup decodes cleanly.
    pub fn import<R: Read + ?Sized>(&self, source: &mut R) -> BackupResult<RestoreResult> {
        let envelope = read_envelope(source).map_err(BackupError::import_failed)?;

        let handle = self
            .store
            .locate(&self.store.current_name())
            .map_err(BackupError::import_failed)?;

        self.store
            .write_all(&handle, envelope.payload())
            .map_err(|e| {
                warn!("failed to overwrite preference store '{}': {}", handle.name(), e);
                BackupError::import_failed(e)
            })?;

        info!(
            "restored preference store '{}' from backup (producer {})",
            handle.name(),
            envelope.producer_version()
        );

        let reloaded = self.reactivate(&handle);

        Ok(RestoreResult {
            backup: BackupInfo::from_envelope(&envelope),
            reloaded,
        })
    }

    /// Resolve `source` through `resolver` and import from it
    pub fn import_from(
        &self,
        resolver: &dyn StreamResolver,
        source: &str,
    ) -> BackupResult<RestoreResult> {
        let mut reader = resolver.open_reader(source)?;
        self.import(&mut reader)
    }

    /// Ask the attached preference model to re-read the store, then persist
    ///
    /// Returns whether the model was reloaded. A missing model or a failing
    /// reload does not fail the import: the new content is already in place
    /// and is picked up on the next regular load.
    ///
    /// Persist is only requested after a successful reload. Persisting a model
    /// that failed to reload would write its stale state over the imported
    /// content.
    fn reactivate(&self, handle: &StoreHandle) -> bool {
        let Some(reloader) = &self.reloader else {
            debug!("no preference model attached, skipping reload");
            return false;
        };

        if let Err(e) = reloader.reload(handle, false) {
            warn!("preference reload after import failed: {}", e);
            return false;
        }

        if let Err(e) = reloader.persist() {
            warn!("preference persist after import failed: {}", e);
        }

        true
    }
}

/// Decode a backup from `source` without applying it
pub fn inspect_backup<R: Read + ?Sized>(source: &mut R) -> BackupResult<BackupInfo> {
    read_envelope(source).map(|envelope| BackupInfo::from_envelope(&envelope))
}

fn read_envelope<R: Read + ?Sized>(source: &mut R) -> BackupResult<BackupEnvelope> {
    let mut contents = Vec::new();
    source
        .read_to_end(&mut contents)
        .map_err(|e| BackupError::Io(format!("Failed to read backup: {}", e)))?;

    envelope::decode(&contents)
}

/// Estimate how many preferences a payload holds
///
/// This counts `"` characters and divides by four, assuming every entry is a
/// quoted key with a quoted value. It is only an estimate for user feedback
/// and must not be used to verify a restore.
pub fn approximate_preference_count(payload: &str) -> usize {
    payload.chars().filter(|&c| c == '"').count() / 4
}

/// Metadata of a decoded backup
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Envelope format version
    pub format_version: String,
    /// Version of the application that wrote the backup
    pub producer_version: String,
    /// When the backup was created
    pub created_at: Option<DateTime<Utc>>,
    /// Size of the payload in bytes
    pub payload_bytes: usize,
    /// Approximate number of preferences in the payload
    pub approximate_count: usize,
}

impl BackupInfo {
    fn from_envelope(envelope: &BackupEnvelope) -> Self {
        Self {
            format_version: envelope.format_version().to_string(),
            producer_version: envelope.producer_version().to_string(),
            created_at: envelope.created_at_utc(),
            payload_bytes: envelope.payload().len(),
            approximate_count: approximate_preference_count(envelope.payload()),
        }
    }

    /// Get a one-line description of the backup
    pub fn summary(&self) -> String {
        let created = self
            .created_at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "unknown date".to_string());

        format!(
            "Backup v{} from {} (app {}), ~{} preferences",
            self.format_version, created, self.producer_version, self.approximate_count
        )
    }
}

/// Result of an import
#[derive(Debug, Clone)]
pub struct RestoreResult {
    /// The backup that was applied
    pub backup: BackupInfo,
    /// Whether the in-memory preference model was reloaded
    pub reloaded: bool,
}

impl RestoreResult {
    /// Approximate number of restored preferences
    pub fn approximate_count(&self) -> usize {
        self.backup.approximate_count
    }

    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        let mut summary = format!("Restored ~{} preferences", self.approximate_count());
        if !self.reloaded {
            summary.push_str(" (active on next load)");
        }
        summary
    }
}
