//! Backup manager for prefs-backup
//!
//! Owns the collaborators the backup flow needs and implements export. The
//! import side lives in `restore.rs`.

use std::io::Write;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::envelope::{self, BackupEnvelope, EMPTY_PAYLOAD, UNKNOWN_PRODUCER_VERSION};
use crate::environment::{Clock, PackageVersion, SystemClock, VersionSource};
use crate::error::{BackupError, BackupResult};
use crate::storage::{PreferenceReloader, PreferenceStore};
use crate::stream::StreamResolver;

use super::naming::generate_backup_file_name;

/// Exports and imports the live preference store
///
/// Operations are not reentrant and take no locks; callers must not run an
/// export and an import against the same store at the same time.
pub struct BackupManager<S> {
    pub(super) store: S,
    version: Box<dyn VersionSource>,
    clock: Box<dyn Clock>,
    pub(super) reloader: Option<Arc<dyn PreferenceReloader>>,
}

impl<S: PreferenceStore> BackupManager<S> {
    /// Create a manager over `store` using the package version and system clock
    pub fn new(store: S) -> Self {
        Self {
            store,
            version: Box::new(PackageVersion),
            clock: Box::new(SystemClock),
            reloader: None,
        }
    }

    pub fn with_version_source(mut self, version: impl VersionSource + 'static) -> Self {
        self.version = Box::new(version);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Attach the in-memory preference model that import re-activates
    pub fn with_reloader(mut self, reloader: Arc<dyn PreferenceReloader>) -> Self {
        self.reloader = Some(reloader);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Default file name for a backup taken now
    pub fn default_file_name(&self) -> String {
        generate_backup_file_name(self.clock.as_ref())
    }

    /// Snapshot the live store into a fresh envelope
    pub fn capture(&self) -> BackupResult<BackupEnvelope> {
        let name = self.store.current_name();
        let handle = self.store.locate(&name)?;

        let payload = match self.store.read_all(&handle)? {
            Some(contents) => contents,
            None => {
                debug!("preference store '{}' has no content yet", name);
                EMPTY_PAYLOAD.to_string()
            }
        };

        let producer_version = match self.version.app_version() {
            Some(version) => version,
            None => {
                debug!("application version unavailable");
                UNKNOWN_PRODUCER_VERSION.to_string()
            }
        };

        let created_at = self.clock.now_utc().timestamp_millis();
        Ok(BackupEnvelope::new(created_at, producer_version, payload))
    }

    /// Export the live store to `destination`
    ///
    /// The destination is flushed and then dropped (closed) whether or not
    /// the export succeeds. On error, whatever was written must not be
    /// treated as a usable backup.
    pub fn export<W: Write>(&self, destination: W) -> BackupResult<()> {
        self.encode_backup()
            .and_then(|bytes| write_backup(destination, &bytes))
            .map_err(export_failed)
    }

    /// Resolve `target` through `resolver` and export to it
    ///
    /// The backup is encoded before the destination is opened, so a failed
    /// store read leaves nothing behind at `target`.
    pub fn export_to(&self, resolver: &dyn StreamResolver, target: &str) -> BackupResult<()> {
        let bytes = self.encode_backup().map_err(export_failed)?;
        let destination = resolver.open_writer(target)?;
        write_backup(destination, &bytes).map_err(export_failed)?;
        info!("exported preferences to {}", target);
        Ok(())
    }

    fn encode_backup(&self) -> BackupResult<Vec<u8>> {
        let envelope = self.capture()?;
        let bytes = envelope::encode(&envelope)?;
        debug!(
            "encoded {} byte backup (producer {})",
            bytes.len(),
            envelope.producer_version()
        );
        Ok(bytes)
    }
}

fn write_backup<W: Write>(mut destination: W, bytes: &[u8]) -> BackupResult<()> {
    destination
        .write_all(bytes)
        .map_err(|e| BackupError::Io(format!("Failed to write backup: {}", e)))?;
    destination
        .flush()
        .map_err(|e| BackupError::Io(format!("Failed to flush backup: {}", e)))
}

fn export_failed(cause: BackupError) -> BackupError {
    warn!("export failed: {}", cause);
    BackupError::export_failed(cause)
}
