//! Listing of exported backups in a directory

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::{BackupError, BackupResult};

use super::naming::parse_backup_file_name;

/// A backup file found on disk
#[derive(Debug, Clone)]
pub struct BackupEntry {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// Local time encoded in the filename
    pub created_at: NaiveDateTime,
    /// Size in bytes
    pub size_bytes: u64,
}

/// List backups in `dir`, newest first
///
/// Only files following the backup naming pattern are returned. A missing
/// directory has no backups.
pub fn list_backups(dir: &Path) -> BackupResult<Vec<BackupEntry>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut backups = Vec::new();

    for entry in fs::read_dir(dir)
        .map_err(|e| BackupError::Io(format!("Failed to read backup directory: {}", e)))?
    {
        let entry = entry
            .map_err(|e| BackupError::Io(format!("Failed to read directory entry: {}", e)))?;

        if let Some(backup) = parse_backup_entry(&entry.path()) {
            backups.push(backup);
        }
    }

    backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(backups)
}

/// Most recent backup in `dir`
pub fn latest_backup(dir: &Path) -> BackupResult<Option<BackupEntry>> {
    Ok(list_backups(dir)?.into_iter().next())
}

fn parse_backup_entry(path: &Path) -> Option<BackupEntry> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let created_at = parse_backup_file_name(&filename)?;

    let metadata = fs::metadata(path).ok()?;
    if !metadata.is_file() {
        return None;
    }

    Some(BackupEntry {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes: metadata.len(),
    })
}
