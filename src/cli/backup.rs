//! Backup CLI commands
//!
//! Implements the export/import/inspect/list commands.

use std::sync::Arc;

use clap::Subcommand;

use crate::backup::{self, BackupManager};
use crate::config::paths::BackupPaths;
use crate::config::settings::Settings;
use crate::error::{BackupError, BackupResult};
use crate::storage::{FilePreferenceStore, JsonPreferenceModel};
use crate::stream::{FileStreamResolver, StreamResolver, STDIO_TARGET};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Export the live preferences to a backup file
    Export {
        /// Destination file ('-' for stdout). Defaults to a timestamped
        /// file in the backup directory
        destination: Option<String>,
    },

    /// Import preferences from a backup file
    Import {
        /// Backup file, name in the backup directory, 'latest', or '-' for stdin
        source: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show information about a backup without importing it
    Inspect {
        /// Backup file, name in the backup directory, or 'latest'
        source: String,
    },

    /// List backups in the backup directory
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &BackupPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> BackupResult<()> {
    let store = FilePreferenceStore::new(paths.prefs_dir(), settings.store_name.clone());
    let mut manager = BackupManager::new(store);
    if settings.reload_after_import {
        manager = manager.with_reloader(Arc::new(JsonPreferenceModel::new()));
    }

    let backup_dir = settings.effective_export_dir(paths);
    let resolver = FileStreamResolver::with_base_dir(backup_dir.clone());

    match cmd {
        BackupCommands::Export { destination } => {
            let target = destination.unwrap_or_else(|| manager.default_file_name());
            manager.export_to(&resolver, &target)?;

            if target != STDIO_TARGET {
                eprintln!("Backup created: {}", resolver.resolve_path(&target).display());
            }
        }

        BackupCommands::Import { source, force } => {
            let source = resolve_backup_source(&resolver, &backup_dir, &source)?;

            if !force {
                if source == STDIO_TARGET {
                    println!("Importing from stdin requires --force.");
                    return Ok(());
                }

                let info = backup::inspect_backup(&mut resolver.open_reader(&source)?)?;
                println!("Backup Information");
                println!("==================");
                println!("File: {}", resolver.resolve_path(&source).display());
                println!("{}", info.summary());
                println!();
                println!(
                    "WARNING: This will overwrite the '{}' preferences!",
                    settings.store_name
                );
                println!("To proceed, run again with --force flag:");
                println!("  prefs-backup import {} --force", source);
                return Ok(());
            }

            // Keep the current preferences before replacing them
            let pre_import = manager.default_file_name();
            if resolver.resolve_path(&pre_import) != resolver.resolve_path(&source) {
                manager.export_to(&resolver, &pre_import)?;
                println!("Pre-import backup saved: {}", pre_import);
            }

            let result = manager.import_from(&resolver, &source)?;
            println!("Import complete!");
            println!("{}", result.summary());
        }

        BackupCommands::Inspect { source } => {
            let source = resolve_backup_source(&resolver, &backup_dir, &source)?;
            let info = backup::inspect_backup(&mut resolver.open_reader(&source)?)?;

            println!("Backup Details");
            println!("==============");
            println!("File:             {}", resolver.resolve_path(&source).display());
            println!("Format version:   {}", info.format_version);
            println!("Producer version: {}", info.producer_version);
            println!(
                "Created:          {}",
                info.created_at
                    .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                    .unwrap_or_else(|| "unknown".to_string())
            );
            println!("Payload size:     {}", format_size(info.payload_bytes as u64));
            println!("Preferences:      ~{} (estimate)", info.approximate_count);
        }

        BackupCommands::List { verbose } => {
            let backups = backup::list_backups(&backup_dir)?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: prefs-backup export");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            for (i, entry) in backups.iter().enumerate() {
                if verbose {
                    println!(
                        "{}. {}\n   Created: {}\n   Size: {}\n",
                        i + 1,
                        entry.filename,
                        entry.created_at.format("%Y-%m-%d %H:%M:%S"),
                        format_size(entry.size_bytes),
                    );
                } else {
                    println!(
                        "  {}. {} ({})",
                        i + 1,
                        entry.filename,
                        format_size(entry.size_bytes),
                    );
                }
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }
    }

    Ok(())
}

/// Resolve a backup identifier to something the resolver can open
fn resolve_backup_source(
    resolver: &FileStreamResolver,
    backup_dir: &std::path::Path,
    source: &str,
) -> BackupResult<String> {
    if source == STDIO_TARGET {
        return Ok(source.to_string());
    }

    if source.eq_ignore_ascii_case("latest") {
        return backup::latest_backup(backup_dir)?
            .map(|entry| entry.path.display().to_string())
            .ok_or_else(|| BackupError::backup_not_found("latest"));
    }

    // Plain paths first, then names inside the backup directory
    if std::path::Path::new(source).exists() || resolver.resolve_path(source).exists() {
        return Ok(source.to_string());
    }

    let with_ext = format!("{}.json", source);
    if resolver.resolve_path(&with_ext).exists() {
        return Ok(with_ext);
    }

    Err(BackupError::backup_not_found(source))
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(17), "17 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_resolve_backup_source() {
        let temp_dir = TempDir::new().unwrap();
        let resolver = FileStreamResolver::with_base_dir(temp_dir.path().to_path_buf());
        let name = "florisboard_settings_2024-01-02_03-04-05";
        std::fs::write(temp_dir.path().join(format!("{}.json", name)), "{}").unwrap();

        assert_eq!(
            resolve_backup_source(&resolver, temp_dir.path(), name).unwrap(),
            format!("{}.json", name)
        );
        assert!(resolve_backup_source(&resolver, temp_dir.path(), "latest")
            .unwrap()
            .ends_with(&format!("{}.json", name)));
        assert_eq!(resolve_backup_source(&resolver, temp_dir.path(), "-").unwrap(), "-");
        assert!(resolve_backup_source(&resolver, temp_dir.path(), "missing")
            .unwrap_err()
            .is_not_found());
    }
}
