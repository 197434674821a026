use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use log::debug;

use prefs_backup::cli::{handle_backup_command, BackupCommands};
use prefs_backup::config::{paths::BackupPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "prefs-backup",
    author = "Kaylee Beyene",
    version,
    about = "Export and restore keyboard preferences",
    long_about = "prefs-backup wraps the live preference store into a versioned \
                  JSON backup that can be moved elsewhere and imported again, \
                  re-activating the imported values."
)]
struct Cli {
    /// Override the data directory
    #[arg(long, global = true, env = "PREFS_BACKUP_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Backup(BackupCommands),

    /// Show current configuration and paths
    Config {
        /// Set the name of the preference store to back up
        #[arg(long)]
        store_name: Option<String>,
    },
}

fn init_logger() {
    // RUST_LOG overrides, e.g. RUST_LOG=debug prefs-backup export
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        debug!("{:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => BackupPaths::with_base_dir(dir),
        None => BackupPaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Backup(cmd)) => {
            paths.ensure_directories()?;
            handle_backup_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Config { store_name }) => {
            if let Some(name) = store_name {
                settings.store_name = name;
                settings.save(&paths)?;
            }

            println!("prefs-backup Configuration");
            println!("==========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Datastore:        {}", paths.prefs_dir().display());
            println!(
                "Backup directory: {}",
                settings.effective_export_dir(&paths).display()
            );
            println!();
            println!("Settings:");
            println!("  Store name:          {}", settings.store_name);
            println!("  Reload after import: {}", settings.reload_after_import);
        }
        None => {
            println!("prefs-backup - export and restore keyboard preferences");
            println!();
            println!("Run 'prefs-backup --help' for usage information.");
        }
    }

    Ok(())
}
