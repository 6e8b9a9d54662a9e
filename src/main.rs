//! WorkTracker - desktop attendance tracking per employee and day.

use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use eframe::egui;
use worktracker as app;

use app::config::{AppConfig, ConfigLoadResult};
use app::store::{AttendanceStore, FileStorage};
use app::ui::App;

/// Desktop attendance tracker.
#[derive(Parser)]
#[command(name = "worktracker")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Path to a config file (overrides --dev)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding the attendance data (overrides the config)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

/// Outcome of config loading, logged once the subscriber is installed.
enum ConfigStatus {
    Loaded,
    Created,
    NotCreated(String),
    Invalid(String),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = match (&cli.config, cli.dev) {
        (Some(path), _) => path.clone(),
        (None, true) => PathBuf::from("config.toml"),
        (None, false) => AppConfig::default_path(),
    };

    let (mut config, config_status) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => (config, ConfigStatus::Loaded),
        ConfigLoadResult::Missing => match AppConfig::write_default(&config_path) {
            Ok(config) => (config, ConfigStatus::Created),
            Err(e) => (AppConfig::default(), ConfigStatus::NotCreated(e.to_string())),
        },
        ConfigLoadResult::Invalid(e) => (AppConfig::default(), ConfigStatus::Invalid(e.to_string())),
    };

    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.display().to_string();
    }

    let data_dir = config.storage.resolved_data_dir();

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = app::logging::init(&config.logging, &data_dir.join("logs"));

    tracing::info!("WorkTracker starting...");
    tracing::info!("Config path: {:?}", config_path);
    let config_error = match config_status {
        ConfigStatus::Loaded => {
            tracing::info!("Config loaded successfully");
            None
        }
        ConfigStatus::Created => {
            tracing::info!("Config missing, wrote defaults");
            None
        }
        ConfigStatus::NotCreated(e) => {
            tracing::warn!("Config missing and defaults could not be written: {}", e);
            None
        }
        ConfigStatus::Invalid(e) => {
            tracing::warn!("Config invalid: {}", e);
            Some(e)
        }
    };

    let data_file = config.storage.data_file();
    tracing::info!("Data file: {:?}", data_file);

    let store = AttendanceStore::open(FileStorage::new(&data_file))
        .map_err(|e| anyhow!("Failed to open attendance data at {}: {e}", data_file.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("WorkTracker")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "WorkTracker",
        options,
        Box::new(|cc| Ok(Box::new(App::new(cc, store, config, config_error)))),
    )
    .map_err(|e| anyhow!("Failed to run the window: {e}"))
}
