//! Logging setup: console output plus an optional daily rolling file.

use std::path::Path;
use std::str::FromStr;

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

const LOG_FILE_PREFIX: &str = "worktracker";

/// Parse a configured level name, defaulting to INFO.
pub fn parse_level(level: &str) -> Level {
    Level::from_str(&level.trim().to_lowercase()).unwrap_or(Level::INFO)
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the configured level. The returned guard flushes the file
/// writer on drop and must be kept alive for the whole program.
pub fn init(config: &LoggingConfig, log_dir: &Path) -> Option<WorkerGuard> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(parse_level(&config.level)).into())
        .from_env_lossy();

    let mut file_error = None;
    let (file_layer, guard) = if config.file {
        match RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .filename_suffix("log")
            .build(log_dir)
        {
            Ok(appender) => {
                let (writer, guard) = tracing_appender::non_blocking(appender);
                (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
            }
            Err(e) => {
                file_error = Some(e);
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        tracing::warn!("File logging disabled, cannot open {}: {}", log_dir.display(), e);
    }

    guard
}
