//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to $SQUATCOUNT_HOME/squatcount.log.
//! Logs are rotated on startup, keeping one file per run for the last 10 runs.

use crate::config::ConfigManager;
use crate::error::{Result, SquatCountError};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Maximum number of historical log files to keep (squatcount.log.1 through squatcount.log.9)
const MAX_LOG_FILES: u8 = 9;

const LOG_PREFIX: &str = "squatcount";
const LOG_SUFFIX: &str = "log";

/// Initialize the logging system
///
/// Log level defaults to INFO but can be configured via `RUST_LOG` environment variable.
pub fn init_logging() -> Result<()> {
    let log_dir = ConfigManager::get_home_dir();
    std::fs::create_dir_all(&log_dir)?;
    rotate_logs_on_startup(&log_dir)?;

    // Rotation::NEVER: rotation is handled above, once per run
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix(LOG_SUFFIX)
        .build(&log_dir)
        .map_err(|e| SquatCountError::ConfigError(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| SquatCountError::ConfigError(Box::new(e)))?;

    tracing::info!("squatcount v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Path of a log file in `log_dir`
///
/// Generation 0 is the live log; generation `n` is the log of the n-th previous run.
fn log_file(log_dir: &Path, generation: u8) -> PathBuf {
    match generation {
        0 => log_dir.join(format!("{LOG_PREFIX}.{LOG_SUFFIX}")),
        n => log_dir.join(format!("{LOG_PREFIX}.{LOG_SUFFIX}.{n}")),
    }
}

/// Age every log in `log_dir` by one generation, dropping the oldest
///
/// The logger creates a fresh generation 0 afterwards.
fn rotate_logs_on_startup(log_dir: &Path) -> Result<()> {
    if !log_file(log_dir, 0).exists() {
        return Ok(());
    }

    let oldest = log_file(log_dir, MAX_LOG_FILES);
    if oldest.exists() {
        std::fs::remove_file(&oldest)?;
    }

    for generation in (0..MAX_LOG_FILES).rev() {
        let from = log_file(log_dir, generation);
        if from.exists() {
            std::fs::rename(&from, log_file(log_dir, generation + 1))?;
        }
    }

    Ok(())
}
