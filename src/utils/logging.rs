//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to `logs/launcher.log`
//! next to the settings file. Every startup rotates the previous session's
//! log, keeping up to [`MAX_LOG_FILES`] old sessions.

use crate::error::{LauncherError, Result, StringError};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Number of previous sessions kept (`launcher.log.1` through `launcher.log.9`)
pub const MAX_LOG_FILES: u8 = 9;

const LOG_FILE_PREFIX: &str = "launcher";
const LOG_FILE_SUFFIX: &str = "log";

/// Log directory for a settings file: `logs/` beside it
pub fn log_dir_for(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join("logs"),
        _ => PathBuf::from("logs"),
    }
}

/// Initialize the logging system writing into `log_dir`
///
/// Log level defaults to INFO but can be configured via `RUST_LOG` environment variable.
pub fn init_logging(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let log_path = log_dir.join(format!("{LOG_FILE_PREFIX}.{LOG_FILE_SUFFIX}"));
    rotate_logs_on_startup(&log_path, MAX_LOG_FILES)?;

    // Rotation happens above, once per session, so the appender never rolls
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(log_dir)
        .map_err(|e| LauncherError::Logging(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LauncherError::Logging(Box::new(e)))?;

    tracing::info!("Super Ball launcher v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Shift `launcher.log` to `launcher.log.1`, `.1` to `.2`, and so on
///
/// The file numbered `keep` is dropped. Missing files in the chain are
/// skipped, so gaps move up unchanged.
fn rotate_logs_on_startup(log_path: &Path, keep: u8) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path
        .parent()
        .ok_or_else(|| LauncherError::Logging(StringError::new("Invalid log path")))?;
    let log_name = log_path
        .file_name()
        .ok_or_else(|| LauncherError::Logging(StringError::new("Invalid log filename")))?
        .to_string_lossy();
    let numbered = |n: u8| log_dir.join(format!("{log_name}.{n}"));

    let oldest = numbered(keep);
    if oldest.exists() {
        std::fs::remove_file(&oldest)?;
    }

    for n in (1..keep).rev() {
        let current = numbered(n);
        if current.exists() {
            std::fs::rename(&current, numbered(n + 1))?;
        }
    }

    std::fs::rename(log_path, numbered(1))?;
    Ok(())
}
