//! Error types for the Super Ball launcher
//!
//! This module defines all error types used throughout the launcher,
//! providing clear error messages and proper error propagation.
//!
//! Only two kinds ever reach the user: a missing game file and a failed
//! browser hand-off. Settings load/save failures are recovered where they
//! happen and only logged.

use std::path::PathBuf;
use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for the launcher
#[derive(Debug, Error)]
pub enum LauncherError {
    /// Settings document could not be read or parsed
    #[error("Failed to load settings from {}: {source}", .path.display())]
    ConfigLoad {
        /// Backing file of the settings document
        path: PathBuf,
        /// Underlying read or parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Settings document could not be written
    #[error("Failed to save settings to {}: {source}", .path.display())]
    ConfigSave {
        /// Backing file of the settings document
        path: PathBuf,
        /// Underlying write failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The resolved game file does not exist
    #[error("Game file not found: {}", .0.display())]
    GameFileNotFound(PathBuf),

    /// The browser/default handler refused to open the game file
    /// Preserves the underlying error source for full error chain transparency
    #[error("Failed to launch game: {0}")]
    LaunchOpen(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A user-supplied choice (language, version, theme, ...) is not recognised
    #[error("Invalid {kind}: {value}")]
    InvalidValue {
        /// Which setting was being parsed
        kind: &'static str,
        /// The rejected input
        value: String,
    },

    /// Timestamp formatting failed
    #[error("Timestamp formatting error: {0}")]
    Timestamp(#[from] time::error::Format),

    /// Logging system could not be installed
    #[error("Logging initialization failed: {0}")]
    Logging(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for launcher operations
pub type Result<T> = std::result::Result<T, LauncherError>;

/// Convert an error to a user-friendly message
///
/// Returns the single message shown to the user for a failed operation.
pub fn get_user_friendly_error(error: &LauncherError) -> String {
    match error {
        LauncherError::GameFileNotFound(path) => format!(
            "Game file not found:\n{}\n\nPlease check the file path in settings.",
            path.display()
        ),
        LauncherError::LaunchOpen(source) => format!("Failed to launch game:\n{source}"),
        LauncherError::ConfigLoad { .. } => "Failed to load settings.\n\n\
             Default settings are being used."
            .to_string(),
        LauncherError::ConfigSave { path, .. } => format!(
            "Failed to save settings.\n\n\
             Your changes may not persist.\n\
             Check that you have write permissions to:\n{}",
            path.display()
        ),
        LauncherError::InvalidValue { kind, value } => {
            format!("Unknown {kind}: {value}")
        }
        LauncherError::Timestamp(e) => format!("Could not record the play time:\n\n{e}"),
        LauncherError::Logging(e) => format!("Could not start the log file:\n\n{e}"),
        LauncherError::Io(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        LauncherError::Json(e) => {
            format!(
                "Settings file is corrupted:\n\n{e}\n\n\
                 The launcher will use default settings."
            )
        }
    }
}
