//! Error types for `squatcount`
//!
//! Tracker events never fail; errors only exist at the edges of a session:
//! configuration, tracker setup, recordings and the file system.
//!
//! Error variants use `#[source]` to preserve error chains.

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

/// Main error type for `squatcount`
#[derive(Debug, Error)]
pub enum SquatCountError {
    /// Tracker configuration failed validation
    #[error("Invalid tracker configuration: {0}")]
    InvalidConfig(String),

    /// Configuration or logging setup error
    /// Preserves the underlying error source for full error chain transparency
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The session already registered its listeners on a tracker
    #[error("Session is already attached to a tracker")]
    AlreadyAttached,

    /// The tracker refused the configuration it was given
    #[error("Tracker rejected configuration: {0}")]
    TrackerRejected(String),

    /// A recording line could not be parsed as a tracker event
    #[error("Malformed recording at line {line}: {source}")]
    RecordingParse {
        /// 1-based line number in the recording
        line: usize,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for `squatcount` operations
pub type Result<T> = std::result::Result<T, SquatCountError>;

/// Convert an error to a user-friendly message
///
/// The messages include a short troubleshooting hint.
pub fn get_user_friendly_error(error: &SquatCountError) -> String {
    match error {
        SquatCountError::InvalidConfig(reason) => {
            format!(
                "The tracker configuration is invalid:\n\n{reason}\n\n\
                 Fix the value in config.json or delete the file to restore defaults."
            )
        }
        SquatCountError::ConfigError(_) => "Failed to load or save configuration.\n\n\
             Your settings may not persist.\n\
             Check that SQUATCOUNT_HOME points to a writable directory."
            .to_string(),
        SquatCountError::AlreadyAttached => "This session is already connected to a tracker.\n\n\
             Start a new session to track another exercise."
            .to_string(),
        SquatCountError::TrackerRejected(reason) => {
            format!(
                "The pose tracker refused to start:\n\n{reason}\n\n\
                 Enable resetExercises to reconfigure a running tracker."
            )
        }
        SquatCountError::RecordingParse { line, .. } => {
            format!(
                "The recording could not be read (line {line}).\n\n\
                 Each line must hold one tracker event as JSON."
            )
        }
        SquatCountError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        SquatCountError::JsonError(e) => {
            format!(
                "Configuration file is corrupted:\n\n{e}\n\n\
                 The application will use default settings."
            )
        }
    }
}
