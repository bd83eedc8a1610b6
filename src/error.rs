//! Error types with actionable diagnostics.
//!
//! Every stage of the workbench reports failures through [`Error`]. A
//! failing stage never mutates the session it was called on, so callers can
//! report the error and retry.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rescate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, preprocessing, training or scoring.
#[derive(Error, Debug)]
pub enum Error {
    /// A required input (training file, test rows) was not provided.
    #[error("Missing input: {0}\n  → Provide the file in the config or on the command line")]
    InputMissing(String),

    /// The CSV reader could not parse a file.
    #[error("Failed to parse {path}: {message}")]
    ParseFailure { path: PathBuf, message: String },

    /// No usable rows remained after feature validity filtering.
    #[error("No valid rows after preprocessing: {0}")]
    EmptyInput(String),

    /// An operation was invoked before the stage it depends on completed.
    #[error("{0}")]
    Precondition(String),

    /// A single row could not be repaired. Recovered locally by `repair_all`.
    #[error("Row repair failed: {0}")]
    RepairFailure(String),

    /// Tensor or weight shapes disagree.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch { expected: Vec<usize>, actual: Vec<usize> },

    /// Configuration could not be read, parsed or validated.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File system failure with context.
    #[error("IO error: {0}")]
    Io(String),

    /// JSON/YAML encoding or decoding failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Whether the user can fix this by changing inputs or invocation order.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InputMissing(_)
                | Self::ParseFailure { .. }
                | Self::EmptyInput(_)
                | Self::Precondition(_)
                | Self::ConfigError(_)
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
