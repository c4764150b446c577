//! Unified error hierarchy for liftrs
//!
//! The statistics and streak engine is total over its input and never
//! returns these errors. They cover the edges around it: loading
//! configuration, muscle maps and session exports, and validating
//! arguments handed in by the command line.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all liftrs operations
#[derive(Debug, Error)]
pub enum LiftError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input (session exports, muscle maps)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input file loading errors
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid caller-supplied argument
    #[error("Invalid argument {name}={value}: {reason}")]
    InvalidArgument {
        name: String,
        value: String,
        reason: String,
    },
}

/// Errors raised while reading data files into the engine's types
#[derive(Debug, Error)]
pub enum InputError {
    /// File not found at specified path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// File could be read but its contents are not the expected shape
    #[error("Invalid contents in {path}: {reason}")]
    InvalidContents { path: PathBuf, reason: String },
}

impl From<toml::de::Error> for LiftError {
    fn from(err: toml::de::Error) -> Self {
        LiftError::Configuration(err.to_string())
    }
}

impl From<toml::ser::Error> for LiftError {
    fn from(err: toml::ser::Error) -> Self {
        LiftError::Configuration(err.to_string())
    }
}

/// Result type alias for liftrs operations
pub type Result<T> = std::result::Result<T, LiftError>;

impl LiftError {
    /// Shorthand for an [`LiftError::InvalidArgument`]
    pub fn invalid_argument(
        name: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        LiftError::InvalidArgument {
            name: name.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LiftError::Input(InputError::FileNotFound { .. }) => ErrorSeverity::Warning,
            LiftError::InvalidArgument { .. } => ErrorSeverity::Warning,
            LiftError::Configuration(_) => ErrorSeverity::Error,
            LiftError::Json(_) => ErrorSeverity::Error,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            LiftError::Input(InputError::FileNotFound { path }) => {
                format!("Could not find data file: {}", path.display())
            }
            LiftError::Json(err) => {
                format!("Data file is not valid workout JSON: {}", err)
            }
            LiftError::InvalidArgument { name, reason, .. } => {
                format!("Please check --{}: {}", name, reason)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}
