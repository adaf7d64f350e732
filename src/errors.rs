//! Error handling for the LTR model trainer
//!
//! Every fatal condition of a run is one variant of [`LtrError`]. Declining
//! the overwrite prompt is not an error and never shows up here.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for a trainer run
#[derive(Error, Debug)]
pub enum LtrError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to launch trainer {}", .program.display())]
    TrainerLaunch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Trainer {} exited unsuccessfully: {status}", .program.display())]
    TrainerFailed { program: PathBuf, status: String },

    #[error("No data found in trainer result file {}", .path.display())]
    NoData { path: PathBuf },

    #[error("Malformed parameter token '{token}': {message}")]
    MalformedParameter { token: String, message: String },

    #[error("Insufficient parameters: expected {expected}, found {found}")]
    InsufficientParameters { expected: usize, found: usize },

    #[error("Failed to read overwrite confirmation")]
    Prompt {
        #[source]
        source: std::io::Error,
    },

    #[error("I/O operation failed: {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias used across the crate
pub type LtrResult<T> = Result<T, LtrError>;

impl LtrError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create a serialization error
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// Create a malformed parameter error
    pub fn malformed(token: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedParameter {
            token: token.into(),
            message: message.into(),
        }
    }

    pub fn insufficient(expected: usize, found: usize) -> Self {
        Self::InsufficientParameters { expected, found }
    }
}

/// Convert from serde_json errors
impl From<serde_json::Error> for LtrError {
    fn from(err: serde_json::Error) -> Self {
        LtrError::serialization("json_operation", err)
    }
}

/// Convert from std::io errors
impl From<std::io::Error> for LtrError {
    fn from(err: std::io::Error) -> Self {
        LtrError::io("io_operation", err)
    }
}
