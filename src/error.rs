//! Error types for Onomo
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// All error types that can occur in Onomo
#[derive(Debug, Error)]
pub enum OnomoError {
    /// A config file value failed its validator
    #[error("invalid value '{value}' for option '{option}' in config file {}: {reason}", .path.display())]
    FileValue {
        option: String,
        value: String,
        path: PathBuf,
        reason: String,
    },

    /// Config file is not well-formed
    #[error("malformed config file {} at line {line}: {message}", .path.display())]
    ConfigParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Sound clip missing or not a usable WAV file
    #[error("error loading audio file \"{}\": {reason}", .path.display())]
    AudioLoad { path: PathBuf, reason: String },

    /// A schema value did not match the field it was assigned to
    #[error("option '{0}' produced a value of the wrong type")]
    TypeMismatch(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Onomo operations
pub type Result<T> = std::result::Result<T, OnomoError>;
