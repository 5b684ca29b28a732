//! Error types for operational failures
//!
//! Malformed message data is not an error at this level: the decoder reports it
//! through [`Status`](crate::status::Status) so the partial tree survives.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ACR-NEMA operations
pub type Result<T> = std::result::Result<T, AcrError>;

/// Errors that stop a dump before any decoding happens
#[derive(Error, Debug)]
pub enum AcrError {
    #[error("Error opening file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Error in max group id ({0})")]
    InvalidMaxGroup(String),
}

impl AcrError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new max-group error echoing the rejected argument
    pub fn invalid_max_group(arg: impl Into<String>) -> Self {
        Self::InvalidMaxGroup(arg.into())
    }

    /// Create a new open error for the given path
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }
}
