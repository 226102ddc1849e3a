//! Storage error types.

use std::path::PathBuf;

use blobrelay_shared::AppError;
use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage client could not be built from the configured credential.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// Remote write failed.
    #[error("storage operation failed: {0}")]
    Operation(String),

    /// Local file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an operation error.
    #[must_use]
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::ConfigInvalid => Self::Configuration(err.to_string()),
            _ => Self::Operation(err.to_string()),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io { .. } => Self::Io(err.to_string()),
            StorageError::Configuration(_) | StorageError::Operation(_) => {
                Self::Storage(err.to_string())
            }
        }
    }
}
