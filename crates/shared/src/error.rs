//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every failure the service can report falls into one of these kinds. The
/// message is the underlying cause; the `Display` impl adds the prefix that
/// ends up in the HTTP `detail` field.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required configuration is missing or malformed. Fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The remote blob write failed.
    #[error("Azure upload failed: {0}")]
    Storage(String),

    /// A local file could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// Anything else, e.g. a malformed multipart body.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Configuration(_) | Self::Storage(_) | Self::Io(_) | Self::Unexpected(_) => 500,
        }
    }

    /// Returns the error code used in logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Unexpected(_) => "UNEXPECTED_ERROR",
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an unexpected error.
    #[must_use]
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
