//! Error types for the bookhunt plugin.
//!
//! [`BookhuntError`] covers everything that can go wrong inside the plugin
//! process (storage, configuration, themes), while [`FetchError`] describes a
//! failed round trip to the Open Library API. Fetch errors are always
//! recoverable: the caller keeps its previous state and may retry by hand.

use serde::Serialize;
use thiserror::Error;

/// A failed catalog or work lookup.
///
/// Every variant is retryable; nothing in the plugin retries automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum FetchError {
    /// The host could not reach the API (no status was received).
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered with a non-success status code.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether issuing the same request again may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        true
    }
}

/// The main error type for plugin operations.
///
/// # Examples
///
/// ```
/// use bookhunt::domain::BookhuntError;
///
/// fn read_storage() -> Result<(), BookhuntError> {
///     Err(BookhuntError::Storage("Failed to read file".to_string()))
/// }
/// assert!(read_storage().is_err());
/// ```
#[derive(Debug, Error)]
pub enum BookhuntError {
    /// Reading from or writing to the key-value store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A configuration value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A catalog request failed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

/// A specialized `Result` type for bookhunt operations.
pub type Result<T> = std::result::Result<T, BookhuntError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_convert_into_plugin_errors() {
        let err: BookhuntError = FetchError::Status(503).into();
        assert_eq!(err.to_string(), "Fetch error: unexpected HTTP status 503");
    }

    #[test]
    fn every_fetch_error_is_retryable() {
        for err in [
            FetchError::Transport("offline".into()),
            FetchError::Status(500),
            FetchError::Decode("eof".into()),
        ] {
            assert!(err.is_retryable());
        }
    }
}
