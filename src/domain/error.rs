//! Error types for the character finder.
//!
//! This module defines the crate-wide error type [`FinderError`], the catalog
//! port error [`CatalogError`], and a [`Result`] alias. All errors are
//! implemented with `thiserror`.
//!
//! None of these errors is fatal: the controller turns catalog failures into
//! user-facing messages and storage failures into log events, and keeps
//! running.

use thiserror::Error;

/// Failure reported by a [`CatalogClient`](crate::catalog::CatalogClient).
///
/// The controller distinguishes exactly two cases: the catalog answered that
/// nothing matched, or the request failed for any other reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog has no record matching the query.
    ///
    /// User-recoverable; shown as a "no characters found" message.
    #[error("not found")]
    NotFound,

    /// Any other network or API failure.
    ///
    /// User-recoverable; retried implicitly the next time the user edits the
    /// search term or reopens the favorites view.
    #[error("catalog request failed: {0}")]
    Transient(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.status() == Some(reqwest::StatusCode::NOT_FOUND) {
            Self::NotFound
        } else {
            Self::Transient(err.to_string())
        }
    }
}

/// The main error type for character finder operations.
///
/// # Examples
///
/// ```
/// use character_finder::FinderError;
///
/// fn validate() -> Result<(), FinderError> {
///     Err(FinderError::Config("api_base_url must not be empty".to_string()))
/// }
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum FinderError {
    /// Reading from or writing to the durable key-value store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A catalog request failed outside the controller's own handling.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration is invalid or could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Interactive input could not be parsed into a command.
    #[error("Invalid command: {0}")]
    Command(String),
}

/// A specialized `Result` type for character finder operations.
pub type Result<T> = std::result::Result<T, FinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_error_converts_into_finder_error() {
        let err: FinderError = CatalogError::NotFound.into();
        assert!(matches!(err, FinderError::Catalog(CatalogError::NotFound)));
        assert_eq!(err.to_string(), "Catalog error: not found");
    }

    #[test]
    fn json_error_converts_into_serialization() {
        let parse = serde_json::from_str::<Vec<u64>>("[1,").unwrap_err();
        let err: FinderError = parse.into();
        assert!(err.to_string().starts_with("Serialization error:"));
    }
}
