//! Custom error types for MoneyTree
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for MoneyTree operations
#[derive(Error, Debug)]
pub enum MoneyTreeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for money items and intents
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Advisory call errors (network, non-success responses)
    #[error("Advice error: {0}")]
    Advice(String),
}

impl MoneyTreeError {
    /// Create a "not found" error for money items
    pub fn item_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Money item",
            identifier: identifier.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for MoneyTreeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MoneyTreeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for MoneyTree operations
pub type MoneyTreeResult<T> = Result<T, MoneyTreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MoneyTreeError::Validation("label cannot be empty".into());
        assert_eq!(err.to_string(), "Validation error: label cannot be empty");
        assert!(err.is_validation());
    }

    #[test]
    fn test_not_found_error() {
        let err = MoneyTreeError::item_not_found(42);
        assert_eq!(err.to_string(), "Money item not found: 42");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MoneyTreeError = io_err.into();
        assert!(matches!(err, MoneyTreeError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: MoneyTreeError = json_err.into();
        assert!(matches!(err, MoneyTreeError::Json(_)));
    }
}
