//! Custom error types for budget-tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for budget-tracker operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Date strings that are not `YYYY-MM-DD` (or `YYYY-MM` for months)
    #[error("Invalid date '{value}': expected {expected}")]
    InvalidDate {
        value: String,
        expected: &'static str,
    },

    /// Label or keyword patterns that are not valid regular expressions
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A storage backend or bank adapter name with no registered constructor
    #[error("Unknown {kind} adapter: '{name}' (available: {available})")]
    UnknownAdapter {
        kind: &'static str,
        name: String,
        available: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BudgetError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create an invalid date error for a `YYYY-MM-DD` value
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an unknown adapter error
    pub fn is_unknown_adapter(&self) -> bool {
        matches!(self, Self::UnknownAdapter { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for BudgetError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for BudgetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<crate::models::period::PeriodParseError> for BudgetError {
    fn from(err: crate::models::period::PeriodParseError) -> Self {
        Self::InvalidDate {
            value: err.to_string(),
            expected: "YYYY-MM",
        }
    }
}

/// Result type alias for budget-tracker operations
pub type BudgetResult<T> = Result<T, BudgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BudgetError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = BudgetError::transaction_not_found("tx-42");
        assert_eq!(err.to_string(), "Transaction not found: tx-42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_date_error() {
        let err = BudgetError::invalid_date("2025-13-01");
        assert_eq!(
            err.to_string(),
            "Invalid date '2025-13-01': expected YYYY-MM-DD"
        );
    }

    #[test]
    fn test_unknown_adapter_error() {
        let err = BudgetError::UnknownAdapter {
            kind: "storage",
            name: "sqlite".into(),
            available: "csv, json".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown storage adapter: 'sqlite' (available: csv, json)"
        );
        assert!(err.is_unknown_adapter());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BudgetError = io_err.into();
        assert!(matches!(err, BudgetError::Io(_)));
    }
}
