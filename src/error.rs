//! Custom error types for abrechnungsformular
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for settlement form operations
#[derive(Error, Debug)]
pub enum AbrechnungError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Template loading or parsing errors
    #[error("Template error: {0}")]
    Template(String),

    /// Form query evaluation errors (bad request in the routing layer)
    #[error("Query error: {0}")]
    Query(String),
}

impl AbrechnungError {
    /// Create a query error for a field whose value failed to parse
    pub fn bad_field(field: &str, value: &str) -> Self {
        Self::Query(format!("invalid value '{}' for field '{}'", value, field))
    }

    /// Check if this is a query (bad request) error
    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for AbrechnungError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AbrechnungError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for settlement form operations
pub type AbrechnungResult<T> = Result<T, AbrechnungError>;
