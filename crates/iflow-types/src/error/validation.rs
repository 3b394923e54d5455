//! Input validation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when user input is rejected locally.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ValidationError {
    /// A required value was empty or whitespace
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the empty field
        field: String,
    },

    /// A numeric value fell outside its allowed range
    #[error("{field} out of range: {message}")]
    OutOfRange {
        /// Name of the offending field
        field: String,
        /// Allowed range description
        message: String,
    },

    /// Upstream base URL is not an absolute http(s) URL
    #[error("Invalid URL '{value}': {message}")]
    InvalidUrl {
        /// Rejected input
        value: String,
        /// Parse failure description
        message: String,
    },
}
