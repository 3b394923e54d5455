//! Local key-value storage errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the persisted key-value store.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum StorageError {
    /// Storage backend is not reachable (no window, no data dir)
    #[error("Storage unavailable: {message}")]
    Unavailable {
        /// Reason the store could not be opened
        message: String,
    },

    /// Reading a key failed
    #[error("Failed to read '{key}': {message}")]
    Read {
        /// Storage key
        key: String,
        /// Underlying failure
        message: String,
    },

    /// Writing or removing a key failed
    #[error("Failed to write '{key}': {message}")]
    Write {
        /// Storage key
        key: String,
        /// Underlying failure
        message: String,
    },

    /// Stored value could not be decoded or encoded
    #[error("Failed to parse '{key}': {message}")]
    Parse {
        /// Storage key
        key: String,
        /// Decode failure description
        message: String,
    },
}

impl StorageError {
    /// Create a write error from an IO error.
    pub fn from_io_error(key: &str, e: &std::io::Error) -> Self {
        Self::Write { key: key.to_string(), message: e.to_string() }
    }

    /// Create a parse error from a serde_json error.
    pub fn from_json_error(key: &str, e: &serde_json::Error) -> Self {
        Self::Parse { key: key.to_string(), message: e.to_string() }
    }
}
