//! Transport (bridge / HTTP) errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while dispatching a command to the backend.
///
/// Every variant carries the command name so a failure can be traced back
/// to the call that produced it.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum TransportError {
    /// The native bridge rejected the invocation
    #[error("Bridge rejected '{command}': {message}")]
    Bridge {
        /// Command that was invoked
        command: String,
        /// Rejection payload rendered as text
        message: String,
    },

    /// HTTP fallback answered with a non-success status
    #[error("HTTP {status} from /api/{command}: {message}")]
    Http {
        /// Command that was invoked
        command: String,
        /// HTTP status code
        status: u16,
        /// Response body text
        message: String,
    },

    /// Request never reached the backend
    #[error("Connection failed for '{command}': {message}")]
    Connection {
        /// Command that was invoked
        command: String,
        /// Underlying network error
        message: String,
    },

    /// Backend answered but the result did not match the expected shape
    #[error("Invalid response for '{command}': {message}")]
    InvalidResponse {
        /// Command that was invoked
        command: String,
        /// Decode failure description
        message: String,
    },

    /// Params could not be encoded
    #[error("Failed to encode params for '{command}': {message}")]
    Serialization {
        /// Command that was invoked
        command: String,
        /// Encode failure description
        message: String,
    },
}

impl TransportError {
    /// Name of the command whose dispatch failed.
    pub fn command(&self) -> &str {
        match self {
            Self::Bridge { command, .. }
            | Self::Http { command, .. }
            | Self::Connection { command, .. }
            | Self::InvalidResponse { command, .. }
            | Self::Serialization { command, .. } => command,
        }
    }

    /// HTTP status, when the failure came from the fallback path.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
