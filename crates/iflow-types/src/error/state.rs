//! Store state errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors about the store's own state rather than the backend.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum StateError {
    /// Status fields violate `running == false => port == 0`.
    ///
    /// Never expected at runtime; seeing it means a code path bypassed the
    /// `ServiceStatus` constructors.
    #[error("Inconsistent service status: running={running}, port={port}")]
    Inconsistent {
        /// Reported running flag
        running: bool,
        /// Reported port
        port: u16,
    },

    /// A start/stop call is still in flight
    #[error("Operation '{operation}' rejected: another service operation is in progress")]
    Busy {
        /// Operation that was rejected
        operation: String,
    },
}
