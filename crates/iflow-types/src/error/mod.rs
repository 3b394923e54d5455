//! Typed error definitions for the dashboard.
//!
//! Each domain gets its own enum; [`DashboardError`] wraps them so a façade
//! can return a single error type. All errors are:
//!
//! - **Serializable** so they can cross the wasm/JS boundary
//! - **Displayable** for logging and user-facing messages
//! - **Matchable** so views can branch on the failure kind

mod auth;
mod state;
mod storage;
mod transport;
mod validation;

pub use auth::AuthError;
pub use state::StateError;
pub use storage::StorageError;
pub use transport::TransportError;
pub use validation::ValidationError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type returned by every store and façade operation.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "domain", content = "error")]
pub enum DashboardError {
    /// Bridge or network failure, or a non-success response
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Input rejected before anything was sent or persisted
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Store state error (overlapping operations or a broken invariant)
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Local key-value persistence failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication flow did not produce credentials
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

impl DashboardError {
    /// Whether this error means the backend (or the path to it) failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Whether this error was raised by local validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Standard Result type using DashboardError.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = DashboardError::Transport(TransportError::Http {
            command: "start_service".to_string(),
            status: 500,
            message: "bind failed".to_string(),
        });

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("Transport"));
        assert!(json.contains("start_service"));

        let deserialized: DashboardError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, deserialized);
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::EmptyField { field: "apiKey".to_string() };

        let msg = format!("{}", DashboardError::from(err));
        assert!(msg.contains("Validation"));
        assert!(msg.contains("apiKey"));
    }

    #[test]
    fn test_error_classification() {
        let busy: DashboardError = StateError::Busy { operation: "start_service".into() }.into();
        assert!(!busy.is_transport());
        assert!(!busy.is_validation());

        let empty: DashboardError = ValidationError::EmptyField { field: "apiKey".into() }.into();
        assert!(empty.is_validation());
    }
}
