//! # iflow Types
//!
//! Data model and error definitions shared by the iflow2api dashboard crates.
//!
//! - **`error`** - Typed error hierarchy for transport, validation, state, storage and auth
//! - **`models`** - Configuration, service status, credentials, log entries, stats
//!
//! ## Architecture Role
//!
//! ```text
//!                iflow-types (this crate)
//!                        │
//!                        ▼
//!                  iflow-client
//!                        │
//!                        ▼
//!                  iflow-leptos
//! ```
//!
//! Every type serializes with the same field names the backend speaks over the
//! bridge, so values can be passed through `invoke()` or an HTTP body unchanged.

pub mod error;
pub mod models;

// Re-export error types for convenience
pub use error::{
    AuthError, DashboardError, Result, StateError, StorageError, TransportError, ValidationError,
};

// Re-export core model types
pub use models::{
    AuthState, Configuration, Credentials, LogEntry, LogOutcome, OAuthLoginResult, ProxyStats,
    ServiceStatus, SystemInfo, Theme,
};
