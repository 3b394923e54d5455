//! # iflow Client
//!
//! The dashboard's request/config synchronization layer:
//!
//! - **`transport`** - invoke a named command through the native bridge, or
//!   `POST /api/<command>` when no bridge is present
//! - **`commands`** - one typed wrapper per backend command
//! - **`ConfigStore`** - persisted configuration plus proxy run status
//! - **`CredentialFacade`** - OAuth login/logout/refresh and the static API key
//! - **`Monitor`** - traffic logs, request counters and host metrics
//!
//! Nothing here retries or times out a call; failures surface to the caller
//! unchanged.

pub mod commands;
pub mod config;
mod credentials;
mod dashboard;
mod monitor;
pub mod storage;
mod store;
pub mod transport;

pub use config::ClientConfig;
pub use credentials::CredentialFacade;
pub use dashboard::Dashboard;
pub use monitor::{filter_logs, Monitor};
pub use storage::{KeyValueStore, MemoryStore};
pub use store::ConfigStore;
pub use transport::{Bridge, HttpBridge, Transport, TransportKind};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
