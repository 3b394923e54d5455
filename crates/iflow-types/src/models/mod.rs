//! Core domain models for the dashboard.

mod config;
mod credentials;
mod log;
mod stats;
mod status;

pub use config::{
    Configuration, Theme, DEFAULT_LANGUAGE, DEFAULT_PORT, DEFAULT_RETRY_COUNT,
    DEFAULT_TIMEOUT_SECONDS, DEFAULT_UPSTREAM_BASE_URL,
};
pub use credentials::{AuthState, Credentials, OAuthLoginResult};
pub use log::{LogEntry, LogOutcome};
pub use stats::{ProxyStats, SystemInfo};
pub use status::ServiceStatus;
