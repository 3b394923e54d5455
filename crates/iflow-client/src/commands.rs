//! Typed wrappers for every backend command.

use iflow_types::{
    Configuration, Credentials, LogEntry, OAuthLoginResult, ProxyStats, ServiceStatus,
    SystemInfo, TransportError,
};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::transport::Transport;

async fn invoke_no_args<R: DeserializeOwned>(
    transport: &Transport,
    command: &str,
) -> Result<R, TransportError> {
    transport.call_typed(command, &json!({})).await
}

async fn invoke_void(
    transport: &Transport,
    command: &str,
    params: serde_json::Value,
) -> Result<(), TransportError> {
    transport.call(command, params).await.map(|_| ())
}

// ========== Service ==========

/// Start the proxy on `port`.
pub async fn start_service(transport: &Transport, port: u16) -> Result<(), TransportError> {
    invoke_void(transport, "start_service", json!({ "port": port })).await
}

/// Stop the proxy.
pub async fn stop_service(transport: &Transport) -> Result<(), TransportError> {
    invoke_void(transport, "stop_service", json!({})).await
}

pub async fn get_service_status(transport: &Transport) -> Result<ServiceStatus, TransportError> {
    invoke_no_args(transport, "get_service_status").await
}

// ========== Monitor ==========

pub async fn get_stats(transport: &Transport) -> Result<ProxyStats, TransportError> {
    invoke_no_args(transport, "get_stats").await
}

pub async fn get_system_info(transport: &Transport) -> Result<SystemInfo, TransportError> {
    invoke_no_args(transport, "get_system_info").await
}

pub async fn get_logs(transport: &Transport) -> Result<Vec<LogEntry>, TransportError> {
    invoke_no_args(transport, "get_logs").await
}

pub async fn clear_logs(transport: &Transport) -> Result<(), TransportError> {
    invoke_void(transport, "clear_logs", json!({})).await
}

// ========== Config ==========

/// Configuration as the backend holds it.
pub async fn get_config(transport: &Transport) -> Result<Configuration, TransportError> {
    invoke_no_args(transport, "get_config").await
}

pub async fn save_config(
    transport: &Transport,
    config: &Configuration,
) -> Result<(), TransportError> {
    invoke_void(transport, "save_config", json!({ "config": config })).await
}

// ========== OAuth ==========

/// Stored OAuth credentials, `None` when signed out.
pub async fn get_oauth_creds(transport: &Transport) -> Result<Option<Credentials>, TransportError> {
    invoke_no_args(transport, "get_oauth_creds").await
}

/// Run the backend OAuth flow (opens the browser on the backend side).
pub async fn start_oauth(transport: &Transport) -> Result<OAuthLoginResult, TransportError> {
    invoke_no_args(transport, "start_oauth").await
}

pub async fn delete_oauth_creds(transport: &Transport) -> Result<(), TransportError> {
    invoke_void(transport, "delete_oauth_creds", json!({})).await
}

/// Ask the backend to refresh the stored token.
///
/// Backends without this command reject it, and that rejection is returned
/// as-is.
pub async fn refresh_oauth_token(transport: &Transport) -> Result<Credentials, TransportError> {
    invoke_no_args(transport, "refresh_oauth_token").await
}
