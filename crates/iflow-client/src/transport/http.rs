//! HTTP fallback: `POST <base>/api/<command>` with a JSON body.

use async_trait::async_trait;
use iflow_types::TransportError;
use reqwest::Client;
use serde_json::Value;

use super::Bridge;
use crate::config::ClientConfig;

const API_BASE: &str = "/api";

#[derive(Debug, Clone)]
pub struct HttpBridge {
    client: Client,
    base_url: String,
}

impl HttpBridge {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full URL for `command`.
    pub fn endpoint(&self, command: &str) -> String {
        format!("{}{}/{}", self.base_url, API_BASE, command)
    }
}

#[async_trait(?Send)]
impl Bridge for HttpBridge {
    async fn invoke(&self, command: &str, params: Value) -> Result<Value, TransportError> {
        let url = self.endpoint(command);

        let resp = self
            .client
            .post(&url)
            .json(&params)
            .send()
            .await
            .map_err(|e| TransportError::Connection {
                command: command.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(TransportError::Http {
                command: command.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await.map_err(|e| TransportError::Connection {
            command: command.to_string(),
            message: e.to_string(),
        })?;

        // Void commands may answer with an empty body.
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| TransportError::InvalidResponse {
            command: command.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_path() {
        let bridge = HttpBridge::new(&ClientConfig::new("http://127.0.0.1:8000/"));
        assert_eq!(bridge.endpoint("start_service"), "http://127.0.0.1:8000/api/start_service");
    }
}
