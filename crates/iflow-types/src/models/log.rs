//! Proxy traffic log entries.

use serde::{Deserialize, Serialize};

/// Coarse outcome of a logged request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutcome {
    /// 1xx/2xx
    Success,
    /// 3xx
    Redirect,
    /// 4xx/5xx
    Failure,
}

/// One request seen by the proxy. Owned by the backend; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    /// Display timestamp as rendered by the backend
    #[serde(rename = "time")]
    pub timestamp_label: String,
    #[serde(rename = "method")]
    pub http_method: String,
    pub path: String,
    #[serde(rename = "status")]
    pub status_code: u16,
    /// Model named in the request body
    #[serde(rename = "model", default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(rename = "duration", default, skip_serializing_if = "Option::is_none")]
    pub duration_millis: Option<u64>,
}

impl LogEntry {
    pub fn outcome(&self) -> LogOutcome {
        match self.status_code {
            0..=299 => LogOutcome::Success,
            300..=399 => LogOutcome::Redirect,
            _ => LogOutcome::Failure,
        }
    }

    /// Case-insensitive match of an already lowercased term against path or model.
    pub fn matches(&self, lowercase_term: &str) -> bool {
        self.path.to_lowercase().contains(lowercase_term)
            || self
                .model_name
                .as_deref()
                .is_some_and(|m| m.to_lowercase().contains(lowercase_term))
    }
}
