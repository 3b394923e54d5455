//! Statistics and monitoring models.

use serde::{Deserialize, Serialize};

/// Request counters reported by the proxy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProxyStats {
    /// Total requests handled
    #[serde(default)]
    pub total: u64,
    /// Requests that completed successfully
    #[serde(default)]
    pub success: u64,
    /// Requests that failed
    #[serde(default)]
    pub error: u64,
    /// Success percentage (0-100)
    #[serde(rename = "successRate", alias = "success_rate", default = "full_rate")]
    pub success_rate: f64,
}

fn full_rate() -> f64 {
    100.0
}

impl Default for ProxyStats {
    fn default() -> Self {
        Self { total: 0, success: 0, error: 0, success_rate: full_rate() }
    }
}

/// Host metrics reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SystemInfo {
    /// CPU usage percentage
    pub cpu: f64,
    /// Memory usage percentage
    pub memory: f64,
    /// Uptime rendered as text (e.g. "00:12:34")
    pub uptime: String,
}
