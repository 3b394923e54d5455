//! Client-side settings for reaching the backend.

/// Origin used by the HTTP fallback when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Settings for the HTTP fallback transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin the `/api/<command>` paths are resolved against.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string() }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// Resolve from `IFLOW_DASHBOARD_URL`, then `IFLOW_DASHBOARD_PORT`, then the default.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var("IFLOW_DASHBOARD_URL").ok(),
            std::env::var("IFLOW_DASHBOARD_PORT").ok(),
        )
    }

    fn resolve(url: Option<String>, port: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            return Self::new(url.trim().trim_end_matches('/'));
        }
        if let Some(port) = port.and_then(|p| p.trim().parse::<u16>().ok()).filter(|p| *p != 0) {
            return Self::new(format!("http://127.0.0.1:{}", port));
        }
        Self::default()
    }
}
