//! Application configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Default proxy listen port.
pub const DEFAULT_PORT: u16 = 8000;
/// Default upstream API base URL.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://apis.iflow.cn/v1";
/// Default upstream retry count.
pub const DEFAULT_RETRY_COUNT: u32 = 3;
/// Default upstream timeout.
pub const DEFAULT_TIMEOUT_SECONDS: u32 = 60;
/// Default UI language.
pub const DEFAULT_LANGUAGE: &str = "zh-CN";

/// UI theme.
///
/// Unknown names deserialize to the default so a stale `theme` value never
/// invalidates the rest of a persisted document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Theme {
    /// Light palette
    Light,
    /// Dark palette
    #[default]
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

impl From<String> for Theme {
    fn from(s: String) -> Self {
        Self::from_string(&s)
    }
}

impl Theme {
    /// Parse from string, falling back to the default theme.
    pub fn from_string(s: &str) -> Self {
        match s {
            "light" => Self::Light,
            _ => Self::Dark,
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Full application configuration.
///
/// Serialized with the field names the dashboard has always persisted
/// (`port`, `baseUrl`, `retry`, `timeout`, `theme`, `language`). Missing
/// fields take their default values, so older documents still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Configuration {
    /// Port the proxy listens on
    #[serde(rename = "port")]
    pub listen_port: u16,
    /// Upstream API base URL
    #[serde(rename = "baseUrl")]
    pub upstream_base_url: String,
    /// Upstream retry count (applied by the backend)
    #[serde(rename = "retry")]
    pub retry_count: u32,
    /// Upstream timeout in seconds (applied by the backend)
    #[serde(rename = "timeout")]
    pub timeout_seconds: u32,
    /// UI theme
    pub theme: Theme,
    /// UI locale tag
    pub language: String,
}

impl Configuration {
    /// Create default configuration.
    pub fn new() -> Self {
        Self {
            listen_port: DEFAULT_PORT,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            retry_count: DEFAULT_RETRY_COUNT,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            theme: Theme::Dark,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.listen_port == 0 {
            return Err(ValidationError::OutOfRange {
                field: "port".to_string(),
                message: "must be between 1 and 65535".to_string(),
            });
        }

        let parsed = url::Url::parse(&self.upstream_base_url).map_err(|e| {
            ValidationError::InvalidUrl {
                value: self.upstream_base_url.clone(),
                message: e.to_string(),
            }
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidUrl {
                value: self.upstream_base_url.clone(),
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        if self.timeout_seconds == 0 {
            return Err(ValidationError::OutOfRange {
                field: "timeout".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if self.language.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "language".to_string() });
        }

        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
