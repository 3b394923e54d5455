//! OAuth credentials and authentication state.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Credentials obtained from the backend OAuth flow.
///
/// The backend's credential document carries more fields (access/refresh
/// tokens); only the ones the dashboard needs are kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Credentials {
    /// API key issued after login
    #[serde(rename = "apiKey", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Token expiry as epoch milliseconds; `None` when absent or unparseable
    #[serde(
        rename = "expiry_date",
        default,
        deserialize_with = "deserialize_expiry",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry_epoch_millis: Option<i64>,
}

fn deserialize_expiry<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_expiry))
}

/// Parse an expiry written as epoch millis (number or digit string), an
/// ISO 8601 timestamp, or `YYYY-MM-DD HH:MM`. Naive times are taken as UTC.
fn parse_expiry(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                return s.parse().ok();
            }
            if s.contains('T') {
                if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                    return Some(dt.timestamp_millis());
                }
                return NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|dt| dt.and_utc().timestamp_millis());
            }
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
                .ok()
                .map(|dt| dt.and_utc().timestamp_millis())
        }
        _ => None,
    }
}

impl Credentials {
    /// Whether a usable (non-blank) API key is present.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Advisory expiry check. Unknown expiry counts as not expired.
    pub fn is_expired(&self, now_epoch_millis: i64) -> bool {
        self.expiry_epoch_millis.is_some_and(|expiry| expiry <= now_epoch_millis)
    }
}

/// Result of the backend `start_oauth` command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OAuthLoginResult {
    /// "success" when the flow completed
    pub status: String,
    /// Credentials produced by the flow
    #[serde(default)]
    pub credentials: Option<Credentials>,
}

impl OAuthLoginResult {
    /// Credentials of a completed login, if it completed with a key.
    pub fn into_credentials(self) -> Option<Credentials> {
        if self.status != "success" {
            return None;
        }
        self.credentials.filter(Credentials::has_api_key)
    }
}

/// Client-side authentication state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AuthState {
    /// Whether cached credentials carry an API key
    pub authenticated: bool,
    /// Cached credentials
    pub credentials: Option<Credentials>,
}

impl AuthState {
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// State derived from credentials reported by the backend.
    pub fn from_credentials(credentials: Option<Credentials>) -> Self {
        match credentials {
            Some(creds) if creds.has_api_key() => {
                Self { authenticated: true, credentials: Some(creds) }
            }
            _ => Self::signed_out(),
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.credentials.as_ref().and_then(|c| c.api_key.as_deref())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_document_extra_fields_ignored() {
        let creds: Credentials = serde_json::from_str(
            r#"{"apiKey": "sk-test", "expiry_date": 1700000000000, "access_token": "at", "refresh_token": "rt"}"#,
        )
        .unwrap();
        assert_eq!(creds.api_key.as_deref(), Some("sk-test"));
        assert_eq!(creds.expiry_epoch_millis, Some(1_700_000_000_000));
    }

    #[test]
    fn test_expiry_formats() {
        let parse = |expiry: Value| {
            serde_json::from_value::<Credentials>(serde_json::json!({
                "apiKey": "sk",
                "expiry_date": expiry
            }))
            .unwrap()
            .expiry_epoch_millis
        };

        assert_eq!(parse(serde_json::json!(1.7e12)), Some(1_700_000_000_000));
        assert_eq!(parse(serde_json::json!("1700000000000")), Some(1_700_000_000_000));
        assert_eq!(parse(serde_json::json!("2023-11-14T22:13:20Z")), Some(1_700_000_000_000));
        assert_eq!(parse(serde_json::json!("2023-11-14T22:13:20")), Some(1_700_000_000_000));
        assert_eq!(parse(serde_json::json!("2023-11-14 22:13")), Some(1_699_999_980_000));
        assert_eq!(parse(serde_json::json!(null)), None);
    }

    #[test]
    fn test_unparseable_expiry_is_unknown() {
        let creds: Credentials =
            serde_json::from_str(r#"{"apiKey": "sk-test", "expiry_date": "soon"}"#).unwrap();
        assert_eq!(creds.api_key.as_deref(), Some("sk-test"));
        assert!(creds.expiry_epoch_millis.is_none());
        assert!(!creds.is_expired(i64::MAX));

        let creds: Credentials =
            serde_json::from_str(r#"{"apiKey": "sk-test", "expiry_date": true}"#).unwrap();
        assert!(creds.expiry_epoch_millis.is_none());
    }

    #[test]
    fn test_expiry_is_advisory() {
        let creds = Credentials {
            api_key: Some("sk".into()),
            expiry_epoch_millis: Some(1_000),
        };
        assert!(creds.is_expired(1_000));
        assert!(!creds.is_expired(999));
        assert!(!Credentials::default().is_expired(i64::MAX));
    }

    #[test]
    fn test_login_result_requires_success_and_key() {
        let ok: OAuthLoginResult = serde_json::from_value(serde_json::json!({
            "status": "success",
            "credentials": {"apiKey": "sk-1", "expiry_date": 5}
        }))
        .unwrap();
        assert_eq!(ok.into_credentials().unwrap().api_key.as_deref(), Some("sk-1"));

        let pending = OAuthLoginResult {
            status: "pending".into(),
            credentials: Some(Credentials { api_key: Some("sk".into()), ..Default::default() }),
        };
        assert!(pending.into_credentials().is_none());

        let keyless = OAuthLoginResult {
            status: "success".into(),
            credentials: Some(Credentials::default()),
        };
        assert!(keyless.into_credentials().is_none());
    }

    #[test]
    fn test_auth_state_from_credentials() {
        assert!(!AuthState::from_credentials(None).authenticated);
        assert!(!AuthState::from_credentials(Some(Credentials {
            api_key: Some("   ".into()),
            ..Default::default()
        }))
        .authenticated);

        let state = AuthState::from_credentials(Some(Credentials {
            api_key: Some("sk".into()),
            expiry_epoch_millis: None,
        }));
        assert!(state.authenticated);
        assert_eq!(state.api_key(), Some("sk"));
    }
}
