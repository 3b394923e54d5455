//! Command transport.
//!
//! A command is a name plus a JSON params object. When the host provides a
//! native bridge the call goes through it verbatim; otherwise it becomes
//! `POST /api/<command>` with the params as body.

mod http;

pub use http::HttpBridge;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use iflow_types::TransportError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Something that can execute a backend command.
///
/// Futures are not `Send`: calls are driven from the single UI event loop.
#[async_trait(?Send)]
pub trait Bridge: Send + Sync {
    /// Execute `command` and return its raw JSON result.
    async fn invoke(&self, command: &str, params: Value) -> Result<Value, TransportError>;
}

/// Which path a [`Transport`] routes calls through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Native,
    Http,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Native => write!(f, "native"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// Routes commands to the native bridge when present, HTTP otherwise.
#[derive(Clone)]
pub struct Transport {
    native: Option<Arc<dyn Bridge>>,
    http: HttpBridge,
}

impl Transport {
    pub fn new(native: Option<Arc<dyn Bridge>>, http: HttpBridge) -> Self {
        Self { native, http }
    }

    /// Transport with no native bridge.
    pub fn http_only(http: HttpBridge) -> Self {
        Self::new(None, http)
    }

    pub fn kind(&self) -> TransportKind {
        if self.native.is_some() {
            TransportKind::Native
        } else {
            TransportKind::Http
        }
    }

    /// Dispatch `command` and return the raw result.
    ///
    /// No retry and no timeout: errors come back exactly as the bridge or
    /// the HTTP layer produced them.
    pub async fn call(&self, command: &str, params: Value) -> Result<Value, TransportError> {
        tracing::debug!(command, transport = %self.kind(), "dispatching command");
        match &self.native {
            Some(bridge) => bridge.invoke(command, params).await,
            None => self.http.invoke(command, params).await,
        }
    }

    /// Dispatch with typed params and decode the result into `R`.
    pub async fn call_typed<P, R>(&self, command: &str, params: &P) -> Result<R, TransportError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let params = serde_json::to_value(params).map_err(|e| TransportError::Serialization {
            command: command.to_string(),
            message: e.to_string(),
        })?;
        let value = self.call(command, params).await?;
        serde_json::from_value(value).map_err(|e| TransportError::InvalidResponse {
            command: command.to_string(),
            message: e.to_string(),
        })
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("kind", &self.kind())
            .field("http", &self.http)
            .finish()
    }
}
