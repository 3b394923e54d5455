#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use iflow_client::{Bridge, ClientConfig, Dashboard, HttpBridge, MemoryStore, Transport};
use iflow_types::TransportError;
use serde_json::Value;
use tokio::sync::oneshot;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// HTTP fallback pointed at a port nothing listens on.
pub fn unreachable_http() -> HttpBridge {
    HttpBridge::new(&ClientConfig::new("http://127.0.0.1:9"))
}

/// In-process native bridge answering from a fixed script.
#[derive(Default)]
pub struct ScriptedBridge {
    responses: Mutex<HashMap<String, Result<Value, TransportError>>>,
    calls: Mutex<Vec<(String, Value)>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl ScriptedBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, command: &str, value: Value) -> Self {
        self.responses.lock().unwrap().insert(command.to_string(), Ok(value));
        self
    }

    pub fn reject(self, command: &str, message: &str) -> Self {
        self.responses.lock().unwrap().insert(
            command.to_string(),
            Err(TransportError::Bridge {
                command: command.to_string(),
                message: message.to_string(),
            }),
        );
        self
    }

    /// Hold the next call until `rx` resolves (or its sender drops).
    pub fn gated(self, rx: oneshot::Receiver<()>) -> Self {
        *self.gate.lock().unwrap() = Some(rx);
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn command_names(&self) -> Vec<String> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }
}

#[async_trait(?Send)]
impl Bridge for ScriptedBridge {
    async fn invoke(&self, command: &str, params: Value) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push((command.to_string(), params));

        let gate = self.gate.lock().unwrap().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }

        self.responses.lock().unwrap().get(command).cloned().unwrap_or_else(|| {
            Err(TransportError::Bridge {
                command: command.to_string(),
                message: format!("unknown command {}", command),
            })
        })
    }
}

pub fn native_transport(bridge: &Arc<ScriptedBridge>) -> Transport {
    let native: Arc<dyn Bridge> = bridge.clone();
    Transport::new(Some(native), unreachable_http())
}

pub fn native_dashboard(bridge: &Arc<ScriptedBridge>, storage: MemoryStore) -> Dashboard {
    init_tracing();
    Dashboard::new(native_transport(bridge), Arc::new(storage))
}
