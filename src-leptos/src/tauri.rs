//! Tauri IPC bridge.
//!
//! Wraps `window.__TAURI__.core.invoke()`; a rejected invoke becomes
//! `TransportError::Bridge` with the rejection text.

use async_trait::async_trait;
use iflow_client::Bridge;
use iflow_types::TransportError;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Whether the page runs inside a Tauri WebView.
pub fn is_available() -> bool {
    web_sys::window()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str("__TAURI__")).ok())
        .is_some_and(|tauri| !tauri.is_undefined() && !tauri.is_null())
}

fn js_error_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TauriBridge;

impl TauriBridge {
    /// The bridge, if the host provides one.
    pub fn detect() -> Option<Self> {
        is_available().then_some(Self)
    }
}

#[async_trait(?Send)]
impl Bridge for TauriBridge {
    async fn invoke(&self, command: &str, params: Value) -> Result<Value, TransportError> {
        // Plain JS objects rather than Maps, which is what Tauri expects
        let args = params
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| TransportError::Serialization {
                command: command.to_string(),
                message: e.to_string(),
            })?;

        let result = invoke(command, args).await.map_err(|e| TransportError::Bridge {
            command: command.to_string(),
            message: js_error_message(&e),
        })?;

        if result.is_undefined() || result.is_null() {
            return Ok(Value::Null);
        }

        serde_wasm_bindgen::from_value(result).map_err(|e| TransportError::InvalidResponse {
            command: command.to_string(),
            message: e.to_string(),
        })
    }
}
