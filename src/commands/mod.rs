//! Tauri Command Wrappers
//!
//! Frontend bindings to the desktop host: IPC commands and event listeners.

mod event;
mod task;

use serde::de::DeserializeOwned;
use task_schema::StoreError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

// Re-export all public items
pub use event::*;
pub use task::*;

/// Turn a rejected IPC call into a store error.
///
/// The host rejects with a serialized `StoreError`; anything else (missing
/// `__TAURI__` global, bridge failure) is reported as `unavailable`.
fn to_store_error(err: JsValue) -> StoreError {
    if let Ok(store_error) = serde_wasm_bindgen::from_value::<StoreError>(err.clone()) {
        return store_error;
    }
    let detail = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "unknown IPC failure".to_string());
    StoreError::unavailable(detail)
}

/// Invoke a command and decode its result
async fn call<T: DeserializeOwned>(cmd: &str, args: JsValue) -> Result<T, StoreError> {
    let result = invoke(cmd, args).await.map_err(to_store_error)?;
    serde_wasm_bindgen::from_value(result)
        .map_err(|e| StoreError::internal(format!("Response error for {}: {}", cmd, e)))
}
