//! Event Listeners
//!
//! Bindings for `window.__TAURI__.event.listen`, used by the live query.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use task_schema::StoreError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::to_store_error;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"], js_name = listen, catch)]
    async fn tauri_listen(
        event: &str,
        handler: &Closure<dyn FnMut(JsValue)>,
    ) -> Result<JsValue, JsValue>;
}

/// Event object handed to listeners; only the payload matters here
#[derive(Deserialize)]
struct EventEnvelope<T> {
    payload: T,
}

/// Register `handler` for `event`; returns the unlisten function
pub async fn listen(
    event: &str,
    handler: &Closure<dyn FnMut(JsValue)>,
) -> Result<js_sys::Function, StoreError> {
    let unlisten = tauri_listen(event, handler).await.map_err(to_store_error)?;
    unlisten
        .dyn_into::<js_sys::Function>()
        .map_err(|_| StoreError::internal(format!("listen({}) did not return a function", event)))
}

/// Decode the payload of an event object
pub fn event_payload<T: DeserializeOwned>(event: JsValue) -> Result<T, String> {
    serde_wasm_bindgen::from_value::<EventEnvelope<T>>(event)
        .map(|envelope| envelope.payload)
        .map_err(|e| e.to_string())
}
