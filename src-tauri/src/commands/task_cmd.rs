//! Tauri Commands for the To-Do Collection
//!
//! Exposes the live query and the three mutations to the frontend via Tauri IPC.

use tauri::{State, Webview};
use task_schema::{NewTask, StoreError, Task};

use crate::AppState;

/// Open a live query owned by the calling webview; the first snapshot
/// arrives as an event
#[tauri::command]
pub async fn subscribe_tasks(
    webview: Webview,
    state: State<'_, AppState>,
    subscription_id: String,
) -> Result<(), StoreError> {
    let owner = webview.label().to_string();
    state.store.subscribe(&subscription_id, &owner).await.inspect_err(|e| {
        log::warn!("subscribe_tasks({}) rejected: {}", subscription_id, e);
    })
}

/// Close a live query (no-op for unknown ids)
#[tauri::command]
pub fn unsubscribe_tasks(state: State<'_, AppState>, subscription_id: String) -> bool {
    state.store.unsubscribe(&subscription_id)
}

/// Append a new document
#[tauri::command]
pub async fn create_task(
    state: State<'_, AppState>,
    text: String,
    completed: bool,
    timestamp: i64,
) -> Result<Task, StoreError> {
    let new_task = NewTask {
        text,
        completed,
        timestamp,
    };
    state.store.create(new_task).await.inspect_err(|e| {
        log::warn!("create_task rejected: {}", e);
    })
}

/// Set `completed` on an existing document
#[tauri::command]
pub async fn update_task_completed(
    state: State<'_, AppState>,
    id: String,
    completed: bool,
) -> Result<(), StoreError> {
    state.store.set_completed(&id, completed).await.inspect_err(|e| {
        log::warn!("update_task_completed({}) rejected: {}", id, e);
    })
}

/// Delete a document; deleting a missing id succeeds
#[tauri::command]
pub async fn delete_task(state: State<'_, AppState>, id: String) -> Result<(), StoreError> {
    state.store.remove(&id).await.inspect_err(|e| {
        log::warn!("delete_task({}) rejected: {}", id, e);
    })
}
