//! Task Commands
//!
//! Frontend bindings for the to-do collection commands.

use serde::Serialize;
use task_schema::{NewTask, StoreError, Task};
use wasm_bindgen::prelude::*;

use super::call;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionArgs<'a> {
    subscription_id: &'a str,
}

#[derive(Serialize)]
struct CreateTaskArgs<'a> {
    text: &'a str,
    completed: bool,
    timestamp: i64,
}

#[derive(Serialize)]
struct UpdateCompletedArgs<'a> {
    id: &'a str,
    completed: bool,
}

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

fn to_args<T: Serialize>(args: &T) -> Result<JsValue, StoreError> {
    serde_wasm_bindgen::to_value(args).map_err(|e| StoreError::internal(e.to_string()))
}

// ========================
// Commands
// ========================

pub async fn subscribe_tasks(subscription_id: &str) -> Result<(), StoreError> {
    call("subscribe_tasks", to_args(&SubscriptionArgs { subscription_id })?).await
}

pub async fn unsubscribe_tasks(subscription_id: &str) -> Result<bool, StoreError> {
    call("unsubscribe_tasks", to_args(&SubscriptionArgs { subscription_id })?).await
}

pub async fn create_task(new_task: &NewTask) -> Result<Task, StoreError> {
    let args = CreateTaskArgs {
        text: &new_task.text,
        completed: new_task.completed,
        timestamp: new_task.timestamp,
    };
    call("create_task", to_args(&args)?).await
}

pub async fn update_task_completed(id: &str, completed: bool) -> Result<(), StoreError> {
    call("update_task_completed", to_args(&UpdateCompletedArgs { id, completed })?).await
}

pub async fn delete_task(id: &str) -> Result<(), StoreError> {
    call("delete_task", to_args(&IdArgs { id })?).await
}
