//! Sync Client
//!
//! Bridges the store's live query to typed task lists and exposes the three
//! mutations. Nothing is merged locally: every accepted snapshot replaces
//! the whole list, and a mutation only becomes visible through the next
//! snapshot.

use std::cell::RefCell;
use std::rc::Rc;

use task_schema::{
    NewTask, Snapshot, StoreError, SubscriptionFailure, Task, FAILURE_EVENT, SNAPSHOT_EVENT,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands;
use crate::errors::{MutationError, MutationKind, SubscriptionError};

// ========================
// Snapshot filtering
// ========================

/// Decides which pushes reach the view for one subscription.
///
/// Keeps only snapshots addressed to this subscription with a version newer
/// than the last accepted one. After the first error nothing gets through.
#[derive(Debug)]
pub struct SnapshotGate {
    subscription_id: String,
    last_version: Option<u64>,
    terminated: bool,
}

impl SnapshotGate {
    pub fn new(subscription_id: String) -> Self {
        Self {
            subscription_id,
            last_version: None,
            terminated: false,
        }
    }

    pub fn accept(&mut self, snapshot: Snapshot) -> Option<Vec<Task>> {
        if self.terminated || snapshot.subscription_id != self.subscription_id {
            return None;
        }
        if matches!(self.last_version, Some(last) if snapshot.version <= last) {
            return None;
        }
        self.last_version = Some(snapshot.version);
        Some(snapshot.tasks)
    }

    pub fn accept_failure(&mut self, failure: SubscriptionFailure) -> Option<StoreError> {
        if failure.subscription_id != self.subscription_id {
            return None;
        }
        self.terminate(failure.error)
    }

    /// Returns the error only the first time
    pub fn terminate(&mut self, error: StoreError) -> Option<StoreError> {
        if self.terminated {
            return None;
        }
        self.terminated = true;
        Some(error)
    }
}

// ========================
// Subscription
// ========================

/// An open live query.
///
/// Dropping it removes both event listeners and closes the query on the
/// store side.
pub struct Subscription {
    id: String,
    unlisteners: Vec<js_sys::Function>,
    // Must outlive the listeners registered with them.
    handlers: Vec<Closure<dyn FnMut(JsValue)>>,
}

impl Subscription {
    fn new(id: String) -> Self {
        Self {
            id,
            unlisteners: Vec::new(),
            handlers: Vec::new(),
        }
    }

    async fn listen(
        &mut self,
        event: &str,
        handler: Closure<dyn FnMut(JsValue)>,
    ) -> Result<(), StoreError> {
        let unlisten = commands::listen(event, &handler).await?;
        self.unlisteners.push(unlisten);
        self.handlers.push(handler);
        Ok(())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        for unlisten in self.unlisteners.drain(..) {
            if let Err(e) = unlisten.call0(&JsValue::NULL) {
                web_sys::console::error_1(&format!("[SYNC] unlisten failed: {:?}", e).into());
            }
        }
        self.handlers.clear();

        let id = std::mem::take(&mut self.id);
        web_sys::console::log_1(&format!("[SYNC] Closing subscription {}", id).into());
        spawn_local(async move {
            if let Err(e) = commands::unsubscribe_tasks(&id).await {
                web_sys::console::error_1(&format!("[SYNC] unsubscribe {} failed: {}", id, e).into());
            }
        });
    }
}

fn new_subscription_id() -> String {
    let millis = js_sys::Date::now() as u64;
    let salt = (js_sys::Math::random() * f64::from(u32::MAX)) as u32;
    format!("sub-{:x}-{:08x}", millis, salt)
}

fn fail<E: Fn(SubscriptionError)>(gate: &RefCell<SnapshotGate>, on_error: &E, error: StoreError) {
    let first = gate.borrow_mut().terminate(error);
    if let Some(error) = first {
        on_error(error.into());
    }
}

/// Open a live query over the task collection, newest first.
///
/// `on_data` receives the full result set on every change. `on_error` is
/// called at most once; after it no data is delivered and nothing is
/// retried. The returned guard must be kept for as long as the view lives.
pub async fn subscribe<D, E>(on_data: D, on_error: E) -> Subscription
where
    D: Fn(Vec<Task>) + 'static,
    E: Fn(SubscriptionError) + 'static,
{
    let subscription_id = new_subscription_id();
    let gate = Rc::new(RefCell::new(SnapshotGate::new(subscription_id.clone())));
    let on_error = Rc::new(on_error);
    let mut subscription = Subscription::new(subscription_id.clone());

    let snapshot_gate = Rc::clone(&gate);
    let on_snapshot = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        match commands::event_payload::<Snapshot>(event) {
            Ok(snapshot) => {
                let accepted = snapshot_gate.borrow_mut().accept(snapshot);
                if let Some(tasks) = accepted {
                    on_data(tasks);
                }
            }
            Err(e) => {
                web_sys::console::error_1(&format!("[SYNC] Bad snapshot payload: {}", e).into())
            }
        }
    });
    if let Err(e) = subscription.listen(SNAPSHOT_EVENT, on_snapshot).await {
        fail(&gate, on_error.as_ref(), e);
        return subscription;
    }

    let failure_gate = Rc::clone(&gate);
    let failure_handler = Rc::clone(&on_error);
    let on_failure = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        match commands::event_payload::<SubscriptionFailure>(event) {
            Ok(failure) => {
                let error = failure_gate.borrow_mut().accept_failure(failure);
                if let Some(error) = error {
                    failure_handler(error.into());
                }
            }
            Err(e) => {
                web_sys::console::error_1(&format!("[SYNC] Bad failure payload: {}", e).into())
            }
        }
    });
    if let Err(e) = subscription.listen(FAILURE_EVENT, on_failure).await {
        fail(&gate, on_error.as_ref(), e);
        return subscription;
    }

    match commands::subscribe_tasks(&subscription_id).await {
        Ok(()) => {
            web_sys::console::log_1(&format!("[SYNC] Subscribed as {}", subscription_id).into())
        }
        Err(e) => fail(&gate, on_error.as_ref(), e),
    }
    subscription
}

// ========================
// Mutations
// ========================

/// Append a task, stamped with the client clock at call time
pub async fn create(new_task: NewTask) -> Result<(), MutationError> {
    let stamped = new_task.stamped(js_sys::Date::now() as i64);
    commands::create_task(&stamped)
        .await
        .map(|_| ())
        .map_err(|cause| MutationError::new(MutationKind::Create, cause))
}

/// Write `!current` to `completed`.
///
/// `current` is the value the caller last saw; two clients toggling at once
/// can overwrite each other.
pub async fn toggle_completed(id: &str, current: bool) -> Result<(), MutationError> {
    commands::update_task_completed(id, !current)
        .await
        .map_err(|cause| MutationError::new(MutationKind::Toggle, cause))
}

pub async fn remove(id: &str) -> Result<(), MutationError> {
    commands::delete_task(id)
        .await
        .map_err(|cause| MutationError::new(MutationKind::Delete, cause))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(subscription_id: &str, version: u64, texts: &[&str]) -> Snapshot {
        Snapshot {
            subscription_id: subscription_id.to_string(),
            version,
            tasks: texts
                .iter()
                .enumerate()
                .map(|(i, text)| Task {
                    id: format!("id-{}", i),
                    text: text.to_string(),
                    completed: false,
                    timestamp: 100 - i as i64,
                })
                .collect(),
        }
    }

    #[test]
    fn test_accepts_own_snapshots_in_order() {
        let mut gate = SnapshotGate::new("me".to_string());

        assert_eq!(gate.accept(snapshot("me", 1, &[])), Some(vec![]));
        let tasks = gate.accept(snapshot("me", 4, &["a", "b"])).unwrap();
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn test_drops_foreign_snapshots() {
        let mut gate = SnapshotGate::new("me".to_string());
        assert_eq!(gate.accept(snapshot("other", 1, &["a"])), None);
    }

    #[test]
    fn test_drops_stale_snapshots() {
        let mut gate = SnapshotGate::new("me".to_string());
        gate.accept(snapshot("me", 5, &["new"])).unwrap();

        assert_eq!(gate.accept(snapshot("me", 3, &["old"])), None);
        assert_eq!(gate.accept(snapshot("me", 5, &["dup"])), None);
    }

    #[test]
    fn test_failure_is_terminal_and_reported_once() {
        let mut gate = SnapshotGate::new("me".to_string());
        let failure = SubscriptionFailure {
            subscription_id: "me".to_string(),
            error: StoreError::unavailable("gone"),
        };

        assert!(gate.accept_failure(failure.clone()).is_some());
        assert!(gate.accept_failure(failure).is_none());
        assert!(gate.terminate(StoreError::internal("again")).is_none());
        assert_eq!(gate.accept(snapshot("me", 9, &["late"])), None);
    }

    #[test]
    fn test_foreign_failure_is_ignored() {
        let mut gate = SnapshotGate::new("me".to_string());
        let failure = SubscriptionFailure {
            subscription_id: "other".to_string(),
            error: StoreError::unavailable("gone"),
        };

        assert!(gate.accept_failure(failure).is_none());
        assert!(gate.accept(snapshot("me", 1, &["still here"])).is_some());
    }
}
