//! Notification Store
//!
//! Uses Leptos reactive_stores for the transient toast queue.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

/// Most toasts shown at once; older ones are dropped first
pub const MAX_TOASTS: usize = 5;
/// Lifetime of a toast before it dismisses itself
pub const TOAST_TTL_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast",
            ToastKind::Error => "toast toast-destructive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
}

/// Toast queue with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    pub next_id: u64,
}

/// Type alias for the store
pub type ToastStore = Store<ToastState>;

/// Get the toast store from context
pub fn use_toast_store() -> ToastStore {
    expect_context::<ToastStore>()
}

/// Append a toast, trimming the oldest beyond [`MAX_TOASTS`]
pub fn enqueue(toasts: &mut Vec<Toast>, toast: Toast) {
    toasts.push(toast);
    if toasts.len() > MAX_TOASTS {
        let overflow = toasts.len() - MAX_TOASTS;
        toasts.drain(..overflow);
    }
}

// ========================
// Store Helper Functions
// ========================

/// Add a toast; `None` once the store has been disposed
pub fn store_push_toast(
    store: &ToastStore,
    kind: ToastKind,
    title: &str,
    description: &str,
) -> Option<u64> {
    let id = {
        let field = store.next_id();
        let mut next_id = field.try_write()?;
        *next_id += 1;
        *next_id
    };
    let toast = Toast {
        id,
        kind,
        title: title.to_string(),
        description: description.to_string(),
    };
    let field = store.toasts();
    let mut toasts = field.try_write()?;
    enqueue(&mut toasts, toast);
    Some(id)
}

/// Remove a toast by ID
pub fn store_dismiss_toast(store: &ToastStore, id: u64) {
    if let Some(mut toasts) = store.toasts().try_write() {
        toasts.retain(|toast| toast.id != id);
    }
}

/// Show a toast that dismisses itself after [`TOAST_TTL_MS`]
pub fn notify(store: ToastStore, kind: ToastKind, title: &str, description: &str) {
    if let Some(id) = store_push_toast(&store, kind, title, description) {
        spawn_local(async move {
            TimeoutFuture::new(TOAST_TTL_MS).await;
            store_dismiss_toast(&store, id);
        });
    }
}
