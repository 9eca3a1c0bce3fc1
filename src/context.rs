//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::errors::{MutationError, MutationKind};
use crate::store::{notify, ToastKind, ToastStore};
use crate::view_state::ListState;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Latest live-query state - read only, written by the subscription
    pub list_state: ReadSignal<ListState>,
    toasts: ToastStore,
}

impl AppContext {
    pub fn new(list_state: ReadSignal<ListState>, toasts: ToastStore) -> Self {
        Self { list_state, toasts }
    }

    /// Turn a mutation outcome into a transient notification
    pub fn report(&self, kind: MutationKind, result: Result<(), MutationError>) {
        match result {
            Ok(()) => notify(self.toasts, ToastKind::Success, "Success", kind.success_message()),
            Err(e) => {
                web_sys::console::error_1(&format!("[APP] {}", e).into());
                notify(self.toasts, ToastKind::Error, "Error", e.kind.failure_message());
            }
        }
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
