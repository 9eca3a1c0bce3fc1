//! Toast Stack Component
//!
//! Transient notifications, newest at the bottom, each dismissible.

use leptos::prelude::*;

use crate::store::{store_dismiss_toast, use_toast_store, Toast, ToastStateStoreFields};

#[component]
pub fn ToastStack() -> impl IntoView {
    let store = use_toast_store();

    view! {
        <div class="toast-stack">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                let:toast
            >
                <ToastCard toast=toast />
            </For>
        </div>
    }
}

#[component]
fn ToastCard(toast: Toast) -> impl IntoView {
    let store = use_toast_store();
    let id = toast.id;

    view! {
        <div class=toast.kind.class() role="status">
            <div class="toast-body">
                <p class="toast-title">{toast.title}</p>
                <p class="toast-description">{toast.description}</p>
            </div>
            <button class="toast-close" title="Dismiss" on:click=move |_| store_dismiss_toast(&store, id)>
                "×"
            </button>
        </div>
    }
}
