//! Task Row Component
//!
//! One task: completion checkbox, text, delete button.

use leptos::prelude::*;
use leptos::task::spawn_local;
use task_schema::Task;

use crate::context::use_app_context;
use crate::errors::MutationKind;
use crate::sync;

/// A single task row
#[component]
pub fn TaskRow(task: Task) -> impl IntoView {
    let ctx = use_app_context();

    let Task {
        id,
        text,
        completed,
        ..
    } = task;

    let toggle_id = id.clone();
    let on_toggle = move |ev: web_sys::MouseEvent| {
        // The checkbox mirrors the last push; the next push flips it.
        ev.prevent_default();
        let id = toggle_id.clone();
        spawn_local(async move {
            let result = sync::toggle_completed(&id, completed).await;
            ctx.report(MutationKind::Toggle, result);
        });
    };

    let delete_id = id.clone();
    let on_delete = move |_| {
        let id = delete_id.clone();
        spawn_local(async move {
            let result = sync::remove(&id).await;
            ctx.report(MutationKind::Delete, result);
        });
    };

    view! {
        <div class="todo-item" data-testid=format!("todo-item-{}", id)>
            <input
                type="checkbox"
                class="todo-checkbox"
                prop:checked=completed
                on:click=on_toggle
                data-testid=format!("checkbox-{}", id)
            />

            <span
                class=if completed { "todo-text completed" } else { "todo-text" }
                data-testid=format!("text-{}", id)
            >
                {text}
            </span>

            <button
                class="delete-btn"
                title="Delete task"
                on:click=on_delete
                data-testid=format!("button-delete-{}", id)
            >
                "×"
            </button>
        </div>
    }
}
