//! Task List Component
//!
//! Loading state, empty state, or the rows plus the remaining counter.

use leptos::prelude::*;

use crate::components::TaskRow;
use crate::context::use_app_context;
use crate::view_state::ListState;

#[component]
pub fn TaskList() -> impl IntoView {
    let list_state = use_app_context().list_state;

    view! {
        <Show when=move || list_state.with(ListState::is_loading)>
            <div class="loading-state" data-testid="loading-state">
                <span class="spinner"></span>
                <p class="muted">"Loading todos..."</p>
            </div>
        </Show>

        <Show when=move || list_state.with(ListState::is_ready_empty)>
            <div class="empty-state" data-testid="empty-state">
                <p class="muted large">"No tasks yet!"</p>
                <p class="muted small">"Add your first task above to get started."</p>
            </div>
        </Show>

        <Show when=move || list_state.with(|state| !state.tasks().is_empty())>
            <div class="todo-list" data-testid="todo-list">
                // Keyed on completion too, so a toggle re-renders the row
                <For
                    each=move || list_state.with(|state| state.tasks().to_vec())
                    key=|task| (task.id.clone(), task.completed)
                    let:task
                >
                    <TaskRow task=task />
                </For>
            </div>

            <div class="counter-row">
                <p class="muted small" data-testid="task-counter">
                    {move || list_state.with(|state| {
                        state.counter().map(|counter| counter.to_string()).unwrap_or_default()
                    })}
                </p>
            </div>
        </Show>
    }
}
