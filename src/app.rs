//! Live To-Do App
//!
//! Root component: owns the live query for as long as it is mounted.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::components::{ErrorBanner, TaskForm, TaskList, ToastStack};
use crate::context::AppContext;
use crate::store::ToastState;
use crate::sync::{self, Subscription};
use crate::view_state::ListState;

#[component]
pub fn App() -> impl IntoView {
    // State
    let (list_state, set_list_state) = signal(ListState::Loading);
    let toasts = Store::new(ToastState::default());

    // Provide context to all children
    provide_context(toasts);
    provide_context(AppContext::new(list_state, toasts));

    // Live query: opened once per mount, released on unmount
    let subscription = StoredValue::new_local(None::<Subscription>);
    spawn_local(async move {
        let opened = sync::subscribe(
            move |tasks| {
                web_sys::console::log_1(&format!("[APP] Snapshot with {} tasks", tasks.len()).into());
                set_list_state.try_update(|state| state.apply_snapshot(tasks));
            },
            move |error| {
                web_sys::console::error_1(&format!("[APP] Subscription failed: {}", error).into());
                set_list_state.try_update(|state| state.apply_error(error));
            },
        )
        .await;
        // Already unmounted: the closure is dropped unrun and the guard releases itself.
        subscription.try_update_value(move |slot| *slot = Some(opened));
    });
    on_cleanup(move || {
        subscription.try_update_value(|slot| slot.take());
    });

    view! {
        <div class="page">
            <div class="card">
                <h1 class="title">"My To-Do List"</h1>

                <ErrorBanner />

                <TaskForm />

                <TaskList />
            </div>

            <ToastStack />
        </div>
    }
}
