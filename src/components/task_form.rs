//! New Task Form Component
//!
//! Text input plus submit button. Input is validated before anything is sent.

use leptos::prelude::*;
use leptos::task::spawn_local;
use task_schema::{validate_for_create, TaskInput};

use crate::context::use_app_context;
use crate::errors::MutationKind;
use crate::sync;

/// Form for creating new tasks
#[component]
pub fn TaskForm() -> impl IntoView {
    let ctx = use_app_context();
    let list_state = ctx.list_state;

    let (text, set_text) = signal(String::new());
    let (submitting, set_submitting) = signal(false);
    let (inline_error, set_inline_error) = signal::<Option<String>>(None);

    let disabled = move || list_state.with(|state| state.form_disabled(submitting.get()));

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if disabled() {
            return;
        }

        let new_task = match validate_for_create(&TaskInput::from_text(text.get())) {
            Ok(new_task) => new_task,
            Err(e) => {
                set_inline_error.set(Some(e.to_string()));
                return;
            }
        };
        set_inline_error.set(None);
        set_submitting.set(true);

        spawn_local(async move {
            let result = sync::create(new_task).await;
            set_submitting.try_set(false);
            if result.is_ok() {
                set_text.try_set(String::new());
            }
            ctx.report(MutationKind::Create, result);
        });
    };

    view! {
        <form class="task-form" on:submit=create_task>
            <div class="task-form-row">
                <div class="task-form-field">
                    <input
                        type="text"
                        class="task-input"
                        placeholder="What needs to be done?"
                        data-testid="input-task"
                        prop:value=move || text.get()
                        prop:disabled=disabled
                        on:input=move |ev| {
                            set_text.set(event_target_value(&ev));
                            set_inline_error.set(None);
                        }
                    />
                    {move || inline_error.get().map(|message| view! {
                        <p class="form-message">{message}</p>
                    })}
                </div>
                <button
                    type="submit"
                    class="add-btn"
                    data-testid="button-add"
                    prop:disabled=disabled
                >
                    {move || if submitting.get() { "Adding..." } else { "+ Add Task" }}
                </button>
            </div>
        </form>
    }
}
