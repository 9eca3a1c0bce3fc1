//! Error Banner Component
//!
//! Persistent alert shown while the live query is in its failed state.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let list_state = use_app_context().list_state;

    move || {
        list_state.with(|state| state.banner()).map(|banner| {
            view! {
                <div class="alert alert-destructive" role="alert" data-testid="error-alert">
                    <span class="alert-icon">"!"</span>
                    <div class="alert-body">
                        <h5 class="alert-title">{banner.title}</h5>
                        <p class="alert-description">{banner.message}</p>
                    </div>
                </div>
            }
        })
    }
}
