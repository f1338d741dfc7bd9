//! Error Banner Component
//!
//! Dismissible banner for surfaced action and read failures.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <Show when=move || ctx.error.with(|e| e.is_some())>
            <div class="error-banner">
                <span>{move || ctx.error.get().unwrap_or_default()}</span>
                <button class="dismiss-button" on:click=move |_| ctx.error.set(None)>
                    "×"
                </button>
            </div>
        </Show>
    }
}
