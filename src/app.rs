//! What's for Dinner - App Component
//!
//! Root component: builds the shared context and the reconciliation engine,
//! kicks off the initial collection reads, and switches between the fridge
//! and recipe pages.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{ErrorBanner, ItemDashboard, NavBar, Page, RecipeDashboard};
use crate::context::AppContext;
use crate::reconcile::{Collection, Reconciler};

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    let rec = Reconciler::new(ctx);
    provide_context(ctx);
    provide_context(rec);

    let (page, set_page) = signal(Page::Fridge);

    // Initial full reads. A failure keeps the (empty) snapshot and surfaces
    // the error; the user can retry by re-submitting or reloading.
    Effect::new(move |_| {
        spawn_local(async move {
            if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
                doc.set_title("What's for Dinner");
            }
            for collection in [Collection::Items, Collection::Recipes] {
                if let Err(err) = rec.refresh(collection).await {
                    web_sys::console::error_1(
                        &format!("[App] initial load failed: {err}").into(),
                    );
                    ctx.error.set(Some(err));
                }
            }
        });
    });

    view! {
        <div class="wrapper">
            <NavBar page=page set_page=set_page />
            <ErrorBanner />
            <div class="content">
                {move || match page.get() {
                    Page::Fridge => view! { <ItemDashboard /> }.into_any(),
                    Page::Recipes => view! { <RecipeDashboard /> }.into_any(),
                }}
            </div>
        </div>
    }
}
