//! Nav Bar Component
//!
//! Signal-driven switch between the fridge and recipe pages.

use leptos::prelude::*;

/// Top-level pages of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Fridge,
    Recipes,
}

const PAGES: [(Page, &str); 2] = [(Page::Fridge, "Fridge Manager"), (Page::Recipes, "Recipes")];

#[component]
pub fn NavBar(page: ReadSignal<Page>, set_page: WriteSignal<Page>) -> impl IntoView {
    view! {
        <div class="header">
            <div class="logo">"TZ"</div>
            <nav class="nav">
                {PAGES.iter().map(|(target, label)| {
                    let target = *target;
                    view! {
                        <button
                            class=move || {
                                if page.get() == target { "nav-link active" } else { "nav-link" }
                            }
                            on:click=move |_| set_page.set(target)
                        >
                            {*label}
                        </button>
                    }
                }).collect_view()}
            </nav>
        </div>
    }
}
