//! Suggestion Panel Component
//!
//! Recommendation flow on the fridge page: trigger a run from the items
//! expiring soon or from the current selection, optionally restricted to
//! favorited recipes, and page through the cached results in a wrap-around
//! carousel. Results and the preference text survive reloads through the
//! preference store.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::parse;
use crate::suggestions::{self, SuggestionSource};

#[component]
pub fn SuggestionPanel() -> impl IntoView {
    let ctx = use_app_context();

    let (running, set_running) = signal(false);
    let (favorites_only, set_favorites_only) = signal(false);

    let run_with = move |source: SuggestionSource| {
        let candidates = match source {
            SuggestionSource::ExpiringSoon => {
                ctx.items.with_untracked(|items| suggestions::expiring_soon(items))
            }
            SuggestionSource::SelectedItems => {
                let selected = ctx.selection.with_untracked(|s| s.ids());
                ctx.items.with_untracked(|items| {
                    items
                        .iter()
                        .filter(|item| selected.contains(&item.id))
                        .cloned()
                        .collect::<Vec<_>>()
                })
            }
        };
        if candidates.is_empty() {
            ctx.error.set(Some("No items to suggest from".to_string()));
            return;
        }
        let recipes = ctx.recipes.get_untracked();
        let favorites = ctx.favorites.get_untracked();
        let restrict = favorites_only.get_untracked();
        let preference = ctx.preference.get_untracked();

        set_running.set(true);
        spawn_local(async move {
            match suggestions::run(
                source,
                &candidates,
                &recipes,
                restrict,
                &favorites,
                &preference,
            )
            .await
            {
                Ok(results) => ctx.suggestions.update(|cache| cache.replace(results)),
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("[Suggestions] run failed: {err}").into(),
                    );
                    ctx.error.set(Some(err));
                }
            }
            set_running.set(false);
        });
    };

    view! {
        <div class="suggestion-panel">
            <div class="suggestion-controls">
                <button
                    class="suggest-button"
                    disabled=move || running.get()
                    on:click=move |_| run_with(SuggestionSource::ExpiringSoon)
                >
                    {move || if running.get() { "Thinking..." } else { "What's for dinner?" }}
                </button>
                <button
                    class="suggest-button"
                    disabled=move || {
                        running.get() || ctx.selection.with(|s| s.count()) == 0
                    }
                    on:click=move |_| run_with(SuggestionSource::SelectedItems)
                >
                    "Suggest from selection"
                </button>
                <label class="checkbox-label">
                    <input
                        type="checkbox"
                        prop:checked=move || favorites_only.get()
                        on:change=move |ev| set_favorites_only.set(event_target_checked(&ev))
                    />
                    "Favorites only"
                </label>
                <input
                    type="text"
                    class="preference-input"
                    placeholder="Any cravings? e.g. something spicy"
                    prop:value=move || ctx.preference.get()
                    on:input=move |ev| ctx.set_preference(event_target_value(&ev))
                />
            </div>

            <Show when=move || !ctx.suggestions.with(|c| c.is_empty())>
                <div class="suggestion-carousel">
                    <button
                        class="carousel-button"
                        disabled=move || !ctx.suggestions.with(|c| c.can_navigate())
                        on:click=move |_| ctx.suggestions.update(|c| c.prev())
                    >
                        "‹"
                    </button>
                    {move || ctx.suggestions.with(|cache| {
                        cache.current().cloned().map(|suggestion| {
                            let steps = parse::parse_procedure(&suggestion.procedures_serialized);
                            view! {
                                <div class="suggestion-card">
                                    <h3>{suggestion.name.clone()}</h3>
                                    <p class="suggestion-ingredients">{suggestion.ingredients_text.clone()}</p>
                                    {(!suggestion.shopping_list_text.is_empty()).then(|| view! {
                                        <p class="suggestion-shopping">
                                            "Shopping list: " {suggestion.shopping_list_text.clone()}
                                        </p>
                                    })}
                                    {(!steps.is_empty()).then(|| view! {
                                        <ol class="suggestion-steps">
                                            {steps
                                                .into_iter()
                                                .map(|step| view! { <li>{step}</li> })
                                                .collect_view()}
                                        </ol>
                                    })}
                                    {suggestion.link.clone().map(|link| view! {
                                        <a href=link target="_blank" rel="noopener noreferrer" class="link">
                                            "View recipe"
                                        </a>
                                    })}
                                </div>
                            }
                        })
                    })}
                    <button
                        class="carousel-button"
                        disabled=move || !ctx.suggestions.with(|c| c.can_navigate())
                        on:click=move |_| ctx.suggestions.update(|c| c.next())
                    >
                        "›"
                    </button>
                    <span class="carousel-position">
                        {move || ctx.suggestions.with(|c| format!("{} / {}", c.index() + 1, c.len()))}
                    </span>
                </div>
            </Show>
        </div>
    }
}
