//! Recipe Detail Modal
//!
//! Expanded recipe view with Ingredients/Procedure tabs. Both tabs feed the
//! stored text through the tolerant parsers, so a malformed serialization
//! degrades to readable text instead of breaking the view.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::models::Recipe;
use crate::parse;
use crate::reconcile::{Reconciler, WriteAction};

use super::confirm_button::ConfirmButton;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailTab {
    Ingredients,
    Procedure,
}

#[component]
pub fn RecipeDetailModal(
    recipe: Recipe,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_edit: Callback<Recipe>,
) -> impl IntoView {
    let ctx = use_app_context();
    let rec = expect_context::<Reconciler>();

    let (tab, set_tab) = signal(DetailTab::Ingredients);

    let ingredients = recipe
        .cleaned_ingredients
        .as_deref()
        .or(recipe.ingredients.as_deref())
        .map(parse::parse_ingredients)
        .unwrap_or_default();
    let steps = recipe
        .procedure
        .as_deref()
        .map(parse::parse_procedure)
        .unwrap_or_default();

    let edit_recipe = recipe.clone();
    let delete_id = recipe.id.clone();
    let delete_recipe = Callback::new(move |_| {
        let id = delete_id.clone();
        spawn_local(async move {
            let action = WriteAction::DeleteRecipe { id };
            if rec.submit(action, None).await.is_ok() {
                on_close.run(());
            }
        });
    });

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal-content" on:click=move |ev| ev.stop_propagation()>
                <div class="recipe-header">
                    <div class="recipe-header-left">
                        {recipe.name.clone().map(|name| view! { <h3>{name}</h3> })}
                        {recipe.link.clone().map(|link| view! {
                            <a href=link target="_blank" rel="noopener noreferrer" class="link">
                                "View Recipe Link"
                            </a>
                        })}
                    </div>
                    <div class="button-group">
                        <button
                            class="edit-button"
                            disabled=move || ctx.saving.get()
                            on:click=move |ev| {
                                ev.stop_propagation();
                                on_edit.run(edit_recipe.clone());
                            }
                        >
                            "Edit"
                        </button>
                        <ConfirmButton
                            button_class="delete-button"
                            label="Delete".to_string()
                            prompt="Delete this recipe?".to_string()
                            disabled=Signal::derive(move || ctx.saving.get())
                            on_confirm=delete_recipe
                        />
                    </div>
                </div>

                <div class="tabs">
                    <button
                        class=move || {
                            if tab.get() == DetailTab::Ingredients { "tab active-tab" } else { "tab" }
                        }
                        on:click=move |_| set_tab.set(DetailTab::Ingredients)
                    >
                        "Ingredients"
                    </button>
                    <button
                        class=move || {
                            if tab.get() == DetailTab::Procedure { "tab active-tab" } else { "tab" }
                        }
                        on:click=move |_| set_tab.set(DetailTab::Procedure)
                    >
                        "Procedure"
                    </button>
                </div>

                <div class="tab-content">
                    <Show when=move || tab.get() == DetailTab::Ingredients>
                        <ul class="modal-ingredients-list">
                            {ingredients
                                .clone()
                                .into_iter()
                                .map(|entry| view! { <li>{entry}</li> })
                                .collect_view()}
                        </ul>
                    </Show>
                    <Show when=move || tab.get() == DetailTab::Procedure>
                        <ol class="modal-procedure-list">
                            {steps
                                .clone()
                                .into_iter()
                                .map(|step| view! { <li>{step}</li> })
                                .collect_view()}
                        </ol>
                    </Show>
                </div>
            </div>
        </div>
    }
}
