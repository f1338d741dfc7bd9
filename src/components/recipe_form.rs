//! Recipe Form Component
//!
//! Modal form for adding or editing a recipe. Ingredients are entered one
//! per line and encoded as a JSON array string for the store; an existing
//! recipe's serialized ingredients are unpacked back into lines for editing.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::models::Recipe;
use crate::parse;
use crate::reconcile::{Reconciler, WriteAction};

#[component]
pub fn RecipeForm(
    #[prop(optional, into)] existing: Option<Recipe>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let rec = expect_context::<Reconciler>();

    let is_edit = existing.is_some();
    let title = if is_edit { "Edit Recipe" } else { "Add New Recipe" };
    let submit_label = if is_edit { "Save" } else { "Add" };

    let initial_ingredients = existing
        .as_ref()
        .and_then(|r| r.ingredients.as_deref())
        .map(|raw| parse::parse_ingredients(raw).join("\n"))
        .unwrap_or_default();

    let (name, set_name) = signal(
        existing
            .as_ref()
            .and_then(|r| r.name.clone())
            .unwrap_or_default(),
    );
    let (link, set_link) = signal(
        existing
            .as_ref()
            .and_then(|r| r.link.clone())
            .unwrap_or_default(),
    );
    let (ingredients, set_ingredients) = signal(initial_ingredients);
    let (procedure, set_procedure) = signal(
        existing
            .as_ref()
            .and_then(|r| r.procedure.clone())
            .unwrap_or_default(),
    );

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let recipe_name = name.get();
        if recipe_name.is_empty() {
            return;
        }
        let recipe_link = Some(link.get()).filter(|l| !l.is_empty());
        let encoded_ingredients = parse::encode_ingredient_lines(&ingredients.get());
        let recipe_procedure = procedure.get();
        let existing_id = existing.as_ref().map(|r| r.id.clone());

        spawn_local(async move {
            let action = match existing_id {
                Some(id) => WriteAction::EditRecipe {
                    id,
                    name: recipe_name,
                    link: recipe_link,
                    ingredients: encoded_ingredients,
                    procedure: recipe_procedure,
                },
                None => WriteAction::CreateRecipe {
                    name: recipe_name,
                    link: recipe_link,
                    ingredients: encoded_ingredients,
                    procedure: recipe_procedure,
                },
            };
            if rec.submit(action, None).await.is_ok() {
                on_saved.run(());
                on_close.run(());
            }
        });
    };

    view! {
        <div
            class="modal-overlay"
            on:click=move |_| {
                if !ctx.saving.get() {
                    on_close.run(());
                }
            }
        >
            <div class="edit-form-modal" on:click=move |ev| ev.stop_propagation()>
                <h3>{title}</h3>
                <form on:submit=on_submit>
                    <div class="form-field">
                        <label>"Name:"</label>
                        <input
                            type="text"
                            prop:value=move || name.get()
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                            disabled=move || ctx.saving.get()
                            required
                        />
                    </div>
                    <div class="form-field">
                        <label>"Link (optional):"</label>
                        <input
                            type="text"
                            prop:value=move || link.get()
                            on:input=move |ev| set_link.set(event_target_value(&ev))
                            disabled=move || ctx.saving.get()
                        />
                    </div>
                    <div class="form-field">
                        <label>"Ingredients (one per line):"</label>
                        <textarea
                            class="form-textarea"
                            placeholder="2 cups flour\n1 tsp salt\n1 cup sugar"
                            prop:value=move || ingredients.get()
                            on:input=move |ev| set_ingredients.set(event_target_value(&ev))
                            disabled=move || ctx.saving.get()
                            required
                        ></textarea>
                    </div>
                    <div class="form-field">
                        <label>"Procedure:"</label>
                        <textarea
                            class="form-textarea"
                            prop:value=move || procedure.get()
                            on:input=move |ev| set_procedure.set(event_target_value(&ev))
                            disabled=move || ctx.saving.get()
                        ></textarea>
                    </div>
                    <div class="form-buttons">
                        <button
                            type="submit"
                            class=move || if ctx.saving.get() { "save-button saving" } else { "save-button" }
                            disabled=move || ctx.saving.get()
                        >
                            {move || if ctx.saving.get() { "Saving..." } else { submit_label }}
                        </button>
                        <button
                            type="button"
                            class="cancel-button"
                            on:click=move |_| on_close.run(())
                            disabled=move || ctx.saving.get()
                        >
                            "Cancel"
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
