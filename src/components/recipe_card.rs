//! Recipe Card Component
//!
//! Grid card for one recipe: name, favorite star, link and the cleaned
//! ingredient list run through the tolerant parser.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::Recipe;
use crate::parse;

#[component]
pub fn RecipeCard(recipe: Recipe) -> impl IntoView {
    let ctx = use_app_context();

    let star_id = recipe.id.clone();
    let toggle_id = recipe.id.clone();
    // The cleaned field arrives from the backend pipeline; fall back to the
    // raw ingredients while it has not been derived yet.
    let ingredients_raw = recipe
        .cleaned_ingredients
        .clone()
        .or_else(|| recipe.ingredients.clone());
    let ingredients = ingredients_raw
        .as_deref()
        .map(parse::parse_ingredients)
        .unwrap_or_default();

    view! {
        <div class="recipe-card-content">
            <div class="recipe-header">
                {recipe.name.clone().map(|name| view! { <h3>{name}</h3> })}
                <button
                    class=move || {
                        if ctx.favorites.with(|f| f.contains(&star_id)) {
                            "favorite-button active"
                        } else {
                            "favorite-button"
                        }
                    }
                    title="Favorite"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        ctx.toggle_favorite(&toggle_id);
                    }
                >
                    "★"
                </button>
            </div>
            {recipe.link.clone().map(|link| view! {
                <p class="recipe-link">
                    <a href=link.clone() target="_blank" rel="noopener noreferrer">{link}</a>
                </p>
            })}
            {(!ingredients.is_empty()).then(|| view! {
                <div>
                    <p class="field-label">"Ingredients:"</p>
                    <ul class="ingredients-list">
                        {ingredients
                            .into_iter()
                            .map(|entry| view! { <li>{entry}</li> })
                            .collect_view()}
                    </ul>
                </div>
            })}
        </div>
    }
}
