//! Recipe Dashboard Component
//!
//! The recipe page: search, name-sorted paginated grid, and the add/edit/
//! detail modals. Changing the search text snaps back to page 1; page
//! navigation scrolls the window to the top as an explicit side effect.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::Recipe;
use crate::pipeline;

use super::recipe_card::RecipeCard;
use super::recipe_detail::RecipeDetailModal;
use super::recipe_form::RecipeForm;

fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

#[component]
pub fn RecipeDashboard() -> impl IntoView {
    let ctx = use_app_context();

    let (search, set_search) = signal(String::new());
    let (page, set_page) = signal(1usize);
    let (detail, set_detail) = signal::<Option<Recipe>>(None);
    let (editing, set_editing) = signal::<Option<Recipe>>(None);
    let (adding, set_adding) = signal(false);

    let visible = Memo::new(move |_| {
        let query = search.get();
        ctx.recipes
            .with(|recipes| pipeline::visible_recipes(recipes, &query))
    });
    let total_pages = Memo::new(move |_| pipeline::page_count(visible.with(|v| v.len())));
    let page_recipes = Memo::new(move |_| {
        visible.with(|v| pipeline::page_slice(v, page.get()).to_vec())
    });

    // Back to the first page whenever the search text changes.
    Effect::new(move |_| {
        let _ = search.get();
        set_page.set(1);
    });

    let go_to_page = move |target: usize| {
        set_page.set(target);
        scroll_to_top();
    };

    view! {
        <div class="dashboard-container">
            <div class="dashboard-header">
                <h1>"My Recipes 📖"</h1>
                <div class="header-buttons">
                    <button class="add-button" on:click=move |_| set_adding.set(true)>
                        "Add Recipe"
                    </button>
                </div>
            </div>

            <div class="search-container">
                <div class="search-row">
                    <input
                        type="text"
                        class="search-input"
                        placeholder="Search recipes..."
                        prop:value=move || search.get()
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                    />
                </div>
            </div>

            <div class="dashboard">
                <Show
                    when=move || !visible.with(|v| v.is_empty())
                    fallback=|| view! { <p>"No recipes found..."</p> }
                >
                    <div class="recipes-grid">
                        <For
                            each=move || page_recipes.get()
                            key=|recipe| recipe.clone()
                            children=move |recipe| {
                                let open_recipe = recipe.clone();
                                view! {
                                    <div
                                        class="recipe-card"
                                        on:click=move |_| set_detail.set(Some(open_recipe.clone()))
                                    >
                                        <RecipeCard recipe=recipe />
                                    </div>
                                }
                            }
                        />
                    </div>
                    <Show when=move || total_pages.get() > 1>
                        <div class="pagination">
                            <button
                                class="page-button"
                                disabled=move || page.get() == 1
                                on:click=move |_| go_to_page(page.get_untracked() - 1)
                            >
                                "Previous"
                            </button>
                            <span class="page-info">
                                {move || format!("Page {} of {}", page.get(), total_pages.get())}
                            </span>
                            <button
                                class="page-button"
                                disabled=move || page.get() == total_pages.get()
                                on:click=move |_| go_to_page(page.get_untracked() + 1)
                            >
                                "Next"
                            </button>
                        </div>
                    </Show>
                </Show>
            </div>

            {move || detail.get().map(|recipe| view! {
                <RecipeDetailModal
                    recipe=recipe
                    on_close=Callback::new(move |_| set_detail.set(None))
                    on_edit=Callback::new(move |recipe| {
                        set_detail.set(None);
                        set_editing.set(Some(recipe));
                    })
                />
            })}

            {move || editing.get().map(|recipe| view! {
                <RecipeForm
                    existing=recipe
                    on_close=Callback::new(move |_| set_editing.set(None))
                    on_saved=Callback::new(move |_| set_detail.set(None))
                />
            })}

            <Show when=move || adding.get()>
                <RecipeForm
                    on_close=Callback::new(move |_| set_adding.set(false))
                    on_saved=Callback::new(move |_| ())
                />
            </Show>
        </div>
    }
}
