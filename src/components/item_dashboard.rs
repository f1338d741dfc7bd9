//! Item Dashboard Component
//!
//! The fridge page: search, expiry filters, the sorted card grid, select
//! mode with bulk delete, the suggestion panel and the add/edit/detail
//! modals.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::models::FridgeItem;
use crate::pipeline::{self, ExpiryFilterSet};
use crate::reconcile::Reconciler;

use super::confirm_button::ConfirmButton;
use super::filter_menu::FilterMenu;
use super::item_card::ItemCard;
use super::item_detail::ItemDetailModal;
use super::item_form::ItemForm;
use super::suggestion_panel::SuggestionPanel;

#[component]
pub fn ItemDashboard() -> impl IntoView {
    let ctx = use_app_context();
    let rec = expect_context::<Reconciler>();

    let (search, set_search) = signal(String::new());
    let filters = RwSignal::new(ExpiryFilterSet::new());
    let (adding, set_adding) = signal(false);
    let (editing, set_editing) = signal::<Option<FridgeItem>>(None);

    // The whole display pipeline in one memo: filter, tag-match, sort.
    let visible = Memo::new(move |_| {
        let query = search.get();
        ctx.items
            .with(|items| filters.with(|f| pipeline::visible_items(items, &query, f)))
    });

    let all_visible_selected = move || {
        let count = ctx.selection.with(|s| s.count());
        count > 0 && count == visible.with(|v| v.len())
    };

    let bulk_delete = Callback::new(move |_| {
        spawn_local(async move {
            let _ = rec.bulk_delete().await;
        });
    });

    view! {
        <div class="dashboard-container">
            <div class="dashboard-header">
                <h1>"My Fridge Items 🥬"</h1>
                <div class="header-buttons">
                    <button
                        class=move || {
                            if ctx.selection.with(|s| s.is_selecting()) {
                                "select-button active"
                            } else {
                                "select-button"
                            }
                        }
                        on:click=move |_| ctx.selection.update(|s| s.toggle_mode())
                    >
                        {move || {
                            if ctx.selection.with(|s| s.is_selecting()) {
                                "Cancel Selection"
                            } else {
                                "Select"
                            }
                        }}
                    </button>
                    <Show when=move || !ctx.selection.with(|s| s.is_selecting())>
                        <button class="add-button" on:click=move |_| set_adding.set(true)>
                            "Add Item"
                        </button>
                    </Show>
                    <Show when=move || ctx.selection.with(|s| s.is_selecting())>
                        <button
                            class="select-all-button"
                            on:click=move |_| {
                                if all_visible_selected() {
                                    ctx.selection.update(|s| s.deselect_all());
                                } else {
                                    let ids = visible.with(|v| {
                                        v.iter().map(|item| item.id.clone()).collect::<Vec<_>>()
                                    });
                                    ctx.selection.update(|s| s.select_all(ids));
                                }
                            }
                        >
                            {move || {
                                if all_visible_selected() { "Deselect All" } else { "Select All" }
                            }}
                        </button>
                        <ConfirmButton
                            button_class="bulk-delete-button"
                            label=Signal::derive(move || {
                                if ctx.saving.get() {
                                    "Deleting...".to_string()
                                } else {
                                    format!("Delete ({})", ctx.selection.with(|s| s.count()))
                                }
                            })
                            prompt=Signal::derive(move || {
                                let count = ctx.selection.with(|s| s.count());
                                if count == 1 {
                                    "Delete 1 item?".to_string()
                                } else {
                                    format!("Delete {count} items?")
                                }
                            })
                            disabled=Signal::derive(move || {
                                ctx.selection.with(|s| s.count()) == 0 || ctx.saving.get()
                            })
                            on_confirm=bulk_delete
                        />
                    </Show>
                </div>
            </div>

            <div class="search-container">
                <div class="search-row">
                    <input
                        type="text"
                        class="search-input"
                        placeholder="Search items..."
                        prop:value=move || search.get()
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                    />
                    <FilterMenu filters=filters />
                </div>
            </div>

            <SuggestionPanel />

            <div class="dashboard">
                <Show
                    when=move || !visible.with(|v| v.is_empty())
                    fallback=|| view! { <p>"No items found..."</p> }
                >
                    <div class="items-grid">
                        <For
                            each=move || visible.get()
                            key=|item| item.clone()
                            children=move |item| {
                                let select_id = item.id.clone();
                                let click_id = item.id.clone();
                                let card_item = item.clone();
                                view! {
                                    <div
                                        class=move || {
                                            let selected = ctx.selection.with(|s| {
                                                s.is_selecting() && s.is_selected(&select_id)
                                            });
                                            if selected { "item-card selected" } else { "item-card" }
                                        }
                                        on:click=move |_| {
                                            if ctx.selection.with_untracked(|s| s.is_selecting()) {
                                                ctx.selection.update(|s| s.toggle(&click_id));
                                            } else {
                                                ctx.detail_item.set(Some(card_item.clone()));
                                            }
                                        }
                                    >
                                        <ItemCard item=item />
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </div>

            <ItemDetailModal on_edit=Callback::new(move |item| set_editing.set(Some(item))) />

            {move || editing.get().map(|item| view! {
                <ItemForm
                    existing=item
                    on_close=Callback::new(move |_| set_editing.set(None))
                />
            })}

            <Show when=move || adding.get()>
                <ItemForm on_close=Callback::new(move |_| set_adding.set(false)) />
            </Show>
        </div>
    }
}
