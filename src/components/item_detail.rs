//! Item Detail Modal
//!
//! Expanded card for the item open in the detail view, with edit and delete.
//! The reconciliation engine refreshes this copy when a pending write for it
//! settles.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::models::FridgeItem;
use crate::reconcile::{Reconciler, WriteAction};

use super::confirm_button::ConfirmButton;
use super::item_card::ItemCard;

#[component]
pub fn ItemDetailModal(#[prop(into)] on_edit: Callback<FridgeItem>) -> impl IntoView {
    let ctx = use_app_context();
    let rec = expect_context::<Reconciler>();

    let delete_current = Callback::new(move |_| {
        let Some(item) = ctx.detail_item.get_untracked() else {
            return;
        };
        spawn_local(async move {
            let action = WriteAction::DeleteItem {
                id: item.id.clone(),
            };
            if rec.submit(action, None).await.is_ok() {
                ctx.detail_item.set(None);
            }
        });
    });

    view! {
        <Show when=move || ctx.detail_item.with(|d| d.is_some())>
            <div class="modal-overlay" on:click=move |_| ctx.detail_item.set(None)>
                <div class="modal-content" on:click=move |ev| ev.stop_propagation()>
                    {move || ctx.detail_item.get().map(|item| {
                        let edit_item = item.clone();
                        view! {
                            <div class="button-group">
                                <button
                                    class="edit-button"
                                    disabled=move || ctx.saving.get()
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        on_edit.run(edit_item.clone());
                                    }
                                >
                                    "Edit"
                                </button>
                                <ConfirmButton
                                    button_class="delete-button"
                                    label="Delete".to_string()
                                    prompt="Delete this item?".to_string()
                                    disabled=Signal::derive(move || ctx.saving.get())
                                    on_confirm=delete_current
                                />
                            </div>
                            <ItemCard item=item in_modal=true />
                        }
                    })}
                </div>
            </div>
        </Show>
    }
}
