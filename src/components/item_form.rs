//! Item Form Component
//!
//! Modal form for adding or editing a fridge item. On submit it decides
//! which server-derived field the write should wait on: a set or changed
//! use-by date means the expiry countdown will move; a fresh item without
//! one only gets its date-added stamp.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::context::use_app_context;
use crate::models::FridgeItem;
use crate::reconcile::{DerivedField, Reconciler, WriteAction};

#[component]
pub fn ItemForm(
    #[prop(optional, into)] existing: Option<FridgeItem>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let rec = expect_context::<Reconciler>();

    let is_edit = existing.is_some();
    let title = if is_edit { "Edit Item" } else { "Add New Item" };
    let submit_label = if is_edit { "Save" } else { "Add" };

    let (name, set_name) = signal(
        existing
            .as_ref()
            .and_then(|i| i.name.clone())
            .unwrap_or_default(),
    );
    let (quantity, set_quantity) = signal(existing.as_ref().map(|i| i.quantity).unwrap_or(0));
    let (use_by, set_use_by) = signal(
        existing
            .as_ref()
            .and_then(|i| i.use_by.clone())
            .unwrap_or_default(),
    );
    let (no_use_by, set_no_use_by) = signal(
        existing
            .as_ref()
            .is_some_and(|i| i.use_by.is_none()),
    );

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let existing = existing.clone();
        let item_name = name.get();
        if item_name.is_empty() {
            return;
        }
        let new_use_by = if no_use_by.get() {
            None
        } else {
            Some(use_by.get()).filter(|d| !d.is_empty())
        };
        let item_quantity = quantity.get();

        spawn_local(async move {
            let (action, expected) = match existing {
                Some(item) => {
                    // Only a set or changed use-by makes the countdown move.
                    let expected = if new_use_by.is_some() && new_use_by != item.use_by {
                        Some(DerivedField::DaysUntilExpiration)
                    } else {
                        None
                    };
                    let action = WriteAction::EditItem {
                        id: item.id.clone(),
                        name: item_name,
                        quantity: item_quantity,
                        use_by: new_use_by,
                        date_added: item.date_added.clone(),
                    };
                    (action, expected)
                }
                None => {
                    let expected = if new_use_by.is_some() {
                        DerivedField::DaysUntilExpiration
                    } else {
                        DerivedField::DateAdded
                    };
                    let action = WriteAction::CreateItem {
                        id: actions::new_entity_id(),
                        name: item_name,
                        quantity: item_quantity,
                        use_by: new_use_by,
                    };
                    (action, Some(expected))
                }
            };

            if rec.submit(action, expected).await.is_ok() {
                ctx.detail_item.set(None);
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
                        <label>"Quantity:"</label>
                        <input
                            type="number"
                            min="0"
                            prop:value=move || quantity.get().to_string()
                            on:input=move |ev| {
                                set_quantity.set(event_target_value(&ev).parse().unwrap_or(0));
                            }
                            disabled=move || ctx.saving.get()
                        />
                    </div>
                    <div class="form-field">
                        <label>"Use By:"</label>
                        <div class="use-by-group">
                            <input
                                type="date"
                                prop:value=move || use_by.get()
                                on:input=move |ev| set_use_by.set(event_target_value(&ev))
                                disabled=move || ctx.saving.get() || no_use_by.get()
                            />
                            <label class="checkbox-label">
                                <input
                                    type="checkbox"
                                    prop:checked=move || no_use_by.get()
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        set_no_use_by.set(checked);
                                        if checked {
                                            set_use_by.set(String::new());
                                        }
                                    }
                                    disabled=move || ctx.saving.get()
                                />
                                "No expiry date"
                            </label>
                        </div>
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
