//! Item Card Component
//!
//! Card body for one fridge item: pending overlay while a write reconciles,
//! selection checkbox in select mode, name colored by expiry bucket, and the
//! populated fields.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::FridgeItem;

/// Render a labelled row only when the value is present. A zero quantity
/// counts as absent, matching the card's compact look.
fn field_row(label: &'static str, value: Option<String>) -> Option<impl IntoView> {
    let value = value.filter(|v| !v.is_empty())?;
    Some(view! {
        <p class="item-field">{label}": "{value}</p>
    })
}

#[component]
pub fn ItemCard(item: FridgeItem, #[prop(optional)] in_modal: bool) -> impl IntoView {
    let ctx = use_app_context();

    let id = item.id.clone();
    let pending_id = id.clone();
    let checkbox_id = id.clone();
    let expiry_class = item.expiry_status().as_str();

    let quantity = (item.quantity > 0).then(|| item.quantity.to_string());
    let days = item.days_until_expiration.map(|d| d.to_string());
    let out_of_date = item
        .out_of_date
        .map(|flag| if flag { "Yes" } else { "No" }.to_string());

    view! {
        <div class="item-card-content">
            <Show when=move || ctx.is_pending(&pending_id)>
                <div class="card-overlay">
                    <div class="card-spinner"></div>
                </div>
            </Show>
            <div class="item-header">
                <Show when=move || ctx.selection.with(|s| s.is_selecting()) && !in_modal>
                    {
                        let checked_id = checkbox_id.clone();
                        let toggle_id = checkbox_id.clone();
                        view! {
                            <input
                                type="checkbox"
                                class="select-checkbox"
                                prop:checked=move || {
                                    ctx.selection.with(|s| s.is_selected(&checked_id))
                                }
                                on:click=move |ev| {
                                    ev.stop_propagation();
                                    ctx.selection.update(|s| s.toggle(&toggle_id));
                                }
                            />
                        }
                    }
                </Show>
                {item.name.clone().map(|name| view! {
                    <h3 class=expiry_class>{name}</h3>
                })}
            </div>
            {field_row("Date Added", item.date_added.clone())}
            {field_row("Quantity", quantity)}
            {field_row("Use By", item.use_by.clone())}
            {field_row("Days until Expiration", days)}
            {field_row("Out of Date", out_of_date)}
        </div>
    }
}
