//! Filter Menu Component
//!
//! Expiry tag dropdown for the fridge grid. Open state closes on any click
//! outside the dropdown; the document listener is detached and dropped with
//! the component so it never outlives its view.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::pipeline::{ExpiryFilter, ExpiryFilterSet};

const FILTER_OPTIONS: [(ExpiryFilter, &str); 4] = [
    (ExpiryFilter::All, "All Items"),
    (ExpiryFilter::Expired, "Expired"),
    (ExpiryFilter::NearExpiry, "Near Expiry"),
    (ExpiryFilter::Good, "Good"),
];

fn dom_document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}

#[component]
pub fn FilterMenu(filters: RwSignal<ExpiryFilterSet>) -> impl IntoView {
    let (open, set_open) = signal(false);
    let dropdown_ref = NodeRef::<leptos::html::Div>::new();

    let on_mousedown = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(
        move |ev: web_sys::MouseEvent| {
            if !open.get_untracked() {
                return;
            }
            let outside = match (dropdown_ref.get_untracked(), ev.target()) {
                (Some(root), Some(target)) => {
                    let node: Option<web_sys::Node> = target.dyn_into().ok();
                    !root.contains(node.as_ref())
                }
                _ => true,
            };
            if outside {
                set_open.set(false);
            }
        },
    );
    if let Some(doc) = dom_document() {
        let _ = doc
            .add_event_listener_with_callback("mousedown", on_mousedown.as_ref().unchecked_ref());
    }
    // `Closure` holds a non-`Send` boxed JS callback, but `on_cleanup` requires
    // `Send + Sync`. In this single-threaded WASM target the wrapper is only
    // ever touched on the one thread, so `SendWrapper` is sound here.
    let on_mousedown =
        leptos::__reexports::send_wrapper::SendWrapper::new(on_mousedown);
    on_cleanup(move || {
        if let Some(doc) = dom_document() {
            let _ = doc.remove_event_listener_with_callback(
                "mousedown",
                on_mousedown.as_ref().unchecked_ref(),
            );
        }
    });

    view! {
        <div class="filter-dropdown" node_ref=dropdown_ref>
            <button
                class="filter-button"
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_open.update(|v| *v = !*v);
                }
            >
                "Filter"
            </button>
            <Show when=move || open.get()>
                <div class="filter-menu">
                    {FILTER_OPTIONS.iter().map(|(filter, label)| {
                        let filter = *filter;
                        view! {
                            <label class="filter-option">
                                <input
                                    type="checkbox"
                                    prop:checked=move || filters.with(|set| set.is_active(filter))
                                    on:change=move |_| filters.update(|set| set.toggle(filter))
                                />
                                {*label}
                            </label>
                        }
                    }).collect_view()}
                </div>
            </Show>
        </div>
    }
}
