//! What's for Dinner - Frontend Entry Point

mod actions;
mod app;
mod components;
mod context;
mod models;
mod parse;
mod pipeline;
mod reconcile;
mod selection;
mod storage;
mod suggestions;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
