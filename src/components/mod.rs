//! UI Components
//!
//! Reusable Leptos components.

mod confirm_button;
mod error_banner;
mod filter_menu;
mod item_card;
mod item_dashboard;
mod item_detail;
mod item_form;
mod nav_bar;
mod recipe_card;
mod recipe_dashboard;
mod recipe_detail;
mod recipe_form;
mod suggestion_panel;

pub use error_banner::ErrorBanner;
pub use item_dashboard::ItemDashboard;
pub use nav_bar::{NavBar, Page};
pub use recipe_dashboard::RecipeDashboard;
