//! Application Context
//!
//! Shared state provided via Leptos Context API. All fields are arena-backed
//! signals, so the context is `Copy` and can be captured freely by closures
//! and spawned tasks.

use std::collections::{HashMap, HashSet};

use leptos::prelude::*;

use crate::models::{FridgeItem, Recipe};
use crate::reconcile::WritePhase;
use crate::selection::SelectionState;
use crate::storage;
use crate::suggestions::SuggestionCache;

#[derive(Clone, Copy)]
pub struct AppContext {
    /// Authoritative fridge snapshot; only ever replaced wholesale.
    pub items: RwSignal<Vec<FridgeItem>>,
    /// Authoritative recipe snapshot; only ever replaced wholesale.
    pub recipes: RwSignal<Vec<Recipe>>,
    /// Item currently open in the detail modal.
    pub detail_item: RwSignal<Option<FridgeItem>>,
    /// A write is in flight somewhere; forms disable themselves on it.
    pub saving: RwSignal<bool>,
    /// Last surfaced failure, shown in the error banner until dismissed.
    pub error: RwSignal<Option<String>>,
    /// Per-entity write phase; an entry means the card shows its spinner.
    pub phases: RwSignal<HashMap<String, WritePhase>>,
    /// Bulk-selection state for the fridge grid.
    pub selection: RwSignal<SelectionState>,
    /// Favorited recipe ids, mirrored to the preference store on change.
    pub favorites: RwSignal<HashSet<String>>,
    /// Last recommendation run plus carousel position.
    pub suggestions: RwSignal<SuggestionCache>,
    /// Free-text dinner preference, mirrored to the preference store.
    pub preference: RwSignal<String>,
}

impl AppContext {
    /// Fresh context with the persisted pieces rehydrated from the
    /// preference store.
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            recipes: RwSignal::new(Vec::new()),
            detail_item: RwSignal::new(None),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
            phases: RwSignal::new(HashMap::new()),
            selection: RwSignal::new(SelectionState::new()),
            favorites: RwSignal::new(storage::load_favorites()),
            suggestions: RwSignal::new(SuggestionCache::restore()),
            preference: RwSignal::new(storage::load_preference()),
        }
    }

    /// Whether the given entity has a write in flight.
    pub fn is_pending(&self, id: &str) -> bool {
        self.phases.with(|m| m.contains_key(id))
    }

    /// Flip a recipe's favorite flag and persist the new set.
    pub fn toggle_favorite(&self, recipe_id: &str) {
        self.favorites.update(|favorites| {
            if !favorites.remove(recipe_id) {
                favorites.insert(recipe_id.to_string());
            }
            storage::save_favorites(favorites);
        });
    }

    /// Update the preference text and persist it.
    pub fn set_preference(&self, text: String) {
        storage::save_preference(&text);
        self.preference.set(text);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
