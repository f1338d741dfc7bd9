//! Persistent Preference Store
//!
//! Key/value façade over `window.localStorage`. Every write is a full-value
//! overwrite under a fixed key, so last-writer-wins is the whole concurrency
//! story. Values are read once at startup and written on each mutation,
//! never read back mid-operation.

use std::collections::HashSet;

use crate::models::RecipeSuggestion;

/// Favorited recipe ids, JSON array of strings.
pub const FAVORITES_KEY: &str = "wfd.favorites";
/// Last recommendation run, JSON array of suggestions.
pub const SUGGESTIONS_KEY: &str = "wfd.suggestions";
/// Free-text dinner preference, raw string.
pub const PREFERENCE_KEY: &str = "wfd.preference";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub fn get(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

pub fn set(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(key, value);
    }
}

pub fn load_favorites() -> HashSet<String> {
    get(FAVORITES_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

pub fn save_favorites(favorites: &HashSet<String>) {
    if let Ok(raw) = serde_json::to_string(favorites) {
        set(FAVORITES_KEY, &raw);
    }
}

pub fn load_suggestions() -> Vec<RecipeSuggestion> {
    get(SUGGESTIONS_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

pub fn save_suggestions(suggestions: &[RecipeSuggestion]) {
    if let Ok(raw) = serde_json::to_string(suggestions) {
        set(SUGGESTIONS_KEY, &raw);
    }
}

pub fn load_preference() -> String {
    get(PREFERENCE_KEY).unwrap_or_default()
}

pub fn save_preference(text: &str) {
    set(PREFERENCE_KEY, text);
}
