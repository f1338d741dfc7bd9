//! Recommendation Cache
//!
//! Holds the last recommendation run and the carousel position, persisted
//! through the preference store so a reload comes back to the same
//! suggestions. Ranking is delegated entirely to the external service; this
//! module only picks candidates, truncates, caches and pages.

use std::collections::HashSet;

use crate::actions;
use crate::models::{FridgeItem, Recipe, RecipeSuggestion};
use crate::storage;

/// Countdown window, in days, for the "expiring soon" candidate set.
pub const EXPIRING_WINDOW_DAYS: i32 = 2;

/// Where a recommendation run draws its candidate items from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionSource {
    /// Items whose expiry countdown is within `EXPIRING_WINDOW_DAYS`.
    ExpiringSoon,
    /// The currently selected items.
    SelectedItems,
}

impl SuggestionSource {
    /// Result cap per source: one focused suggestion for the expiring-soon
    /// nudge, a short list when the user picked the items themselves.
    pub fn limit(&self) -> usize {
        match self {
            SuggestionSource::ExpiringSoon => 1,
            SuggestionSource::SelectedItems => 3,
        }
    }
}

/// Last run's results plus the active carousel slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionCache {
    results: Vec<RecipeSuggestion>,
    carousel: usize,
}

impl SuggestionCache {
    /// Rehydrate from the preference store at startup. The carousel always
    /// starts back at the first slot.
    pub fn restore() -> Self {
        Self {
            results: storage::load_suggestions(),
            carousel: 0,
        }
    }

    pub fn from_results(results: Vec<RecipeSuggestion>) -> Self {
        Self {
            results,
            carousel: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn index(&self) -> usize {
        self.carousel
    }

    pub fn current(&self) -> Option<&RecipeSuggestion> {
        self.results.get(self.carousel)
    }

    /// Navigation is inert with fewer than two entries.
    pub fn can_navigate(&self) -> bool {
        self.results.len() >= 2
    }

    pub fn next(&mut self) {
        if self.can_navigate() {
            self.carousel = (self.carousel + 1) % self.results.len();
        }
    }

    pub fn prev(&mut self) {
        if self.can_navigate() {
            self.carousel = (self.carousel + self.results.len() - 1) % self.results.len();
        }
    }

    /// Install a fresh run's results and rewind the carousel.
    pub fn replace(&mut self, results: Vec<RecipeSuggestion>) {
        self.results = results;
        self.carousel = 0;
    }
}

/// Items counting as "expiring soon": a concrete countdown inside the window,
/// not already expired.
pub fn expiring_soon(items: &[FridgeItem]) -> Vec<FridgeItem> {
    items
        .iter()
        .filter(|item| {
            matches!(item.days_until_expiration, Some(d) if (0..=EXPIRING_WINDOW_DAYS).contains(&d))
        })
        .cloned()
        .collect()
}

pub fn favorite_recipes(recipes: &[Recipe], favorites: &HashSet<String>) -> Vec<Recipe> {
    recipes
        .iter()
        .filter(|recipe| favorites.contains(&recipe.id))
        .cloned()
        .collect()
}

/// Run a recommendation against the external service, truncate to the
/// source's cap and persist the result set. The caller installs the returned
/// list into its cache signal, which rewinds the carousel to 0.
pub async fn run(
    source: SuggestionSource,
    candidate_items: &[FridgeItem],
    recipes: &[Recipe],
    favorites_only: bool,
    favorites: &HashSet<String>,
    preference: &str,
) -> Result<Vec<RecipeSuggestion>, String> {
    let catalog: Vec<Recipe> = if favorites_only {
        favorite_recipes(recipes, favorites)
    } else {
        recipes.to_vec()
    };
    let mut results =
        actions::recommend(candidate_items, &catalog, source.limit(), preference).await?;
    results.truncate(source.limit());
    storage::save_suggestions(&results);
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_suggestion(name: &str) -> RecipeSuggestion {
        RecipeSuggestion {
            name: name.to_string(),
            ingredients_text: format!("{name} ingredients"),
            shopping_list_text: String::new(),
            procedures_serialized: "['Step one', 'Step two']".to_string(),
            link: None,
        }
    }

    fn make_item(id: &str, days: Option<i32>) -> FridgeItem {
        FridgeItem {
            id: id.to_string(),
            name: Some(id.to_string()),
            quantity: 1,
            date_added: None,
            use_by: None,
            days_until_expiration: days,
            out_of_date: None,
        }
    }

    #[test]
    fn test_carousel_wraps_both_directions() {
        let mut cache = SuggestionCache::from_results(vec![
            make_suggestion("a"),
            make_suggestion("b"),
            make_suggestion("c"),
        ]);
        assert_eq!(cache.index(), 0);
        cache.prev();
        assert_eq!(cache.index(), 2);
        cache.next();
        assert_eq!(cache.index(), 0);
        cache.next();
        cache.next();
        cache.next();
        assert_eq!(cache.index(), 0);
    }

    #[test]
    fn test_carousel_inert_below_two_entries() {
        let mut cache = SuggestionCache::from_results(vec![make_suggestion("only")]);
        assert!(!cache.can_navigate());
        cache.next();
        cache.prev();
        assert_eq!(cache.index(), 0);

        let mut empty = SuggestionCache::default();
        empty.next();
        assert_eq!(empty.index(), 0);
        assert!(empty.current().is_none());
    }

    #[test]
    fn test_replace_rewinds_carousel() {
        let mut cache = SuggestionCache::from_results(vec![
            make_suggestion("a"),
            make_suggestion("b"),
        ]);
        cache.next();
        assert_eq!(cache.index(), 1);
        cache.replace(vec![make_suggestion("fresh")]);
        assert_eq!(cache.index(), 0);
        assert_eq!(cache.current().unwrap().name, "fresh");
    }

    #[test]
    fn test_persisted_results_round_trip_byte_identical() {
        let results = vec![make_suggestion("soup"), make_suggestion("stir fry")];
        let stored = serde_json::to_string(&results).unwrap();
        let rehydrated: Vec<RecipeSuggestion> = serde_json::from_str(&stored).unwrap();
        let stored_again = serde_json::to_string(&rehydrated).unwrap();
        assert_eq!(stored, stored_again);
        assert_eq!(SuggestionCache::from_results(rehydrated).index(), 0);
    }

    #[test]
    fn test_expiring_soon_window() {
        let items = vec![
            make_item("expired", Some(-1)),
            make_item("today", Some(0)),
            make_item("soon", Some(2)),
            make_item("later", Some(3)),
            make_item("no-expiry", None),
        ];
        let soon = expiring_soon(&items);
        let ids: Vec<&str> = soon.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["today", "soon"]);
    }

    #[test]
    fn test_favorite_filter() {
        let recipes = vec![
            Recipe {
                id: "1".to_string(),
                name: Some("kept".to_string()),
                link: None,
                ingredients: None,
                cleaned_ingredients: None,
                procedure: None,
            },
            Recipe {
                id: "2".to_string(),
                name: Some("dropped".to_string()),
                link: None,
                ingredients: None,
                cleaned_ingredients: None,
                procedure: None,
            },
        ];
        let favorites: HashSet<String> = ["1".to_string()].into_iter().collect();
        let kept = favorite_recipes(&recipes, &favorites);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "1");
    }
}
