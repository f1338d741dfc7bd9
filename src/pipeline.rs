//! View Pipeline
//!
//! Pure filter → sort → paginate transformation applied to the raw
//! collections before display. Deterministic and order-preserving for
//! identical inputs; no signals, no side effects.

use std::collections::HashSet;

use crate::models::{ExpiryStatus, FridgeItem, Recipe};

/// Fixed page size of the recipe grid.
pub const RECIPES_PER_PAGE: usize = 6;

/// One expiry tag of the filter dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpiryFilter {
    All,
    Expired,
    NearExpiry,
    Good,
}

impl ExpiryFilter {
    fn matches(&self, item: &FridgeItem) -> bool {
        match self {
            ExpiryFilter::All => true,
            ExpiryFilter::Expired => item.expiry_status() == ExpiryStatus::Expired,
            ExpiryFilter::NearExpiry => item.expiry_status() == ExpiryStatus::NearExpiry,
            ExpiryFilter::Good => item.expiry_status() == ExpiryStatus::Good,
        }
    }
}

/// Active expiry tags. Never empty: deselecting the last concrete tag falls
/// back to `All`, and selecting `All` clears the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpiryFilterSet {
    active: HashSet<ExpiryFilter>,
}

impl Default for ExpiryFilterSet {
    fn default() -> Self {
        let mut active = HashSet::new();
        active.insert(ExpiryFilter::All);
        Self { active }
    }
}

impl ExpiryFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, filter: ExpiryFilter) -> bool {
        self.active.contains(&filter)
    }

    pub fn toggle(&mut self, filter: ExpiryFilter) {
        if filter == ExpiryFilter::All {
            self.active.clear();
            self.active.insert(ExpiryFilter::All);
            return;
        }
        self.active.remove(&ExpiryFilter::All);
        if !self.active.remove(&filter) {
            self.active.insert(filter);
        }
        if self.active.is_empty() {
            self.active.insert(ExpiryFilter::All);
        }
    }

    /// An item passes when `All` is active or any active tag matches it.
    pub fn allows(&self, item: &FridgeItem) -> bool {
        if self.active.contains(&ExpiryFilter::All) {
            return true;
        }
        self.active.iter().any(|filter| filter.matches(item))
    }
}

/// Case-insensitive substring match on the name. Items without a name never
/// match, not even the empty query.
fn matches_query(name: Option<&str>, query: &str) -> bool {
    match name {
        Some(name) => name.to_lowercase().contains(&query.to_lowercase()),
        None => false,
    }
}

fn days_sort_key(item: &FridgeItem) -> i64 {
    // Undefined expiry sorts after every concrete day count.
    item.days_until_expiration.map(i64::from).unwrap_or(i64::MAX)
}

/// Filter and sort the fridge collection for display.
///
/// Sort keys, in order: expiry bucket (expired < near-expiry < good), raw day
/// count ascending with undefined last, then name.
pub fn visible_items(
    items: &[FridgeItem],
    query: &str,
    filters: &ExpiryFilterSet,
) -> Vec<FridgeItem> {
    let mut visible: Vec<FridgeItem> = items
        .iter()
        .filter(|item| matches_query(item.name.as_deref(), query))
        .filter(|item| filters.allows(item))
        .cloned()
        .collect();
    visible.sort_by(|a, b| {
        a.expiry_status()
            .cmp(&b.expiry_status())
            .then_with(|| days_sort_key(a).cmp(&days_sort_key(b)))
            .then_with(|| a.name.as_deref().unwrap_or("").cmp(b.name.as_deref().unwrap_or("")))
    });
    visible
}

/// Filter and sort the recipe catalog for display. Recipes sort by name only.
pub fn visible_recipes(recipes: &[Recipe], query: &str) -> Vec<Recipe> {
    let mut visible: Vec<Recipe> = recipes
        .iter()
        .filter(|recipe| matches_query(recipe.name.as_deref(), query))
        .cloned()
        .collect();
    visible.sort_by(|a, b| {
        a.name
            .as_deref()
            .unwrap_or("")
            .cmp(b.name.as_deref().unwrap_or(""))
    });
    visible
}

pub fn page_count(total: usize) -> usize {
    total.div_ceil(RECIPES_PER_PAGE)
}

/// Slice out one page of an already filtered and sorted list. Pages are
/// 1-based, matching the pagination label.
pub fn page_slice(recipes: &[Recipe], page: usize) -> &[Recipe] {
    let start = page.saturating_sub(1) * RECIPES_PER_PAGE;
    if start >= recipes.len() {
        return &[];
    }
    let end = (start + RECIPES_PER_PAGE).min(recipes.len());
    &recipes[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(id: &str, name: &str, days: Option<i32>) -> FridgeItem {
        FridgeItem {
            id: id.to_string(),
            name: Some(name.to_string()),
            quantity: 1,
            date_added: None,
            use_by: None,
            days_until_expiration: days,
            out_of_date: None,
        }
    }

    fn make_recipe(id: &str, name: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: Some(name.to_string()),
            link: None,
            ingredients: None,
            cleaned_ingredients: None,
            procedure: None,
        }
    }

    #[test]
    fn test_sort_expired_then_near_then_good() {
        // A expires tomorrow, B has no expiry, C expired yesterday.
        let items = vec![
            make_item("a", "apples", Some(1)),
            make_item("b", "baking soda", None),
            make_item("c", "cream", Some(-1)),
        ];
        let visible = visible_items(&items, "", &ExpiryFilterSet::new());
        let order: Vec<&str> = visible.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_sort_total_order_with_day_counts() {
        let items = vec![
            make_item("u", "u", None),
            make_item("x", "x", Some(5)),
            make_item("y", "y", Some(0)),
            make_item("z", "z", Some(-1)),
        ];
        let visible = visible_items(&items, "", &ExpiryFilterSet::new());
        let days: Vec<Option<i32>> = visible.iter().map(|i| i.days_until_expiration).collect();
        assert_eq!(days, vec![Some(-1), Some(0), Some(5), None]);
    }

    #[test]
    fn test_sort_ties_break_by_name() {
        let items = vec![
            make_item("2", "pear", Some(1)),
            make_item("1", "apple", Some(1)),
        ];
        let visible = visible_items(&items, "", &ExpiryFilterSet::new());
        assert_eq!(visible[0].id, "1");
        assert_eq!(visible[1].id, "2");
    }

    #[test]
    fn test_query_is_case_insensitive_and_excludes_unnamed() {
        let mut items = vec![make_item("a", "Greek Yogurt", Some(4))];
        items.push(FridgeItem {
            name: None,
            ..make_item("b", "", Some(4))
        });
        let visible = visible_items(&items, "yog", &ExpiryFilterSet::new());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "a");

        // Unnamed items are excluded even with an empty query.
        let visible = visible_items(&items, "", &ExpiryFilterSet::new());
        assert_eq!(visible.len(), 1);
    }

    #[test]
    fn test_filter_toggle_never_leaves_empty_set() {
        let mut filters = ExpiryFilterSet::new();
        assert!(filters.is_active(ExpiryFilter::All));

        filters.toggle(ExpiryFilter::Expired);
        assert!(!filters.is_active(ExpiryFilter::All));
        assert!(filters.is_active(ExpiryFilter::Expired));

        // Deselecting the last concrete tag falls back to All.
        filters.toggle(ExpiryFilter::Expired);
        assert!(filters.is_active(ExpiryFilter::All));
    }

    #[test]
    fn test_selecting_all_clears_concrete_tags() {
        let mut filters = ExpiryFilterSet::new();
        filters.toggle(ExpiryFilter::Expired);
        filters.toggle(ExpiryFilter::NearExpiry);
        filters.toggle(ExpiryFilter::All);
        assert!(filters.is_active(ExpiryFilter::All));
        assert!(!filters.is_active(ExpiryFilter::Expired));
        assert!(!filters.is_active(ExpiryFilter::NearExpiry));
    }

    #[test]
    fn test_adding_a_tag_never_shrinks_the_result() {
        let items = vec![
            make_item("a", "a", Some(-3)),
            make_item("b", "b", Some(1)),
            make_item("c", "c", Some(9)),
            make_item("d", "d", None),
        ];
        let mut filters = ExpiryFilterSet::new();
        filters.toggle(ExpiryFilter::Expired);
        let narrow = visible_items(&items, "", &filters).len();
        filters.toggle(ExpiryFilter::Good);
        let wider = visible_items(&items, "", &filters).len();
        assert!(wider >= narrow);
        assert_eq!(narrow, 1);
        assert_eq!(wider, 3);
    }

    #[test]
    fn test_good_tag_includes_undefined_expiry() {
        let items = vec![make_item("a", "a", None), make_item("b", "b", Some(3))];
        let mut filters = ExpiryFilterSet::new();
        filters.toggle(ExpiryFilter::Good);
        assert_eq!(visible_items(&items, "", &filters).len(), 2);
    }

    #[test]
    fn test_recipes_sort_by_name() {
        let recipes = vec![
            make_recipe("1", "Tiramisu"),
            make_recipe("2", "Borscht"),
            make_recipe("3", "Moussaka"),
        ];
        let visible = visible_recipes(&recipes, "");
        let names: Vec<&str> = visible
            .iter()
            .map(|r| r.name.as_deref().unwrap())
            .collect();
        assert_eq!(names, vec!["Borscht", "Moussaka", "Tiramisu"]);
    }

    #[test]
    fn test_pagination_slices() {
        let recipes: Vec<Recipe> = (0..8)
            .map(|i| make_recipe(&i.to_string(), &format!("recipe {i}")))
            .collect();
        assert_eq!(page_count(recipes.len()), 2);
        assert_eq!(page_slice(&recipes, 1).len(), 6);
        assert_eq!(page_slice(&recipes, 2).len(), 2);
        assert!(page_slice(&recipes, 3).is_empty());
        assert_eq!(page_count(0), 0);
    }
}
