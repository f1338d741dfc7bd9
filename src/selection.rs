//! Selection Manager
//!
//! Tracks the set of item ids picked for bulk operations. The set is only
//! meaningful while selection mode is on; leaving the mode always empties it.

use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    selecting: bool,
    selected: HashSet<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    /// Enter or leave selection mode. Both directions reset the set, so a
    /// fresh session never inherits stale picks.
    pub fn toggle_mode(&mut self) {
        self.selecting = !self.selecting;
        self.selected.clear();
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Replace the set with every id currently surviving the view pipeline.
    /// Selection tracks the filtered view, not the full collection; picks can
    /// outlive a later filter change that hides their items.
    pub fn select_all<I>(&mut self, visible_ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.selected = visible_ids.into_iter().collect();
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Leave selection mode after a bulk operation, dropping every pick.
    pub fn finish(&mut self) {
        self.selecting = false;
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_mode_clears_selection() {
        let mut state = SelectionState::new();
        state.toggle_mode();
        state.toggle("a");
        state.toggle("b");
        assert_eq!(state.count(), 2);

        state.toggle_mode();
        assert!(!state.is_selecting());
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn test_toggle_individual_ids() {
        let mut state = SelectionState::new();
        state.toggle_mode();
        state.toggle("a");
        assert!(state.is_selected("a"));
        state.toggle("a");
        assert!(!state.is_selected("a"));
    }

    #[test]
    fn test_select_all_takes_the_narrowed_view() {
        let mut state = SelectionState::new();
        state.toggle_mode();
        state.toggle("hidden-by-filter");

        // "Select all" after a filter narrowed the view replaces the set with
        // exactly the visible ids.
        state.select_all(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(state.count(), 2);
        assert!(state.is_selected("a"));
        assert!(state.is_selected("b"));
        assert!(!state.is_selected("hidden-by-filter"));
    }

    #[test]
    fn test_finish_exits_mode_and_empties() {
        let mut state = SelectionState::new();
        state.toggle_mode();
        state.select_all(vec!["a".to_string()]);
        state.finish();
        assert!(!state.is_selecting());
        assert_eq!(state.count(), 0);
    }
}
