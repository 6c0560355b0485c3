//! Desired left-to-right order of every displayable column, visible or not

use std::collections::HashSet;
use tracing::{debug, trace};

use crate::view::index_space::ViewIndex;

/// Remembers where the user wants each displayable column, so a column that
/// is shown again lands next to its intended neighbours instead of at the
/// end of the view.
///
/// Entries are unaliased column names, which are unique within a model.
#[derive(Debug, Clone, Default)]
pub struct IntendedOrderTracker {
    order: Vec<String>,
}

impl IntendedOrderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over from the natural order
    pub fn reset(&mut self, displayable: &[String]) {
        self.order = displayable.to_vec();
    }

    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.order.iter().position(|n| n == name)
    }

    /// Reconcile with the current displayable columns: names that are no
    /// longer displayable are dropped, new ones are appended.
    pub fn sync(&mut self, displayable: &[String]) {
        let known: HashSet<&str> = displayable.iter().map(String::as_str).collect();
        self.order.retain(|name| known.contains(name.as_str()));

        let present: HashSet<String> = self.order.iter().cloned().collect();
        for name in displayable {
            if !present.contains(name) {
                trace!(target: "order", "Appending new column '{}' to intended order", name);
                self.order.push(name.clone());
            }
        }
    }

    /// True when the intended order is the natural total-index order
    pub fn is_native(&self, displayable: &[String]) -> bool {
        self.order == displayable
    }

    /// Where among the visible columns `name` should be inserted when it is
    /// shown again: right after the nearest preceding column in intended
    /// order that is currently visible, position 0 when none precedes it,
    /// or the end when the tracker does not know the column.
    pub fn insertion_point_for<F>(&self, name: &str, view_index_of: F, view_count: usize) -> ViewIndex
    where
        F: Fn(&str) -> Option<ViewIndex>,
    {
        let Some(position) = self.position(name) else {
            return ViewIndex(view_count);
        };

        self.order[..position]
            .iter()
            .rev()
            .find_map(|candidate| view_index_of(candidate))
            .map(|view| ViewIndex(view.0 + 1))
            .unwrap_or(ViewIndex(0))
    }

    /// Replace the intended order. Names that are not displayable (or that
    /// repeat) are skipped; displayable columns not mentioned keep their
    /// relative order after the mentioned ones.
    pub fn set_order<S: AsRef<str>>(&mut self, names: &[S], displayable: &[String]) {
        self.sync(displayable);

        let known: HashSet<&str> = displayable.iter().map(String::as_str).collect();
        let mut mentioned: Vec<String> = Vec::with_capacity(self.order.len());
        let mut seen: HashSet<&str> = HashSet::new();

        for name in names {
            let name = name.as_ref();
            if !known.contains(name) {
                debug!(target: "order", "Skipping unknown column '{}' in column order", name);
                continue;
            }
            if seen.insert(name) {
                mentioned.push(name.to_string());
            }
        }

        let rest: Vec<String> = self
            .order
            .iter()
            .filter(|name| !seen.contains(name.as_str()))
            .cloned()
            .collect();

        mentioned.extend(rest);
        self.order = mentioned;
    }

    /// Remove a column, returning the position it held
    pub fn remove(&mut self, name: &str) -> Option<usize> {
        let position = self.position(name)?;
        self.order.remove(position);
        Some(position)
    }

    /// Add a column at `position` (clamped to the end). A name already
    /// present is moved.
    pub fn add(&mut self, name: &str, position: usize) {
        self.remove(name);
        let position = position.min(self.order.len());
        self.order.insert(position, name.to_string());
    }

    /// Replace a name in place
    pub fn rename(&mut self, old_name: &str, new_name: &str) {
        match self.remove(old_name) {
            Some(position) => self.add(new_name, position),
            None => trace!(target: "order", "Rename of untracked column '{}'", old_name),
        }
    }

    /// Learn from a user reorder: `name` now sits between `preceding` and
    /// `following` among the visible columns.
    pub fn column_moved(&mut self, name: &str, preceding: Option<&str>, following: Option<&str>) {
        let Some(original) = self.remove(name) else {
            return;
        };

        let target = if let Some(position) = preceding.and_then(|p| self.position(p)) {
            position + 1
        } else if let Some(position) = following.and_then(|f| self.position(f)) {
            position
        } else {
            original
        };

        self.add(name, target);
        debug!(target: "order", "Intended order now {:?}", self.order);
    }

    /// Names to persist, or `None` when the order is native and not worth
    /// storing
    pub fn to_ordered_name_list(&self, displayable: &[String]) -> Option<Vec<String>> {
        if self.is_native(displayable) {
            None
        } else {
            Some(self.order.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_native_after_reset() {
        let displayable = names(&["A", "B", "C"]);
        let mut tracker = IntendedOrderTracker::new();
        tracker.reset(&displayable);
        assert!(tracker.is_native(&displayable));
        assert_eq!(tracker.to_ordered_name_list(&displayable), None);
    }

    #[test]
    fn test_set_order_skips_unknown_and_appends_rest() {
        let displayable = names(&["A", "B", "C", "D"]);
        let mut tracker = IntendedOrderTracker::new();
        tracker.reset(&displayable);
        tracker.set_order(&["C", "ghost", "A", "C"], &displayable);
        assert_eq!(tracker.names(), names(&["C", "A", "B", "D"]).as_slice());
        assert_eq!(
            tracker.to_ordered_name_list(&displayable),
            Some(names(&["C", "A", "B", "D"]))
        );
    }

    #[test]
    fn test_insertion_point_uses_nearest_visible_predecessor() {
        let displayable = names(&["D", "B", "A", "C"]);
        let mut tracker = IntendedOrderTracker::new();
        tracker.reset(&displayable);

        // view is [D, C]
        let view = |name: &str| match name {
            "D" => Some(ViewIndex(0)),
            "C" => Some(ViewIndex(1)),
            _ => None,
        };
        assert_eq!(tracker.insertion_point_for("A", view, 2), ViewIndex(1));
        assert_eq!(tracker.insertion_point_for("D", view, 2), ViewIndex(0));
        assert_eq!(tracker.insertion_point_for("unknown", view, 2), ViewIndex(2));
    }

    #[test]
    fn test_sync_appends_new_and_drops_missing() {
        let mut tracker = IntendedOrderTracker::new();
        tracker.reset(&names(&["B", "A", "C"]));
        tracker.sync(&names(&["A", "C", "E"]));
        assert_eq!(tracker.names(), names(&["A", "C", "E"]).as_slice());
    }

    #[test]
    fn test_rename_keeps_position() {
        let mut tracker = IntendedOrderTracker::new();
        tracker.reset(&names(&["A", "B", "C"]));
        tracker.rename("B", "Beta");
        assert_eq!(tracker.names(), names(&["A", "Beta", "C"]).as_slice());
    }

    #[test]
    fn test_column_moved_places_after_predecessor() {
        let mut tracker = IntendedOrderTracker::new();
        tracker.reset(&names(&["A", "B", "C", "D"]));

        tracker.column_moved("A", Some("C"), Some("D"));
        assert_eq!(tracker.names(), names(&["B", "C", "A", "D"]).as_slice());

        tracker.column_moved("D", None, Some("B"));
        assert_eq!(tracker.names(), names(&["D", "B", "C", "A"]).as_slice());
    }
}
