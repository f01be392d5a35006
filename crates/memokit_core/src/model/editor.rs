//! Editor subject.
//!
//! # Responsibility
//! - Own the mutable item collection edited by user-facing operations.
//! - Produce snapshots of its state and restore from them.
//!
//! # Invariants
//! - `snapshot()` deep-copies items; later edits never reach a stored snapshot.
//! - `restore()` replaces the whole collection, never merges.

use crate::model::snapshot::Snapshot;

/// Mutable owner of a collection of domain items (shapes, settings, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor<T> {
    items: Vec<T>,
}

impl<T> Default for Editor<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Clone> Editor<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add_item(&mut self, item: T) {
        self.items.push(item);
    }

    /// Inserts at `index`, clamped to the current length.
    pub fn insert_item(&mut self, index: usize, item: T) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    /// Removes the item at `index`, or returns `None` when out of range.
    pub fn remove_item(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Captures the current items into a new immutable snapshot.
    pub fn snapshot(&self, label: &str) -> Snapshot<T> {
        Snapshot::new(label, self.items.clone())
    }

    /// Replaces current items with the snapshot's stored items.
    pub fn restore(&mut self, snapshot: Snapshot<T>) {
        self.items = snapshot.into_items();
    }
}

#[cfg(test)]
mod tests {
    use super::Editor;

    #[test]
    fn snapshot_is_isolated_from_later_edits() {
        let mut editor = Editor::new();
        editor.add_item("Circle".to_string());
        let snapshot = editor.snapshot("one shape");

        editor.add_item("Rectangle".to_string());
        editor.clear();
        assert!(editor.is_empty());

        editor.restore(snapshot);
        assert_eq!(editor.items(), ["Circle".to_string()]);
    }

    #[test]
    fn insert_clamps_and_remove_out_of_range_is_none() {
        let mut editor = Editor::with_items(vec![1, 2]);
        editor.insert_item(99, 3);
        editor.insert_item(0, 0);
        assert_eq!(editor.items(), [0, 1, 2, 3]);

        assert_eq!(editor.remove_item(1), Some(1));
        assert_eq!(editor.remove_item(10), None);
        assert_eq!(editor.len(), 3);
    }

    #[test]
    fn restore_replaces_instead_of_merging() {
        let mut editor = Editor::with_items(vec!["a"]);
        let snapshot = editor.snapshot("a only");
        editor.set_items(vec!["b", "c"]);

        editor.restore(snapshot);
        assert_eq!(editor.items(), ["a"]);
    }
}
