//! Snapshot history (undo stack).
//!
//! # Responsibility
//! - Retain snapshots in strict insertion order.
//! - Hand back only the tail snapshot for undo.
//! - Expose metadata without exposing item data.
//!
//! # Invariants
//! - Append-only except for tail removal.
//! - No deduplication: structurally equal snapshots are retained separately.

use crate::model::snapshot::{Snapshot, SnapshotId, SnapshotMeta};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Ordered sequence of snapshots for one editor.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<Snapshot<T>>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> History<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: Snapshot<T>) {
        self.entries.push(snapshot);
    }

    /// Removes and returns the most recently pushed snapshot.
    pub fn pop(&mut self) -> Option<Snapshot<T>> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_meta(&self) -> Option<&SnapshotMeta> {
        self.entries.last().map(Snapshot::meta)
    }

    /// Returns metadata for every retained snapshot, oldest first.
    pub fn list(&self) -> Vec<SnapshotMeta> {
        self.entries
            .iter()
            .map(|snapshot| snapshot.meta().clone())
            .collect()
    }

    /// Returns the zero-based position of `id`, if retained.
    pub fn position(&self, id: SnapshotId) -> Option<usize> {
        self.entries.iter().position(|snapshot| snapshot.id() == id)
    }

    /// Drops tail entries until at most `len` remain; returns dropped count.
    pub fn truncate_to(&mut self, len: usize) -> usize {
        let removed = self.entries.len().saturating_sub(len);
        self.entries.truncate(len);
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// History lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    SnapshotNotFound(SnapshotId),
}

impl Display for HistoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SnapshotNotFound(id) => write!(f, "snapshot not found in history: {id}"),
        }
    }
}

impl Error for HistoryError {}

#[cfg(test)]
mod tests {
    use super::History;
    use crate::model::editor::Editor;

    #[test]
    fn pop_returns_tail_in_reverse_insertion_order() {
        let mut editor = Editor::new();
        let mut history = History::new();
        history.push(editor.snapshot("empty"));
        editor.add_item(1);
        history.push(editor.snapshot("one"));

        assert_eq!(history.pop().expect("tail").meta().label, "one");
        assert_eq!(history.pop().expect("head").meta().label, "empty");
        assert!(history.pop().is_none());
    }

    #[test]
    fn list_preserves_insertion_order_without_dedup() {
        let editor = Editor::with_items(vec!["same"]);
        let mut history = History::new();
        history.push(editor.snapshot("first"));
        history.push(editor.snapshot("second"));

        let labels: Vec<_> = history.list().into_iter().map(|meta| meta.label).collect();
        assert_eq!(labels, ["first", "second"]);
        assert_eq!(history.last_meta().expect("tail meta").label, "second");
    }

    #[test]
    fn position_and_truncate() {
        let editor = Editor::with_items(vec![0u8]);
        let mut history = History::new();
        for label in ["a", "b", "c"] {
            history.push(editor.snapshot(label));
        }
        let b_id = history.list()[1].id;
        assert_eq!(history.position(b_id), Some(1));

        assert_eq!(history.truncate_to(1), 2);
        assert_eq!(history.len(), 1);
        assert_eq!(history.position(b_id), None);
        assert_eq!(history.truncate_to(5), 0);
    }
}
