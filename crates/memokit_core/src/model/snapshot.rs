//! Snapshot model.
//!
//! # Responsibility
//! - Hold an immutable copy of editor items plus display metadata.
//! - Keep item data opaque to every holder except the editor.
//!
//! # Invariants
//! - A snapshot is never mutated after creation.
//! - `meta.item_count` always equals the number of stored items.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for one captured snapshot.
pub type SnapshotId = Uuid;

const DEFAULT_LABEL: &str = "snapshot";
const MAX_LABEL_CHARS: usize = 120;

/// Display metadata for one snapshot.
///
/// This is the only part of a snapshot visible outside the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub id: SnapshotId,
    /// Trimmed, non-empty, at most 120 characters.
    pub label: String,
    /// Unix epoch milliseconds.
    pub captured_at_ms: i64,
    pub item_count: usize,
}

/// Immutable captured copy of editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<T> {
    meta: SnapshotMeta,
    items: Vec<T>,
}

impl<T> Snapshot<T> {
    /// Builds a snapshot from an already-copied item vector.
    ///
    /// Only the editor creates snapshots.
    pub(crate) fn new(label: &str, items: Vec<T>) -> Self {
        Self {
            meta: SnapshotMeta {
                id: Uuid::new_v4(),
                label: normalize_label(label),
                captured_at_ms: now_epoch_ms(),
                item_count: items.len(),
            },
            items,
        }
    }

    pub fn id(&self) -> SnapshotId {
        self.meta.id
    }

    pub fn meta(&self) -> &SnapshotMeta {
        &self.meta
    }

    /// Consumes the snapshot and yields its stored items.
    pub(crate) fn into_items(self) -> Vec<T> {
        self.items
    }
}

fn normalize_label(label: &str) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return DEFAULT_LABEL.to_string();
    }
    trimmed.chars().take(MAX_LABEL_CHARS).collect()
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{normalize_label, Snapshot, MAX_LABEL_CHARS};

    #[test]
    fn blank_label_falls_back_to_default() {
        assert_eq!(normalize_label("   "), "snapshot");
        assert_eq!(normalize_label(""), "snapshot");
    }

    #[test]
    fn label_is_trimmed_and_truncated() {
        assert_eq!(normalize_label("  add circle "), "add circle");
        let long = "x".repeat(MAX_LABEL_CHARS + 10);
        assert_eq!(normalize_label(&long).chars().count(), MAX_LABEL_CHARS);
    }

    #[test]
    fn meta_tracks_item_count_and_unique_id() {
        let first = Snapshot::new("a", vec![1, 2, 3]);
        let second = Snapshot::new("a", vec![1, 2, 3]);
        assert_eq!(first.meta().item_count, 3);
        assert_ne!(first.id(), second.id());
        assert!(first.meta().captured_at_ms > 0);
        assert_eq!(first.into_items(), vec![1, 2, 3]);
    }
}
