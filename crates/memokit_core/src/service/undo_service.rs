//! Undo session use-case service.
//!
//! # Responsibility
//! - Pair one editor with one snapshot history.
//! - Offer capture/undo entry points that never expose stored item data.
//!
//! # Invariants
//! - `history_len()` equals successful captures minus successful restores.
//! - Undo on an empty history is a silent no-op.
//! - Capture and restore each mutate history and editor in one `&mut self`
//!   call, so they appear atomic to the owning session.

use crate::history::{History, HistoryError};
use crate::model::editor::Editor;
use crate::model::snapshot::{SnapshotId, SnapshotMeta};
use log::debug;

/// Reference to a captured snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotHandle {
    pub id: SnapshotId,
    /// Zero-based position in history at capture time.
    pub position: usize,
}

/// Editor plus its undo history.
#[derive(Debug, Clone)]
pub struct UndoSession<T> {
    editor: Editor<T>,
    history: History<T>,
}

impl<T: Clone> Default for UndoSession<T> {
    fn default() -> Self {
        Self::new(Editor::new())
    }
}

impl<T: Clone> UndoSession<T> {
    pub fn new(editor: Editor<T>) -> Self {
        Self {
            editor,
            history: History::new(),
        }
    }

    pub fn editor(&self) -> &Editor<T> {
        &self.editor
    }

    /// Mutable editor access for user-facing edits between captures.
    pub fn editor_mut(&mut self) -> &mut Editor<T> {
        &mut self.editor
    }

    /// Copies current editor items into a new snapshot and appends it.
    pub fn capture(&mut self, label: &str) -> SnapshotHandle {
        let snapshot = self.editor.snapshot(label);
        let handle = SnapshotHandle {
            id: snapshot.id(),
            position: self.history.len(),
        };
        self.history.push(snapshot);
        debug!(
            "event=snapshot_capture module=history status=ok position={} history_len={}",
            handle.position,
            self.history.len()
        );
        handle
    }

    /// Pops the most recent snapshot and restores the editor from it.
    ///
    /// Returns `None` without touching the editor when history is empty.
    pub fn restore(&mut self) -> Option<SnapshotMeta> {
        let Some(snapshot) = self.history.pop() else {
            debug!("event=snapshot_restore module=history status=noop reason=empty_history");
            return None;
        };
        let meta = snapshot.meta().clone();
        self.editor.restore(snapshot);
        debug!(
            "event=snapshot_restore module=history status=ok item_count={} history_len={}",
            meta.item_count,
            self.history.len()
        );
        Some(meta)
    }

    /// Discards every snapshot newer than `id`, then restores `id` itself.
    ///
    /// # Errors
    /// - `SnapshotNotFound` when `id` is not retained; nothing changes.
    pub fn restore_to(&mut self, id: SnapshotId) -> Result<SnapshotMeta, HistoryError> {
        let position = self
            .history
            .position(id)
            .ok_or(HistoryError::SnapshotNotFound(id))?;
        let discarded = self.history.truncate_to(position + 1);
        debug!("event=snapshot_discard module=history status=ok discarded={discarded}");
        self.restore().ok_or(HistoryError::SnapshotNotFound(id))
    }

    /// Metadata of every retained snapshot, oldest first.
    pub fn list_history(&self) -> Vec<SnapshotMeta> {
        self.history.list()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
