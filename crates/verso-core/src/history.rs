//! History management for Undo/Redo
//!
//! A single-branch, cursor-based stack of labeled state snapshots. New edits
//! truncate any redoable future, and the oldest entries are evicted once the
//! configured window is exceeded.

use crate::EntryKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// One labeled snapshot in the history stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry<T> {
    /// Unique entry id.
    pub id: Uuid,
    /// Creation instant.
    pub timestamp: DateTime<Utc>,
    /// Human-readable description of the change (e.g. "Changed font size").
    pub label: String,
    /// The snapshot itself. Treated as immutable once stored.
    pub state: T,
    /// Provenance of the entry.
    pub kind: EntryKind,
}

impl<T> HistoryEntry<T> {
    fn new(label: String, state: T, kind: EntryKind, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: now,
            label,
            state,
            kind,
        }
    }
}

/// Manages the history of application states.
///
/// The stack always holds at least the initial entry, and the cursor always
/// points at a valid entry, so `current()` never fails. `undo`/`redo` at the
/// stack boundary are defined as no-ops, never errors.
#[derive(Debug)]
pub struct HistoryStack<T> {
    entries: Vec<HistoryEntry<T>>,
    index: usize,
    max_history: usize,
}

impl<T> HistoryStack<T> {
    /// Create a new history stack seeded with the initial state.
    ///
    /// `max_history` values below 1 are clamped to 1 so the initial entry
    /// always fits.
    pub fn new(
        max_history: usize,
        label: impl Into<String>,
        state: T,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            entries: vec![HistoryEntry::new(
                label.into(),
                state,
                EntryKind::Manual,
                now,
            )],
            index: 0,
            max_history: max_history.max(1),
        }
    }

    /// Commit a new state on top of the cursor.
    ///
    /// Any entries after the cursor (the abandoned "future" branch) are
    /// discarded, so `can_redo` is always false afterwards. If the stack
    /// exceeds `max_history`, the oldest entry is evicted from the head.
    pub fn push(
        &mut self,
        label: impl Into<String>,
        state: T,
        kind: EntryKind,
        now: DateTime<Utc>,
    ) -> &HistoryEntry<T> {
        // Drop the redoable future before appending.
        self.entries.truncate(self.index + 1);

        let entry = HistoryEntry::new(label.into(), state, kind, now);
        debug!(label = %entry.label, "history push");
        self.entries.push(entry);

        if self.entries.len() > self.max_history {
            self.entries.remove(0);
        }
        self.index = self.entries.len() - 1;
        debug_assert!(self.entries.len() <= self.max_history);

        &self.entries[self.index]
    }

    /// Undo the last change.
    ///
    /// Returns the state that becomes current, or `None` at the stack
    /// boundary (safe to call unconditionally).
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(&self.entries[self.index].state)
    }

    /// Redo the last undone change.
    ///
    /// Returns the state that becomes current, or `None` at the stack
    /// boundary (safe to call unconditionally).
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(&self.entries[self.index].state)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// The entry the cursor points at.
    pub fn current(&self) -> &HistoryEntry<T> {
        &self.entries[self.index]
    }

    /// The state the cursor points at.
    pub fn current_state(&self) -> &T {
        &self.entries[self.index].state
    }

    /// Cursor position within the stack.
    pub fn index(&self) -> usize {
        self.index
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry<T>] {
        &self.entries
    }

    /// Number of entries in the stack.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the stack retains at least the initial entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all history except the current entry.
    pub fn clear(&mut self) {
        let current = self.entries.swap_remove(self.index);
        self.entries.clear();
        self.entries.push(current);
        self.index = 0;
    }
}
