//! Version history, independent of the undo cursor
//!
//! A bounded, most-recent-first list of labeled snapshots, created either by
//! an explicit user save or by the auto-save scheduler. Restoring a version
//! never rewinds the undo stack; it re-enters the snapshot as a brand-new
//! undoable entry.

use crate::history::HistoryStack;
use crate::{EngineError, EntryKind, PersistenceSink, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, warn};
use uuid::Uuid;

/// One saved version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionEntry<T> {
    /// Unique version id.
    pub id: Uuid,
    /// When the version was saved.
    pub timestamp: DateTime<Utc>,
    /// Human-readable label.
    pub label: String,
    /// The saved snapshot.
    pub state: T,
    /// Manual save or auto-save.
    pub kind: EntryKind,
}

/// Bounded store of saved versions (newest first).
///
/// Eviction is strict FIFO on `max_versions`, applied after every insertion
/// regardless of provenance; manual saves are not protected from eviction.
#[derive(Debug)]
pub struct VersionStore<T> {
    /// Saved versions, front = most recent.
    versions: VecDeque<VersionEntry<T>>,
    max_versions: usize,
    is_saving: bool,
    last_saved_at: Option<DateTime<Utc>>,
}

impl<T> VersionStore<T> {
    /// Create an empty store keeping at most `max_versions` entries.
    pub fn new(max_versions: usize) -> Self {
        Self {
            versions: VecDeque::new(),
            max_versions: max_versions.max(1),
            is_saving: false,
            last_saved_at: None,
        }
    }

    /// Save the given state as a manual version.
    ///
    /// The persistence sink runs first; only on success is a [`VersionEntry`]
    /// inserted at the head. On sink failure no entry is created, `is_saving`
    /// is reset and the error propagates to the caller.
    pub fn save_now(
        &mut self,
        label: impl Into<String>,
        state: T,
        sink: &mut dyn PersistenceSink<T>,
        now: DateTime<Utc>,
    ) -> Result<&VersionEntry<T>> {
        self.save_with_kind(label.into(), state, EntryKind::Manual, sink, now)
    }

    /// Save the given state as an automatic version.
    ///
    /// Identical to [`save_now`](Self::save_now) except for provenance; meant
    /// to be invoked by the auto-save scheduler, not by user actions.
    pub fn auto_save(
        &mut self,
        state: T,
        sink: &mut dyn PersistenceSink<T>,
        now: DateTime<Utc>,
    ) -> Result<&VersionEntry<T>> {
        self.save_with_kind("Auto save".to_string(), state, EntryKind::Auto, sink, now)
    }

    fn save_with_kind(
        &mut self,
        label: String,
        state: T,
        kind: EntryKind,
        sink: &mut dyn PersistenceSink<T>,
        now: DateTime<Utc>,
    ) -> Result<&VersionEntry<T>> {
        self.is_saving = true;
        if let Err(e) = sink.persist(&label, &state) {
            self.is_saving = false;
            warn!(label = %label, error = %e, "persistence sink rejected save");
            return Err(EngineError::Persistence(e));
        }
        self.is_saving = false;

        let entry = VersionEntry {
            id: Uuid::new_v4(),
            timestamp: now,
            label,
            state,
            kind,
        };
        debug!(id = %entry.id, label = %entry.label, ?kind, "version saved");
        self.versions.push_front(entry);

        // Trim to max size (FIFO: oldest out)
        while self.versions.len() > self.max_versions {
            if let Some(evicted) = self.versions.pop_back() {
                debug!(id = %evicted.id, label = %evicted.label, "version evicted");
            }
        }
        self.last_saved_at = Some(now);
        debug_assert!(self.versions.len() <= self.max_versions);

        Ok(&self.versions[0])
    }

    /// Re-enter a saved version as a new undoable history entry.
    ///
    /// The undo stack is never rewound or rewritten: the restored snapshot
    /// becomes a brand-new top-of-stack entry labeled `"Restored: <label>"`,
    /// so the restore itself is undoable. The version being restored from
    /// stays in the store untouched.
    pub fn restore_into(
        &self,
        id: Uuid,
        history: &mut HistoryStack<T>,
        now: DateTime<Utc>,
    ) -> Result<&VersionEntry<T>>
    where
        T: Clone,
    {
        let entry = self
            .get(id)
            .ok_or(EngineError::VersionNotFound(id))?;
        history.push(
            format!("Restored: {}", entry.label),
            entry.state.clone(),
            EntryKind::Manual,
            now,
        );
        debug!(id = %entry.id, label = %entry.label, "version restored");
        Ok(entry)
    }

    /// Remove a version from the store.
    ///
    /// Returns the removed entry, or [`EngineError::VersionNotFound`] if the
    /// id is unknown (the store is left unchanged).
    pub fn delete(&mut self, id: Uuid) -> Result<VersionEntry<T>> {
        let pos = self
            .versions
            .iter()
            .position(|v| v.id == id)
            .ok_or(EngineError::VersionNotFound(id))?;
        debug!(%id, "version deleted");
        self.versions
            .remove(pos)
            .ok_or(EngineError::VersionNotFound(id))
    }

    /// Look up a version by id.
    pub fn get(&self, id: Uuid) -> Option<&VersionEntry<T>> {
        self.versions.iter().find(|v| v.id == id)
    }

    /// All saved versions, newest first.
    pub fn versions(&self) -> &VecDeque<VersionEntry<T>> {
        &self.versions
    }

    /// The most recently saved version.
    pub fn latest(&self) -> Option<&VersionEntry<T>> {
        self.versions.front()
    }

    /// Number of stored versions.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// True while the persistence sink is running.
    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    /// When the last successful save completed, if any.
    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }
}
