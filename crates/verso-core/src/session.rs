//! Editing session wiring
//!
//! [`EditorSession`] ties the pieces together the way an editing surface uses
//! them: edits go through [`push`](EditorSession::push), a periodic
//! [`tick`](EditorSession::tick) drives the debounced auto-save, and manual
//! save/restore/delete operate on the version store. Each session exclusively
//! owns its stack and store; they are never shared across surfaces.

use crate::autosave::AutoSaveScheduler;
use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::events::{EngineEvent, EventHub};
use crate::history::HistoryStack;
use crate::version_store::VersionStore;
use crate::{EngineError, EntryKind, PersistenceSink, Result};
use crossbeam_channel::Receiver;
use tracing::{debug, warn};
use uuid::Uuid;

/// One editing surface's history, versions, and auto-save plumbing.
pub struct EditorSession<T> {
    history: HistoryStack<T>,
    versions: VersionStore<T>,
    scheduler: AutoSaveScheduler,
    sink: Box<dyn PersistenceSink<T>>,
    clock: Box<dyn Clock>,
    events: EventHub,
    config: EngineConfig,
    closed: bool,
}

impl<T: Clone> EditorSession<T> {
    /// Create a session seeded with the surface's initial state.
    pub fn new(
        initial_label: impl Into<String>,
        initial_state: T,
        config: EngineConfig,
        sink: impl PersistenceSink<T> + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        let clock: Box<dyn Clock> = Box::new(clock);
        let now = clock.now();
        Self {
            history: HistoryStack::new(config.max_history, initial_label, initial_state, now),
            versions: VersionStore::new(config.max_versions),
            scheduler: AutoSaveScheduler::new(config.idle_period()),
            sink: Box::new(sink),
            clock,
            events: EventHub::new(),
            config,
            closed: false,
        }
    }

    /// Subscribe to engine events.
    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        self.events.subscribe()
    }

    /// Commit a new application state as an undoable entry.
    ///
    /// Restarts the auto-save idle window. Ignored after [`close`](Self::close).
    pub fn push(&mut self, label: impl Into<String>, state: T) {
        if self.closed {
            return;
        }
        let now = self.clock.now();
        self.history.push(label, state, EntryKind::Manual, now);
        self.scheduler.note_change(now);
        self.emit_history_changed();
    }

    /// Step the cursor back one entry.
    ///
    /// Returns the state that becomes current, or `None` at the boundary
    /// (a no-op, never an error).
    pub fn undo(&mut self) -> Option<&T> {
        if self.closed || self.history.undo().is_none() {
            return None;
        }
        let now = self.clock.now();
        self.scheduler.note_change(now);
        self.emit_history_changed();
        Some(self.history.current_state())
    }

    /// Step the cursor forward one entry.
    ///
    /// Returns the state that becomes current, or `None` at the boundary.
    pub fn redo(&mut self) -> Option<&T> {
        if self.closed || self.history.redo().is_none() {
            return None;
        }
        let now = self.clock.now();
        self.scheduler.note_change(now);
        self.emit_history_changed();
        Some(self.history.current_state())
    }

    /// Drive the auto-save debounce.
    ///
    /// Call periodically (e.g. once per UI tick). Fires at most one auto-save
    /// per idle window; returns true if a version was written. A sink failure
    /// is transient: it is logged, surfaced as [`EngineEvent::SaveFailed`],
    /// and the next edit re-arms the timer.
    pub fn tick(&mut self) -> bool {
        if self.closed {
            return false;
        }
        let now = self.clock.now();
        if !self.scheduler.poll(now) {
            return false;
        }

        let state = self.history.current_state().clone();
        match self.versions.auto_save(state, self.sink.as_mut(), now) {
            Ok(entry) => {
                let id = entry.id;
                debug!(%id, "auto-save complete");
                self.events.emit(EngineEvent::VersionSaved {
                    id,
                    kind: EntryKind::Auto,
                });
                true
            }
            Err(e) => {
                warn!(error = %e, "auto-save failed");
                self.events.emit(EngineEvent::SaveFailed {
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    /// Save the current state as a manual version.
    ///
    /// Bypasses the idle timer. The persistence failure, if any, propagates
    /// to the caller after being surfaced as an event.
    pub fn save_now(&mut self, label: impl Into<String>) -> Result<Uuid> {
        if self.closed {
            return Err(EngineError::Closed);
        }
        let now = self.clock.now();
        let state = self.history.current_state().clone();
        match self.versions.save_now(label, state, self.sink.as_mut(), now) {
            Ok(entry) => {
                let id = entry.id;
                self.events.emit(EngineEvent::VersionSaved {
                    id,
                    kind: EntryKind::Manual,
                });
                Ok(id)
            }
            Err(e) => {
                self.events.emit(EngineEvent::SaveFailed {
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Re-enter a saved version as a new undoable history entry.
    ///
    /// The restore itself is undoable; history between now and the restored
    /// point stays intact. The version store is left unchanged.
    pub fn restore_version(&mut self, id: Uuid) -> Result<()> {
        if self.closed {
            return Err(EngineError::Closed);
        }
        let now = self.clock.now();
        self.versions.restore_into(id, &mut self.history, now)?;
        self.scheduler.note_change(now);
        self.events.emit(EngineEvent::VersionRestored { id });
        self.emit_history_changed();
        Ok(())
    }

    /// Remove a version from the store.
    pub fn delete_version(&mut self, id: Uuid) -> Result<()> {
        if self.closed {
            return Err(EngineError::Closed);
        }
        self.versions.delete(id)?;
        self.events.emit(EngineEvent::VersionDeleted { id });
        Ok(())
    }

    /// Tear the session down: cancels any pending auto-save and rejects
    /// further mutating operations.
    pub fn close(&mut self) {
        self.scheduler.cancel();
        self.closed = true;
    }

    /// The current application state.
    pub fn current_state(&self) -> &T {
        self.history.current_state()
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Read access to the undo stack.
    pub fn history(&self) -> &HistoryStack<T> {
        &self.history
    }

    /// Read access to the version store.
    pub fn versions(&self) -> &VersionStore<T> {
        &self.versions
    }

    /// The session configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// True once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn emit_history_changed(&mut self) {
        self.events.emit(EngineEvent::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        });
    }
}
