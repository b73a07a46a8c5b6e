//! Semantic engine events
//!
//! The engine does not know about toasts, banners, or icons; it emits
//! semantic events that a UI layer subscribes to for rendering. Fan-out uses
//! unbounded channels, so emitting never blocks the engine.

use crate::EntryKind;
use crossbeam_channel::{unbounded, Receiver, Sender};
use uuid::Uuid;

/// Notification emitted by the engine after a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The undo stack changed (push, undo, redo, or restore).
    HistoryChanged {
        /// Whether undo is now available.
        can_undo: bool,
        /// Whether redo is now available.
        can_redo: bool,
    },
    /// A version was persisted and added to the store.
    VersionSaved {
        /// Id of the new version.
        id: Uuid,
        /// Manual save or auto-save.
        kind: EntryKind,
    },
    /// A version was re-entered into the history stack.
    VersionRestored {
        /// Id of the restored version.
        id: Uuid,
    },
    /// A version was removed from the store.
    VersionDeleted {
        /// Id of the deleted version.
        id: Uuid,
    },
    /// A manual or automatic save was rejected by the persistence sink.
    SaveFailed {
        /// Sink error description.
        reason: String,
    },
}

/// Fan-out hub for [`EngineEvent`]s.
///
/// Subscribers whose receiver has been dropped are pruned on the next emit.
#[derive(Debug, Default)]
pub struct EventHub {
    senders: Vec<Sender<EngineEvent>>,
}

impl EventHub {
    /// Create a hub with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        let (tx, rx) = unbounded();
        self.senders.push(tx);
        rx
    }

    /// Deliver an event to every live subscriber.
    pub fn emit(&mut self, event: EngineEvent) {
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Number of live subscribers as of the last emit.
    pub fn subscriber_count(&self) -> usize {
        self.senders.len()
    }
}
