//! Verso Core - History and Versioning Engine
//!
//! This crate contains the state-history engine that backs Verso's editing
//! surfaces, including:
//! - Bounded undo/redo stack with branch truncation
//! - Labeled version history (manual and automatic saves)
//! - Debounced auto-save scheduling over an injected clock
//! - Semantic event notifications for UI layers
//!
//! The engine is a pure in-process module: persistence and time are injected
//! collaborators (see [`PersistenceSink`] and [`Clock`]), so the core never
//! touches the file system or the ambient wall clock on its own.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod autosave;
pub mod clock;
pub mod config;
pub mod events;
pub mod history;
pub mod session;
pub mod version_store;

// --- Re-exports grouped by category ---

// History & Versions
pub use history::{HistoryEntry, HistoryStack};
pub use version_store::{VersionEntry, VersionStore};

// Scheduling & Time
pub use autosave::AutoSaveScheduler;
pub use clock::{Clock, ManualClock, SystemClock};

// Session wiring
pub use config::EngineConfig;
pub use events::{EngineEvent, EventHub};
pub use session::EditorSession;

/// Provenance of a history or version entry.
///
/// Provenance is informational only; it never changes stack or store
/// mechanics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// Created by a direct user action.
    Manual,
    /// Created by the auto-save scheduler.
    Auto,
}

/// Error type returned by a persistence sink.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// A side-effecting destination for saved snapshots.
///
/// The engine is agnostic to whether this writes to local storage, a remote
/// API, or a file; it only needs a completion signal. A failed `persist`
/// leaves the engine's stores untouched.
pub trait PersistenceSink<T> {
    /// Persist one labeled snapshot. Called synchronously by
    /// [`VersionStore`] during manual and automatic saves.
    fn persist(&mut self, label: &str, state: &T) -> std::result::Result<(), SinkError>;
}

/// Core engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    /// A version id passed to restore/delete does not exist in the store.
    #[error("version not found: {0}")]
    VersionNotFound(Uuid),

    /// The injected persistence sink rejected a save. Transient: no entry
    /// was created and the stores are unchanged.
    #[error("persistence failed: {0}")]
    Persistence(#[source] SinkError),

    /// The session has been closed; user-initiated saves and restores are
    /// rejected.
    #[error("session is closed")]
    Closed,
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
