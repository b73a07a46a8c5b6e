//! Verso IO - Snapshot Persistence
//!
//! File-backed persistence for the Verso history engine. The core engine
//! only knows the [`verso_core::PersistenceSink`] seam; this crate provides
//! the concrete sink that writes labeled snapshots to disk, plus the on-disk
//! container format (RON or JSON, chosen by file extension).

#![warn(missing_docs)]

pub mod error;
pub mod file_sink;
pub mod snapshot_format;

pub use error::{IoError, Result};
pub use file_sink::FileSink;
pub use snapshot_format::{
    SnapshotFile, SnapshotMetadata, MAX_SNAPSHOT_FILE_SIZE, SNAPSHOT_FILE_VERSION,
};
