//! File-backed persistence sink
//!
//! Writes the most recently saved snapshot to a fixed path, the way an
//! editor keeps a well-known auto-save file. Each save overwrites the
//! previous one; version history itself lives in the engine's
//! `VersionStore`, not on disk.

use crate::error::{IoError, Result};
use crate::snapshot_format::{SnapshotFile, SNAPSHOT_FILE_VERSION};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use verso_core::{PersistenceSink, SinkError};

/// Persistence sink that serializes snapshots to a single file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink targeting the given path. The extension selects the
    /// serialization format (`json`, `ron`, or `vso`).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the last persisted snapshot, validating the format version.
    pub fn load<T: DeserializeOwned>(&self) -> Result<SnapshotFile<T>> {
        let file = SnapshotFile::load(&self.path)?;
        if file.version != SNAPSHOT_FILE_VERSION {
            return Err(IoError::VersionMismatch {
                expected: SNAPSHOT_FILE_VERSION.to_string(),
                found: file.version,
            });
        }
        Ok(file)
    }
}

impl<T: Serialize + Clone> PersistenceSink<T> for FileSink {
    fn persist(&mut self, label: &str, state: &T) -> std::result::Result<(), SinkError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(SinkError::from)?;
        }
        let mut file = SnapshotFile::new(label, state.clone());
        file.save(&self.path).map_err(SinkError::from)?;
        info!(path = ?self.path, label, "snapshot persisted");
        Ok(())
    }
}
