//! Defines the on-disk snapshot file format.
//!
//! A saved snapshot is wrapped in a [`SnapshotFile`] container carrying a
//! format version stamp and save metadata, serialized to RON or JSON
//! depending on the file extension.

use crate::error::{IoError, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// The current version of the snapshot file format.
///
/// Stamped into every saved file; incremented on breaking changes to
/// [`SnapshotFile`] or its children.
pub const SNAPSHOT_FILE_VERSION: &str = "1.0.0";

/// Maximum allowed snapshot file size (50 MB).
///
/// Prevents unbounded resource consumption when loading snapshot files.
pub const MAX_SNAPSHOT_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Top-level structure of a saved snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotFile<T> {
    /// The version of the snapshot file format.
    pub version: String,
    /// Metadata about the save.
    pub metadata: SnapshotMetadata,
    /// The saved application state.
    pub state: T,
}

/// Metadata associated with a snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotMetadata {
    /// Label of the version this snapshot belongs to.
    pub label: String,
    /// Timestamp of the last write.
    pub saved_at: DateTime<Utc>,
}

impl<T: Serialize> SnapshotFile<T> {
    /// Wrap a state in a new container, stamped with the current format
    /// version and save time.
    pub fn new(label: impl Into<String>, state: T) -> Self {
        Self {
            version: SNAPSHOT_FILE_VERSION.to_string(),
            metadata: SnapshotMetadata {
                label: label.into(),
                saved_at: Utc::now(),
            },
            state,
        }
    }

    /// Saves the snapshot to the given path.
    ///
    /// Serializes to RON or JSON depending on the file extension and
    /// refreshes the `saved_at` timestamp.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("ron");

        self.metadata.saved_at = Utc::now();

        match extension {
            "json" => {
                let file = File::create(path)?;
                serde_json::to_writer_pretty(file, self)?;
            }
            "ron" | "vso" => {
                let config = ron::ser::PrettyConfig::default();
                let s = ron::ser::to_string_pretty(self, config)?;
                let mut file = File::create(path)?;
                file.write_all(s.as_bytes())?;
            }
            _ => return Err(IoError::UnsupportedFormat(extension.to_string())),
        }

        Ok(())
    }
}

impl<T: DeserializeOwned> SnapshotFile<T> {
    /// Loads a snapshot from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_limit(path, MAX_SNAPSHOT_FILE_SIZE)
    }

    /// Loads a snapshot with a specific file size limit.
    pub(crate) fn load_with_limit(path: &Path, limit: u64) -> Result<Self> {
        // Check file size before reading anything.
        let metadata = std::fs::metadata(path)?;
        let size = metadata.len();
        if size > limit {
            return Err(IoError::FileTooLarge { size, limit });
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("ron");

        let mut content = String::new();
        File::open(path)?.read_to_string(&mut content)?;

        match extension {
            "json" => Ok(serde_json::from_str(&content)?),
            "ron" | "vso" => Ok(ron::from_str(&content)?),
            _ => Err(IoError::UnsupportedFormat(extension.to_string())),
        }
    }
}
