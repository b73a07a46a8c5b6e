//! Error types for snapshot persistence.

/// Result type alias for snapshot I/O operations.
pub type Result<T> = std::result::Result<T, IoError>;

/// Error type for snapshot I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// RON serialization error
    #[error("RON error: {0}")]
    Ron(#[from] ron::Error),

    /// RON deserialization error
    #[error("RON parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    /// Unknown file extension
    #[error("Unsupported snapshot format: {0}")]
    UnsupportedFormat(String),

    /// Snapshot file was written by an incompatible format version
    #[error("Snapshot format version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// The format version this build understands.
        expected: String,
        /// The version found in the file.
        found: String,
    },

    /// Snapshot file exceeds the load size limit
    #[error("Snapshot file too large: {size} bytes (limit: {limit})")]
    FileTooLarge {
        /// Actual file size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },
}
