//! Engine configuration

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Tunables for a history/versioning session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum number of undo entries kept in the history window.
    pub max_history: usize,
    /// Maximum number of saved versions retained (FIFO eviction).
    pub max_versions: usize,
    /// Seconds of inactivity before an automatic save fires.
    pub idle_period_secs: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_history: 50,
            max_versions: 20,
            idle_period_secs: 30,
        }
    }
}

impl EngineConfig {
    /// The idle period as a duration.
    pub fn idle_period(&self) -> Duration {
        Duration::seconds(self.idle_period_secs)
    }
}
