//! Debounced auto-save scheduling
//!
//! Every state change restarts the idle window; the scheduler reports due
//! exactly once per window, so a burst of edits coalesces into a single
//! auto-save fired after the *last* edit in the burst.
//!
//! The scheduler is poll-driven: the host calls [`AutoSaveScheduler::poll`]
//! periodically (e.g. once per UI tick) with the injected clock's current
//! instant. It holds no thread or OS timer of its own.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Idle-debounce timer for automatic saves.
#[derive(Debug)]
pub struct AutoSaveScheduler {
    idle_period: Duration,
    pending_since: Option<DateTime<Utc>>,
}

impl AutoSaveScheduler {
    /// Create a scheduler that fires after `idle_period` of inactivity.
    pub fn new(idle_period: Duration) -> Self {
        Self {
            idle_period,
            pending_since: None,
        }
    }

    /// Record a state change, restarting the idle window.
    pub fn note_change(&mut self, now: DateTime<Utc>) {
        self.pending_since = Some(now);
    }

    /// Check whether the idle window has elapsed.
    ///
    /// Returns true at most once per window; the pending change is consumed,
    /// and only the next `note_change` re-arms the timer. This also makes a
    /// failed auto-save transient: the next edit simply starts a new window.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        match self.pending_since {
            Some(since) if now - since >= self.idle_period => {
                debug!(idle_secs = self.idle_period.num_seconds(), "idle window elapsed");
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    /// Discard any pending auto-save (surface teardown).
    pub fn cancel(&mut self) {
        if self.pending_since.take().is_some() {
            debug!("pending auto-save cancelled");
        }
    }

    /// True if a change is waiting for its idle window to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// The configured idle period.
    pub fn idle_period(&self) -> Duration {
        self.idle_period
    }
}
