use std::time::{Duration, Instant};

/// Coalesces bursts of edits into a single persistence request.
///
/// Every [`notify`](PersistDebouncer::notify) restarts the delay. [`poll`](PersistDebouncer::poll)
/// fires exactly once after `delay` has elapsed since the last notification.
#[derive(Debug, Clone)]
pub struct PersistDebouncer {
    delay: Duration,
    last_edit: Option<Instant>,
}

impl PersistDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_edit: None,
        }
    }

    /// Registers an edit at `now`.
    pub fn notify(&mut self, now: Instant) {
        self.last_edit = Some(now);
    }

    /// True if a save is pending
    pub fn is_pending(&self) -> bool {
        self.last_edit.is_some()
    }

    /// Returns true (and clears the pending edit) once the delay has elapsed since the last edit.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_edit {
            Some(t) if now.saturating_duration_since(t) >= self.delay => {
                self.last_edit = None;
                true
            }
            _ => false,
        }
    }

    /// Drops a pending save, e.g. after the state was persisted by other means.
    pub fn cancel(&mut self) {
        self.last_edit = None;
    }
}
