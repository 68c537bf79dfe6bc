use std::time::{Duration, Instant};

/// Quiet period used by the interactive session.
pub const DEFAULT_QUIET: Duration = Duration::from_millis(500);

/// Trailing-edge debounce timer driven by the caller's clock.
///
/// Every [`arm`](Self::arm) pushes the deadline to `now + quiet`; the timer fires once, on the
/// first [`fire_if_due`](Self::fire_if_due) at or after the deadline, and then disarms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrailingDebounce {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl TrailingDebounce {
    /// Disarmed timer with the given quiet period.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Configured quiet period.
    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// (Re)start the quiet period at `now`, replacing any pending deadline.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Drop the pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Pending deadline, if armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Return `true` and disarm if the deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for TrailingDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/debounce.rs"]
mod tests;
