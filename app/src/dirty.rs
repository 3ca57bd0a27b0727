//! Debounced "unsaved changes" tracking.
//!
//! Comparing the whole grid against the loaded original on every keystroke
//! is wasteful, so each change only pushes a deadline out. The caller polls
//! with the current time; once the deadline passes, one comparison runs.

use std::time::{Duration, Instant};

use csvedit_engine::Grid;

pub const DEFAULT_DIRTY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct DirtyTracker {
    delay: Duration,
    deadline: Option<Instant>,
    dirty: bool,
}

impl Default for DirtyTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DIRTY_DELAY)
    }
}

impl DirtyTracker {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None, dirty: false }
    }

    /// Note a change at `now`. Replaces any pending deadline.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Run the comparison if the deadline has passed. Returns the dirty flag.
    ///
    /// Comparison is value-and-type sensitive: a number never equals its
    /// text spelling. Without an original there is nothing to be dirty against.
    pub fn poll(&mut self, now: Instant, current: &Grid, original: Option<&Grid>) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.dirty = original.is_some_and(|orig| orig != current);
            }
            _ => {}
        }
        self.dirty
    }

    /// Forget pending work and mark clean (load, reset).
    pub fn reset(&mut self) {
        self.deadline = None;
        self.dirty = false;
    }
}
