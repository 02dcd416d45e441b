//! Active-time accounting

use std::time::{Duration, Instant};

use tracing::debug;

use crate::state::{Status, Transition};

/// Tracks cumulative time spent in ACTIVE status.
///
/// Time is passed in explicitly so the arithmetic is deterministic
/// under test. A segment is open (`segment_start` set) exactly while
/// the session is running in ACTIVE status.
#[derive(Debug, Default)]
pub struct ActiveClock {
    accumulated: Duration,
    segment_start: Option<Instant>,
}

impl ActiveClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a status transition. Called before the new status is
    /// acted on elsewhere, with both endpoints, so the delta is banked
    /// against the correct prior state.
    pub fn on_transition(&mut self, transition: &Transition, now: Instant) {
        if transition.from == Status::Active {
            self.bank(now);
        }
        if transition.to == Status::Active {
            self.segment_start = Some(now);
        }
    }

    /// Open a segment if the session is resuming in ACTIVE status
    pub fn resume(&mut self, status: Status, now: Instant) {
        if status == Status::Active && self.segment_start.is_none() {
            self.segment_start = Some(now);
        }
    }

    /// Freeze the clock without losing accumulated time
    pub fn pause(&mut self, now: Instant) {
        self.bank(now);
    }

    /// Total active time so far. Read-only query.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.segment_start {
            Some(start) => self.accumulated + now.saturating_duration_since(start),
            None => self.accumulated,
        }
    }

    /// Zero the clock (explicit reset, distinct from pause)
    pub fn reset(&mut self) {
        debug!("Active clock reset");
        self.accumulated = Duration::ZERO;
        self.segment_start = None;
    }

    fn bank(&mut self, now: Instant) {
        if let Some(start) = self.segment_start.take() {
            self.accumulated += now.saturating_duration_since(start);
        }
    }
}

/// Format a duration as mm:ss for display
pub fn format_mmss(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
