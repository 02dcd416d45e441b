//! Drowsiness Classification State Machine
//!
//! Converts noisy per-frame eye measurements into a stable, debounced
//! status:
//! - Blink-state classification from eye aspect ratios (two thresholds)
//! - Left/right reduction into one combined per-frame observation
//! - Frame-count debouncing into ACTIVE / DROWSY / SLEEPING
//! - Cumulative active-time accounting across status transitions

pub mod aggregator;
pub mod clock;
pub mod config;
pub mod state;

pub use aggregator::{DebounceAggregator, RunCounters};
pub use clock::{format_mmss, ActiveClock};
pub use config::{DrowsinessConfig, NoFacePolicy};
pub use state::{classify, BlinkState, CombinedEyeState, Status, Transition};

use thiserror::Error;

/// Classification configuration errors. All of these would make the
/// state machine unstable, so they are fatal at construction time.
#[derive(Error, Debug)]
pub enum DrowsinessError {
    #[error("Open threshold {open} must exceed drowsy threshold {drowsy}")]
    ThresholdOrder { open: f32, drowsy: f32 },

    #[error("Thresholds must be finite and non-negative, got {0}")]
    InvalidThreshold(f32),

    #[error("Frame threshold must be at least 1")]
    ZeroFrameThreshold,
}
