//! Classification configuration

use serde::{Deserialize, Serialize};

use crate::DrowsinessError;

/// How the aggregator handles a frame with no detected face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoFacePolicy {
    /// Leave counters and status untouched until a face returns
    #[default]
    Freeze,
    /// Count the frame as both eyes closed
    TreatAsClosed,
}

/// Classifier and debounce configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrowsinessConfig {
    /// EAR above this reads as an open eye
    pub open_threshold: f32,

    /// EAR above this (but not above `open_threshold`) reads as a
    /// half-closed eye; at or below it, closed
    pub drowsy_threshold: f32,

    /// Consecutive frames a combined eye state must persist before
    /// the status changes
    pub frame_threshold: u32,

    /// No-face-in-frame handling
    pub no_face_policy: NoFacePolicy,
}

impl Default for DrowsinessConfig {
    fn default() -> Self {
        Self {
            open_threshold: 0.25,
            drowsy_threshold: 0.21,
            frame_threshold: 6,
            no_face_policy: NoFacePolicy::default(),
        }
    }
}

impl DrowsinessConfig {
    /// Create strict config (flags drowsiness sooner)
    pub fn strict() -> Self {
        Self {
            open_threshold: 0.27,
            drowsy_threshold: 0.23,
            frame_threshold: 4,
            ..Default::default()
        }
    }

    /// Create lenient config (tolerates longer eye closure)
    pub fn lenient() -> Self {
        Self {
            open_threshold: 0.23,
            drowsy_threshold: 0.19,
            frame_threshold: 10,
            ..Default::default()
        }
    }

    /// Validate the configuration. Errors here are fatal: a reversed
    /// threshold pair or a zero debounce length would leave the state
    /// machine unstable.
    pub fn validate(&self) -> Result<(), DrowsinessError> {
        for t in [self.open_threshold, self.drowsy_threshold] {
            if !t.is_finite() || t < 0.0 {
                return Err(DrowsinessError::InvalidThreshold(t));
            }
        }
        if self.open_threshold <= self.drowsy_threshold {
            return Err(DrowsinessError::ThresholdOrder {
                open: self.open_threshold,
                drowsy: self.drowsy_threshold,
            });
        }
        if self.frame_threshold == 0 {
            return Err(DrowsinessError::ZeroFrameThreshold);
        }
        Ok(())
    }
}
