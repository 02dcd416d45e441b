//! Eye and status state types

use serde::{Deserialize, Serialize};

use face_landmarks::FaceLandmarks;

use crate::config::DrowsinessConfig;

/// Per-eye state derived from the aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlinkState {
    Open,
    Half,
    Closed,
}

/// Classify one eye's aspect ratio against the two thresholds.
/// Pure: no state, no side effects.
pub fn classify(ratio: f32, open_threshold: f32, drowsy_threshold: f32) -> BlinkState {
    if ratio > open_threshold {
        BlinkState::Open
    } else if ratio > drowsy_threshold {
        BlinkState::Half
    } else {
        BlinkState::Closed
    }
}

/// Both eyes reduced to the one observation the aggregator needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombinedEyeState {
    /// Both eyes fully closed
    BothClosed,
    /// At least one eye half-closed (and not both closed)
    EitherHalf,
    /// Neither of the above
    Open,
}

impl CombinedEyeState {
    pub fn from_eyes(left: BlinkState, right: BlinkState) -> Self {
        if left == BlinkState::Closed && right == BlinkState::Closed {
            CombinedEyeState::BothClosed
        } else if left == BlinkState::Half || right == BlinkState::Half {
            CombinedEyeState::EitherHalf
        } else {
            CombinedEyeState::Open
        }
    }

    /// Classify both eyes of a landmark frame in one step
    pub fn from_landmarks(frame: &FaceLandmarks, config: &DrowsinessConfig) -> Self {
        let left = classify(
            frame.left_eye().aspect_ratio(),
            config.open_threshold,
            config.drowsy_threshold,
        );
        let right = classify(
            frame.right_eye().aspect_ratio(),
            config.open_threshold,
            config.drowsy_threshold,
        );
        Self::from_eyes(left, right)
    }
}

/// Debounced session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Active,
    Drowsy,
    Sleeping,
}

impl Status {
    /// Display color for a rendering consumer
    pub fn display_color(&self) -> &'static str {
        match self {
            Status::Active => "green",
            Status::Drowsy => "yellow",
            Status::Sleeping => "red",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Status::Active => "ACTIVE",
            Status::Drowsy => "DROWSY",
            Status::Sleeping => "SLEEPING",
        };
        f.write_str(name)
    }
}

/// A confirmed status change, emitted at most once per change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Status,
    pub to: Status,
}
