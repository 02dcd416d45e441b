//! Facial Landmark Contract
//!
//! Defines the boundary between the external vision pipeline and the
//! drowsiness classifier:
//! - 68-point facial landmark frames (dlib index convention)
//! - Per-eye landmark extraction
//! - Eye aspect ratio (EAR) computation

pub mod geometry;
pub mod landmarks;

pub use geometry::{EyePoints, Point2};
pub use landmarks::FaceLandmarks;

use thiserror::Error;

/// Landmark layer error types
#[derive(Error, Debug)]
pub enum LandmarkError {
    #[error("Expected {expected} landmark points, got {actual}")]
    PointCount { expected: usize, actual: usize },

    #[error("Landmark acquisition failed: {0}")]
    Acquisition(String),
}

/// Per-frame supplier of facial landmarks.
///
/// `Ok(None)` means no face was visible in the frame. That is a valid
/// observation, not an error; the classifier handles it by policy.
pub trait LandmarkSource {
    fn next_frame(&mut self) -> Result<Option<FaceLandmarks>, LandmarkError>;
}
