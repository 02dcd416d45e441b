//! 68-point facial landmark frames

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::geometry::{EyePoints, Point2};
use crate::LandmarkError;

/// Number of points in the standard facial landmark model
pub const LANDMARK_COUNT: usize = 68;

/// Landmark index ranges for the eyes (inclusive start, exclusive end)
pub const LEFT_EYE_RANGE: std::ops::Range<usize> = 36..42;
pub const RIGHT_EYE_RANGE: std::ops::Range<usize> = 42..48;

/// One face's landmarks for a single frame.
///
/// Immutable per frame; supplied by an external landmark detector in
/// the standard 68-point index convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceLandmarks {
    points: Vec<Point2>,
}

impl FaceLandmarks {
    /// Create from exactly 68 points. Anything else is a contract
    /// violation by the landmark source.
    pub fn new(points: Vec<Point2>) -> Result<Self, LandmarkError> {
        if points.len() != LANDMARK_COUNT {
            warn!("Landmark source delivered {} points", points.len());
            return Err(LandmarkError::PointCount {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// All 68 points in index order
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Left eye landmarks (indices 36..=41)
    pub fn left_eye(&self) -> EyePoints {
        self.eye(LEFT_EYE_RANGE)
    }

    /// Right eye landmarks (indices 42..=47)
    pub fn right_eye(&self) -> EyePoints {
        self.eye(RIGHT_EYE_RANGE)
    }

    fn eye(&self, range: std::ops::Range<usize>) -> EyePoints {
        let mut pts = [Point2::default(); 6];
        pts.copy_from_slice(&self.points[range]);
        EyePoints(pts)
    }
}
