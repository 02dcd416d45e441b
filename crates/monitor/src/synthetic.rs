//! Synthetic landmark source for demos and tests

use face_landmarks::{
    landmarks::LANDMARK_COUNT, FaceLandmarks, LandmarkError, LandmarkSource, Point2,
};

/// Build a landmark frame whose two eyes both measure the given
/// aspect ratio: unit corner span, lid pairs separated by `ratio`.
pub fn landmarks_with_ear(ratio: f32) -> FaceLandmarks {
    let mut points = vec![Point2::default(); LANDMARK_COUNT];
    for (eye, x_offset) in [(36, 100.0f32), (42, 200.0)] {
        points[eye] = Point2::new(x_offset, 0.0);
        points[eye + 1] = Point2::new(x_offset + 0.33, -ratio / 2.0);
        points[eye + 2] = Point2::new(x_offset + 0.66, -ratio / 2.0);
        points[eye + 3] = Point2::new(x_offset + 1.0, 0.0);
        points[eye + 4] = Point2::new(x_offset + 0.66, ratio / 2.0);
        points[eye + 5] = Point2::new(x_offset + 0.33, ratio / 2.0);
    }
    FaceLandmarks::new(points).expect("constructed with the full point count")
}

/// Replays a scripted sequence of per-frame eye aspect ratios
/// (`None` = no face in that frame), cycling when exhausted.
pub struct SyntheticLandmarkSource {
    script: Vec<Option<f32>>,
    cursor: usize,
}

impl SyntheticLandmarkSource {
    pub fn new(script: Vec<Option<f32>>) -> Self {
        Self { script, cursor: 0 }
    }
}

impl LandmarkSource for SyntheticLandmarkSource {
    fn next_frame(&mut self) -> Result<Option<FaceLandmarks>, LandmarkError> {
        if self.script.is_empty() {
            return Ok(None);
        }
        let entry = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        Ok(entry.map(landmarks_with_ear))
    }
}
