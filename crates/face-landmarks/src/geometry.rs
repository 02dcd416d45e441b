//! Eye geometry and the openness (EAR) metric

use serde::{Deserialize, Serialize};

/// 2D landmark point in image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The six landmarks of one eye, in dlib anatomical order:
/// outer corner, two upper-lid points, inner corner, two lower-lid
/// points (lower points listed inner-to-outer, mirroring indices
/// 36..=41 for the left eye and 42..=47 for the right).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyePoints(pub [Point2; 6]);

impl EyePoints {
    /// Eye aspect ratio: mean vertical lid distance over the
    /// inter-corner distance.
    ///
    /// `(|p2-p6| + |p3-p5|) / (2 * |p1-p4|)` where p1/p4 are the
    /// corners and (p2,p6), (p3,p5) are the vertically opposed lid
    /// pairs. A zero-width eye box (coincident corners) yields 0.0,
    /// which downstream classification reads as closed.
    pub fn aspect_ratio(&self) -> f32 {
        let p = &self.0;
        let horizontal = p[0].distance(&p[3]);
        if horizontal == 0.0 {
            return 0.0;
        }
        let vertical = p[1].distance(&p[5]) + p[2].distance(&p[4]);
        vertical / (2.0 * horizontal)
    }
}
