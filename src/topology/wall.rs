use crate::math::{distance, Point2, Vector2, TOLERANCE};

use super::vertex::VertexId;
use super::Endpoint;

slotmap::new_key_type! {
    /// Unique identifier for a wall in the plan.
    pub struct WallId;
}

/// Stored form of a wall: two corner references plus its own attributes.
#[derive(Debug, Clone)]
pub struct WallData {
    /// Start corner of the wall.
    pub start: VertexId,
    /// End corner of the wall.
    pub end: VertexId,
    pub thickness: f64,
    /// Room height in centimeters, if set.
    pub height: Option<f64>,
}

/// A wall resolved to coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub start: Point2,
    pub end: Point2,
    pub thickness: f64,
    /// Room height in centimeters, if set.
    pub height: Option<f64>,
}

impl Wall {
    /// Creates a wall between two points with no height set.
    #[must_use]
    pub fn new(start: Point2, end: Point2, thickness: f64) -> Self {
        Self {
            start,
            end,
            thickness,
            height: None,
        }
    }

    /// Length of the wall's centerline.
    #[must_use]
    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }

    /// Unit vector from start to end, or `None` for a zero-length wall.
    #[must_use]
    pub fn direction(&self) -> Option<Vector2> {
        let d = self.end - self.start;
        let len = d.norm();
        if len < TOLERANCE {
            return None;
        }
        Some(d / len)
    }

    /// A wall is horizontal when its x-extent dominates its y-extent.
    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        (self.end.x - self.start.x).abs() > (self.end.y - self.start.y).abs()
    }

    /// Returns the coordinate of the requested end.
    #[must_use]
    pub fn endpoint(&self, end: Endpoint) -> Point2 {
        match end {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        }
    }
}
