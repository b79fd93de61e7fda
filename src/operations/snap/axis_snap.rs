use crate::math::{round_point, Point2};
use crate::topology::Wall;

/// Locks `candidate` to the vertical or horizontal line through `reference`.
///
/// With `dx = |cx - rx|` and `dy = |cy - ry|`:
/// - `dx < threshold` and `dy > dx`: x takes the reference's x (vertical).
/// - otherwise `dy < threshold` and `dx > dy`: y takes the reference's y (horizontal).
/// - otherwise the candidate is only rounded.
///
/// At most one axis is locked per call; the free coordinate is rounded.
#[must_use]
pub fn axis_snap(candidate: &Point2, reference: &Point2, threshold: f64) -> Point2 {
    let dx = (candidate.x - reference.x).abs();
    let dy = (candidate.y - reference.y).abs();

    if dx < threshold && dy > dx {
        return Point2::new(reference.x, candidate.y.round());
    }
    if dy < threshold && dx > dy {
        return Point2::new(candidate.x.round(), reference.y);
    }
    round_point(candidate)
}

/// Result of aligning a point with the endpoints of existing walls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAlignment {
    /// The aligned (or merely rounded) point.
    pub point: Point2,
    /// Whether an alignment was found.
    pub snapped: bool,
    /// The endpoint the point was aligned with.
    pub aligned_with: Option<Point2>,
}

/// Aligns `candidate` horizontally or vertically with any wall endpoint.
///
/// Endpoints are scanned in wall order, start before end. For each, a
/// horizontal match (`|dy| < threshold`) is tried before a vertical one.
/// The first match copies the endpoint's coordinate on the locked axis
/// exactly and rounds the other one.
#[must_use]
pub fn axis_align_snap_to_other_walls(
    candidate: &Point2,
    walls: &[Wall],
    threshold: f64,
) -> AxisAlignment {
    for endpoint in walls.iter().flat_map(|wall| [wall.start, wall.end]) {
        if (candidate.y - endpoint.y).abs() < threshold {
            return AxisAlignment {
                point: Point2::new(candidate.x.round(), endpoint.y),
                snapped: true,
                aligned_with: Some(endpoint),
            };
        }
        if (candidate.x - endpoint.x).abs() < threshold {
            return AxisAlignment {
                point: Point2::new(endpoint.x, candidate.y.round()),
                snapped: true,
                aligned_with: Some(endpoint),
            };
        }
    }
    AxisAlignment {
        point: round_point(candidate),
        snapped: false,
        aligned_with: None,
    }
}
