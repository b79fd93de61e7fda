use crate::math::{distance, round_point, Point2};
use crate::topology::Wall;

/// Returns the first wall endpoint strictly closer than `threshold`.
///
/// Walls are scanned in order and each wall's start is tested before its
/// end. The endpoint is returned with its stored coordinates untouched.
#[must_use]
pub fn find_snap_vertex(candidate: &Point2, walls: &[Wall], threshold: f64) -> Option<Point2> {
    walls
        .iter()
        .flat_map(|wall| [wall.start, wall.end])
        .find(|endpoint| distance(candidate, endpoint) < threshold)
}

/// Snaps `candidate` onto an existing wall endpoint.
///
/// Returns the exact stored endpoint when one is within `threshold`, so two
/// walls meeting there share bit-identical coordinates. Otherwise returns
/// the candidate rounded to integer coordinates.
#[must_use]
pub fn point_snap(candidate: &Point2, walls: &[Wall], threshold: f64) -> Point2 {
    find_snap_vertex(candidate, walls, threshold).unwrap_or_else(|| round_point(candidate))
}
