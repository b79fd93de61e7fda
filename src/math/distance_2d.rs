use super::{Point2, TOLERANCE};

/// Euclidean distance between two points.
#[must_use]
pub fn distance(p1: &Point2, p2: &Point2) -> f64 {
    (p2 - p1).norm()
}

/// Componentwise average of two points.
#[must_use]
pub fn midpoint(p1: &Point2, p2: &Point2) -> Point2 {
    Point2::new((p1.x + p2.x) * 0.5, (p1.y + p2.y) * 0.5)
}

/// Returns `true` if the points are closer than `tolerance`.
#[must_use]
pub fn points_equal(p1: &Point2, p2: &Point2, tolerance: f64) -> bool {
    distance(p1, p2) < tolerance
}

/// Rounds both coordinates to the nearest integer.
///
/// Every coordinate produced by the snap engine goes through here, so vertices
/// created by drawing or dragging stay on the integer lattice.
#[must_use]
pub fn round_point(p: &Point2) -> Point2 {
    Point2::new(p.x.round(), p.y.round())
}

/// Parameter `t` of the closest point on segment `a → b`, clamped to `[0, 1]`.
///
/// A zero-length segment yields `0.0`.
#[must_use]
pub fn segment_parameter(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return 0.0;
    }
    ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0)
}

/// Closest point to `p` on the finite segment `a → b`.
///
/// A zero-length segment returns `a`.
#[must_use]
pub fn project_point_onto_segment(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let t = segment_parameter(p, a, b);
    a + (b - a) * t
}

/// Minimum distance from `p` to the finite segment `a → b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    distance(p, &project_point_onto_segment(p, a, b))
}
