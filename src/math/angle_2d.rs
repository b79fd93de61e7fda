use super::distance_2d::midpoint;
use super::{Point2, TOLERANCE};

/// Interior angle at `p2`, in degrees within `[0, 180]`, formed by the rays
/// `p2 → p1` and `p2 → p3`.
///
/// The signed angle between the rays is normalized into `[0, 360)` and then
/// folded by reflection. Returns `None` if either ray has zero length.
#[must_use]
pub fn angle_between(p1: &Point2, p2: &Point2, p3: &Point2) -> Option<f64> {
    let r1 = p1 - p2;
    let r2 = p3 - p2;
    if r1.norm() < TOLERANCE || r2.norm() < TOLERANCE {
        return None;
    }

    let a1 = r1.y.atan2(r1.x);
    let a2 = r2.y.atan2(r2.x);
    let mut angle = (a2 - a1).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    if angle > 180.0 {
        angle = 360.0 - angle;
    }
    Some(angle)
}

/// Direction of the line `p1 → p2` in degrees, in `(-180, 180]`.
#[must_use]
pub fn line_angle(p1: &Point2, p2: &Point2) -> f64 {
    (p2.y - p1.y).atan2(p2.x - p1.x).to_degrees()
}

/// Point at `distance` from the midpoint of `p1 → p2`, perpendicular to the
/// line (line angle + 90°). Used to place dimension labels.
#[must_use]
pub fn perpendicular_offset(p1: &Point2, p2: &Point2, distance: f64) -> Point2 {
    let perp = (line_angle(p1, p2) + 90.0).to_radians();
    let mid = midpoint(p1, p2);
    Point2::new(
        mid.x + perp.cos() * distance,
        mid.y + perp.sin() * distance,
    )
}
