mod furniture;
mod opening;

pub use furniture::{snap_furniture_to_walls, wall_clearances, Clearances};
pub use opening::{DragOpening, PlaceOpening, ResizeOpening};

use crate::math::{point_to_segment_dist, Point2};
use crate::topology::Wall;

/// Returns `true` if `point` is within `threshold` of the wall's centerline.
#[must_use]
pub fn is_point_on_wall(point: &Point2, wall: &Wall, threshold: f64) -> bool {
    point_to_segment_dist(point, &wall.start, &wall.end) < threshold
}
