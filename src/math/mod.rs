pub mod angle_2d;
pub mod distance_2d;
pub mod units;

pub use angle_2d::{angle_between, line_angle, perpendicular_offset};
pub use distance_2d::{
    distance, midpoint, point_to_segment_dist, points_equal, project_point_onto_segment,
    round_point, segment_parameter,
};
pub use units::{format_length, to_display_units, to_internal_units, MM_PER_UNIT};

/// 2D point type, in internal plan units.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
