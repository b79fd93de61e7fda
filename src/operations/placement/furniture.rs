use crate::config::EditorConfig;
use crate::math::Point2;
use crate::topology::{Furniture, Wall};

/// Distances from a furniture center to the nearest wall line on each side.
///
/// A side is `None` when no wall lies in that direction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Clearances {
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
}

/// Pulls a dropped furniture item against nearby walls.
///
/// Walls are treated as lines at the mean coordinate of their endpoints:
/// horizontal walls (`|dx| > |dy|`) constrain `y`, the others constrain `x`.
/// On each axis the wall with the smallest positive gap to the facing
/// edge of the item's bounding box wins, provided the gap is below
/// `furniture_snap_threshold`; the item is then moved so that edge sits
/// `furniture_wall_gap` away from the wall. Both axes may snap at once.
#[must_use]
pub fn snap_furniture_to_walls(
    position: &Point2,
    furniture: &Furniture,
    walls: &[Wall],
    config: &EditorConfig,
) -> Point2 {
    let half = furniture.half_extents();
    let mut best_x: Option<(f64, f64)> = None;
    let mut best_y: Option<(f64, f64)> = None;

    for wall in walls {
        if wall.is_horizontal() {
            let line = (wall.start.y + wall.end.y) * 0.5;
            consider(&mut best_y, position.y, half.y, line, config);
        } else {
            let line = (wall.start.x + wall.end.x) * 0.5;
            consider(&mut best_x, position.x, half.x, line, config);
        }
    }

    Point2::new(
        best_x.map_or(position.x, |(_, x)| x),
        best_y.map_or(position.y, |(_, y)| y),
    )
}

/// Records a snap candidate on one axis if it beats the current best.
/// `best` holds `(gap, snapped coordinate)`.
fn consider(
    best: &mut Option<(f64, f64)>,
    center: f64,
    half: f64,
    line: f64,
    config: &EditorConfig,
) {
    let (gap, target) = if line < center {
        (center - half - line, line + half + config.furniture_wall_gap)
    } else {
        (line - (center + half), line - half - config.furniture_wall_gap)
    };
    if gap <= 0.0 || gap >= config.furniture_snap_threshold {
        return;
    }
    match best {
        Some((current, _)) if *current <= gap => {}
        _ => *best = Some((gap, target)),
    }
}

/// Measures the distance from `position` to the closest wall line on each side.
///
/// Horizontal walls count towards `top` (wall above, smaller `y`) or
/// `bottom`; the others towards `left` or `right`.
#[must_use]
pub fn wall_clearances(position: &Point2, walls: &[Wall]) -> Clearances {
    let mut out = Clearances::default();
    for wall in walls {
        let (line, center, before, after) = if wall.is_horizontal() {
            (
                (wall.start.y + wall.end.y) * 0.5,
                position.y,
                &mut out.top,
                &mut out.bottom,
            )
        } else {
            (
                (wall.start.x + wall.end.x) * 0.5,
                position.x,
                &mut out.left,
                &mut out.right,
            )
        };
        let side = if line < center { before } else { after };
        let dist = (line - center).abs();
        *side = Some(side.map_or(dist, |d| d.min(dist)));
    }
    out
}
