use tracing::debug;

use crate::config::EditorConfig;
use crate::math::{distance, project_point_onto_segment, segment_parameter, Point2};
use crate::topology::{
    Change, ElementUpdate, Endpoint, Opening, OpeningId, OpeningKind, OpeningUpdate, Plan, Wall,
};

use super::is_point_on_wall;

/// Places a new window or door on the wall under the pointer.
pub struct PlaceOpening {
    kind: OpeningKind,
    point: Point2,
}

impl PlaceOpening {
    /// Creates a new `PlaceOpening` operation.
    #[must_use]
    pub fn new(kind: OpeningKind, point: Point2) -> Self {
        Self { kind, point }
    }

    /// Hit-tests the walls in insertion order; the first one within
    /// `wall_hit_threshold` hosts the opening, centered on the projection of
    /// the pointer and aligned with the wall.
    ///
    /// Returns `None` when no wall is close enough. Openings are never
    /// created off a wall.
    #[must_use]
    pub fn execute(&self, plan: &Plan, config: &EditorConfig) -> Option<Opening> {
        let half = match self.kind {
            OpeningKind::Window => config.window_half_length,
            OpeningKind::Door => config.door_half_length,
        };
        for (id, wall) in plan.walls() {
            if !is_point_on_wall(&self.point, &wall, config.wall_hit_threshold) {
                continue;
            }
            let Some(u) = wall.direction() else {
                continue;
            };
            let t = segment_parameter(&self.point, &wall.start, &wall.end);
            let t = center_parameter(&wall, t, half, config.clip_openings_to_wall);
            let center = wall.start + (wall.end - wall.start) * t;
            debug!(kind = self.kind.name(), x = center.x, y = center.y, "opening placed");
            return Some(Opening::new(
                self.kind,
                center - u * half,
                center + u * half,
                Some(id),
            ));
        }
        debug!(x = self.point.x, y = self.point.y, "no wall under the pointer");
        None
    }
}

/// Slides an opening along its host wall.
pub struct DragOpening {
    opening: OpeningId,
    midpoint: Point2,
}

impl DragOpening {
    /// Creates a new `DragOpening` operation targeting a new midpoint.
    #[must_use]
    pub fn new(opening: OpeningId, midpoint: Point2) -> Self {
        Self { opening, midpoint }
    }

    /// Projects the requested midpoint onto the host wall and rebuilds both
    /// ends symmetrically around it, keeping the current length.
    ///
    /// Returns `None` if the opening is unknown, has no host wall, or its
    /// host wall has zero length.
    #[must_use]
    pub fn execute(&self, plan: &Plan, config: &EditorConfig) -> Option<Change> {
        let (opening, wall) = hosted(plan, self.opening)?;
        let u = wall.direction()?;
        let half = opening.length() * 0.5;

        let t = segment_parameter(&self.midpoint, &wall.start, &wall.end);
        let t = center_parameter(&wall, t, half, config.clip_openings_to_wall);
        let center = wall.start + (wall.end - wall.start) * t;

        Some(Change::Update(
            self.opening.into(),
            ElementUpdate::Opening(OpeningUpdate {
                start: Some(center - u * half),
                end: Some(center + u * half),
                ..OpeningUpdate::default()
            }),
        ))
    }
}

/// Moves one end of an opening along its host wall, keeping the other fixed.
pub struct ResizeOpening {
    opening: OpeningId,
    end: Endpoint,
    point: Point2,
}

impl ResizeOpening {
    /// Creates a new `ResizeOpening` operation.
    #[must_use]
    pub fn new(opening: OpeningId, end: Endpoint, point: Point2) -> Self {
        Self {
            opening,
            end,
            point,
        }
    }

    /// Returns `None`, leaving the opening unchanged, when the result would be
    /// shorter than `min_opening_length`. The minimum is a floor, not a clamp.
    #[must_use]
    pub fn execute(&self, plan: &Plan, config: &EditorConfig) -> Option<Change> {
        let (opening, wall) = hosted(plan, self.opening)?;
        let moved = project_point_onto_segment(&self.point, &wall.start, &wall.end);
        let fixed = opening.endpoint(self.end.other());
        let width = distance(&moved, &fixed);
        if width < config.min_opening_length {
            debug!(width, min = config.min_opening_length, "resize refused");
            return None;
        }

        let mut update = OpeningUpdate {
            width: Some(width),
            ..OpeningUpdate::default()
        };
        match self.end {
            Endpoint::Start => update.start = Some(moved),
            Endpoint::End => update.end = Some(moved),
        }
        Some(Change::Update(self.opening.into(), ElementUpdate::Opening(update)))
    }
}

fn hosted(plan: &Plan, id: OpeningId) -> Option<(Opening, Wall)> {
    let opening = *plan.opening(id).ok()?;
    let wall = plan.wall(opening.wall?).ok()?;
    Some((opening, wall))
}

/// Restricts the center parameter so that an opening of half-length `half`
/// stays within the wall. Without clipping `t` is returned unchanged.
fn center_parameter(wall: &Wall, t: f64, half: f64, clip: bool) -> f64 {
    if !clip {
        return t;
    }
    let length = wall.length();
    if length <= 2.0 * half {
        return 0.5;
    }
    let margin = half / length;
    t.clamp(margin, 1.0 - margin)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::WallId;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn plan_with_wall() -> (Plan, WallId) {
        let mut plan = Plan::new();
        let id = plan.add_wall(Wall::new(p(0.0, 0.0), p(400.0, 0.0), 10.0)).unwrap();
        (plan, id)
    }

    fn with_window(plan: &mut Plan, wall: WallId) -> OpeningId {
        plan.add_opening(Opening::new(
            OpeningKind::Window,
            p(100.0, 0.0),
            p(300.0, 0.0),
            Some(wall),
        ))
        .unwrap()
    }

    fn clipped() -> EditorConfig {
        EditorConfig {
            clip_openings_to_wall: true,
            ..EditorConfig::default()
        }
    }

    fn opening_update(change: Change) -> OpeningUpdate {
        match change {
            Change::Update(_, ElementUpdate::Opening(update)) => update,
            other => panic!("unexpected change {other:?}"),
        }
    }

    // ── placement ──

    #[test]
    fn window_centers_on_projection() {
        let (plan, wall) = plan_with_wall();
        let window = PlaceOpening::new(OpeningKind::Window, p(200.0, 12.0))
            .execute(&plan, &EditorConfig::default())
            .unwrap();
        assert_eq!(window.wall, Some(wall));
        assert_eq!(window.start, p(100.0, 0.0));
        assert_eq!(window.end, p(300.0, 0.0));
        assert_relative_eq!(window.width, 200.0);
    }

    #[test]
    fn door_uses_its_own_half_length() {
        let (plan, _) = plan_with_wall();
        let door = PlaceOpening::new(OpeningKind::Door, p(200.0, -20.0))
            .execute(&plan, &EditorConfig::default())
            .unwrap();
        assert_eq!(door.kind, OpeningKind::Door);
        assert_relative_eq!(door.length(), 180.0);
        assert_eq!(door.midpoint(), p(200.0, 0.0));
    }

    #[test]
    fn placement_off_walls_is_rejected() {
        let (plan, _) = plan_with_wall();
        assert!(PlaceOpening::new(OpeningKind::Window, p(200.0, 31.0))
            .execute(&plan, &EditorConfig::default())
            .is_none());
        assert!(PlaceOpening::new(OpeningKind::Door, p(50.0, 50.0))
            .execute(&Plan::new(), &EditorConfig::default())
            .is_none());
    }

    #[test]
    fn first_wall_in_insertion_order_wins() {
        let (mut plan, first) = plan_with_wall();
        plan.add_wall(Wall::new(p(0.0, 20.0), p(400.0, 20.0), 10.0)).unwrap();
        // Closer to the second wall, but the first one is scanned first.
        let window = PlaceOpening::new(OpeningKind::Window, p(200.0, 15.0))
            .execute(&plan, &EditorConfig::default())
            .unwrap();
        assert_eq!(window.wall, Some(first));
    }

    #[test]
    fn placement_follows_diagonal_walls() {
        let mut plan = Plan::new();
        plan.add_wall(Wall::new(p(0.0, 0.0), p(300.0, 400.0), 10.0)).unwrap();
        let window = PlaceOpening::new(OpeningKind::Window, p(150.0, 200.0))
            .execute(&plan, &EditorConfig::default())
            .unwrap();
        assert_relative_eq!(window.start.x, 90.0, epsilon = 1e-9);
        assert_relative_eq!(window.start.y, 120.0, epsilon = 1e-9);
        assert_relative_eq!(window.end.x, 210.0, epsilon = 1e-9);
        assert_relative_eq!(window.end.y, 280.0, epsilon = 1e-9);
    }

    #[test]
    fn clipped_placement_stays_inside_wall() {
        let (plan, _) = plan_with_wall();
        let window = PlaceOpening::new(OpeningKind::Window, p(20.0, 5.0))
            .execute(&plan, &clipped())
            .unwrap();
        assert_eq!(window.start, p(0.0, 0.0));
        assert_eq!(window.end, p(200.0, 0.0));
    }

    // ── drag along wall ──

    #[test]
    fn drag_projects_midpoint_and_keeps_length() {
        let (mut plan, wall) = plan_with_wall();
        let window = with_window(&mut plan, wall);
        let update = opening_update(
            DragOpening::new(window, p(350.0, 40.0))
                .execute(&plan, &EditorConfig::default())
                .unwrap(),
        );
        assert_eq!(update.start, Some(p(250.0, 0.0)));
        assert_eq!(update.end, Some(p(450.0, 0.0)));
        assert_eq!(update.width, None);
    }

    #[test]
    fn drag_clamps_midpoint_to_wall_extent() {
        let (mut plan, wall) = plan_with_wall();
        let window = with_window(&mut plan, wall);
        let update = opening_update(
            DragOpening::new(window, p(900.0, 0.0))
                .execute(&plan, &EditorConfig::default())
                .unwrap(),
        );
        assert_eq!(update.start, Some(p(300.0, 0.0)));
        assert_eq!(update.end, Some(p(500.0, 0.0)));
    }

    #[test]
    fn clipped_drag_keeps_both_ends_on_wall() {
        let (mut plan, wall) = plan_with_wall();
        let window = with_window(&mut plan, wall);
        let update = opening_update(
            DragOpening::new(window, p(350.0, 40.0))
                .execute(&plan, &clipped())
                .unwrap(),
        );
        assert_eq!(update.start, Some(p(200.0, 0.0)));
        assert_eq!(update.end, Some(p(400.0, 0.0)));
    }

    #[test]
    fn detached_opening_cannot_be_dragged() {
        let mut plan = Plan::new();
        let window = plan
            .add_opening(Opening::new(OpeningKind::Window, p(0.0, 0.0), p(100.0, 0.0), None))
            .unwrap();
        assert!(DragOpening::new(window, p(10.0, 0.0))
            .execute(&plan, &EditorConfig::default())
            .is_none());
    }

    // ── resize ──

    #[test]
    fn resize_moves_one_end_and_updates_width() {
        let (mut plan, wall) = plan_with_wall();
        let window = with_window(&mut plan, wall);
        let update = opening_update(
            ResizeOpening::new(window, Endpoint::End, p(250.0, 7.0))
                .execute(&plan, &EditorConfig::default())
                .unwrap(),
        );
        assert_eq!(update.start, None);
        assert_eq!(update.end, Some(p(250.0, 0.0)));
        assert_eq!(update.width, Some(150.0));
    }

    #[test]
    fn resize_below_minimum_is_a_no_op() {
        let (mut plan, wall) = plan_with_wall();
        let window = with_window(&mut plan, wall);
        assert!(ResizeOpening::new(window, Endpoint::End, p(115.0, 3.0))
            .execute(&plan, &EditorConfig::default())
            .is_none());
        assert!(ResizeOpening::new(window, Endpoint::Start, p(290.0, 0.0))
            .execute(&plan, &EditorConfig::default())
            .is_none());
        // Exactly the minimum is accepted.
        assert!(ResizeOpening::new(window, Endpoint::Start, p(280.0, 0.0))
            .execute(&plan, &EditorConfig::default())
            .is_some());
    }
}
