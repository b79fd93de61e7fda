use tracing::debug;

use crate::config::EditorConfig;
use crate::error::{GeometryError, PlanError, Result};
use crate::math::{distance, round_point, to_internal_units, Point2};
use crate::topology::{Change, ElementUpdate, Endpoint, Plan, WallId, WallUpdate};

const MIN_LENGTH_MM: f64 = 100.0;
const HEIGHT_RANGE_CM: (f64, f64) = (200.0, 500.0);
const THICKNESS_RANGE: (f64, f64) = (5.0, 30.0);

/// Drags one end of a wall, carrying every wall that shares the corner.
pub struct DragWallEndpoint {
    wall: WallId,
    end: Endpoint,
    point: Point2,
}

impl DragWallEndpoint {
    /// Creates a new `DragWallEndpoint` operation.
    #[must_use]
    pub fn new(wall: WallId, end: Endpoint, point: Point2) -> Self {
        Self { wall, end, point }
    }

    /// Returns one update per wall meeting at the dragged corner, all moving
    /// it to the rounded target point.
    ///
    /// Returns `None` if the wall is unknown or if any of those walls would
    /// become shorter than `vertex_tolerance`.
    #[must_use]
    pub fn execute(&self, plan: &Plan, config: &EditorConfig) -> Option<Vec<Change>> {
        let corner = plan.wall_vertex(self.wall, self.end).ok()?;
        let target = round_point(&self.point);

        let mut changes = Vec::new();
        for id in plan.walls_at(corner) {
            let wall = plan.wall(id).ok()?;
            let end = if plan.wall_vertex(id, Endpoint::Start).ok()? == corner {
                Endpoint::Start
            } else {
                Endpoint::End
            };
            if distance(&wall.endpoint(end.other()), &target) < config.vertex_tolerance {
                debug!(x = target.x, y = target.y, "corner drag would collapse a wall");
                return None;
            }
            changes.push(Change::Update(
                id.into(),
                ElementUpdate::Wall(WallUpdate::endpoint(end, target)),
            ));
        }
        Some(changes)
    }
}

/// Sets a wall's length in millimeters, keeping its start and direction.
pub struct SetWallLength {
    wall: WallId,
    length_mm: f64,
}

impl SetWallLength {
    #[must_use]
    pub fn new(wall: WallId, length_mm: f64) -> Self {
        Self { wall, length_mm }
    }

    /// # Errors
    ///
    /// Returns `PlanError::ParameterOutOfRange` below 100 mm,
    /// `GeometryError::ZeroVector` if the wall has no direction, and
    /// `PlanError::EntityNotFound` for an unknown wall.
    pub fn execute(&self, plan: &Plan) -> Result<Change> {
        if self.length_mm.is_nan() || self.length_mm < MIN_LENGTH_MM {
            return Err(PlanError::ParameterOutOfRange {
                parameter: "length",
                value: self.length_mm,
                min: MIN_LENGTH_MM,
                max: f64::INFINITY,
            }
            .into());
        }
        let wall = plan.wall(self.wall)?;
        let dir = wall.direction().ok_or(GeometryError::ZeroVector)?;
        let end = wall.start + dir * to_internal_units(self.length_mm);
        Ok(Change::Update(
            self.wall.into(),
            ElementUpdate::Wall(WallUpdate::endpoint(Endpoint::End, end)),
        ))
    }
}

/// Sets a wall's room height in centimeters.
pub struct SetWallHeight {
    wall: WallId,
    height_cm: f64,
}

impl SetWallHeight {
    #[must_use]
    pub fn new(wall: WallId, height_cm: f64) -> Self {
        Self { wall, height_cm }
    }

    /// # Errors
    ///
    /// Returns `PlanError::ParameterOutOfRange` outside 200..=500 cm and
    /// `PlanError::EntityNotFound` for an unknown wall.
    pub fn execute(&self, plan: &Plan) -> Result<Change> {
        check_range("height", self.height_cm, HEIGHT_RANGE_CM)?;
        plan.wall(self.wall)?;
        Ok(Change::Update(
            self.wall.into(),
            ElementUpdate::Wall(WallUpdate {
                height: Some(self.height_cm),
                ..WallUpdate::default()
            }),
        ))
    }
}

/// Sets a wall's thickness in plan units.
pub struct SetWallThickness {
    wall: WallId,
    thickness: f64,
}

impl SetWallThickness {
    #[must_use]
    pub fn new(wall: WallId, thickness: f64) -> Self {
        Self { wall, thickness }
    }

    /// # Errors
    ///
    /// Returns `PlanError::ParameterOutOfRange` outside 5..=30 and
    /// `PlanError::EntityNotFound` for an unknown wall.
    pub fn execute(&self, plan: &Plan) -> Result<Change> {
        check_range("thickness", self.thickness, THICKNESS_RANGE)?;
        plan.wall(self.wall)?;
        Ok(Change::Update(
            self.wall.into(),
            ElementUpdate::Wall(WallUpdate {
                thickness: Some(self.thickness),
                ..WallUpdate::default()
            }),
        ))
    }
}

fn check_range(parameter: &'static str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(PlanError::ParameterOutOfRange {
            parameter,
            value,
            min,
            max,
        }
        .into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FloorplanError;
    use crate::topology::Wall;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    /// Two walls meeting at (100, 0) plus an unrelated wall.
    fn corner_plan() -> (Plan, [WallId; 3]) {
        let mut plan = Plan::new();
        let a = plan.add_wall(Wall::new(p(0.0, 0.0), p(100.0, 0.0), 10.0)).unwrap();
        let b = plan.add_wall(Wall::new(p(100.0, 0.0), p(100.0, 100.0), 10.0)).unwrap();
        let c = plan.add_wall(Wall::new(p(300.0, 0.0), p(300.0, 100.0), 10.0)).unwrap();
        (plan, [a, b, c])
    }

    // ── corner drag ──

    #[test]
    fn corner_drag_updates_every_incident_wall() {
        let (plan, [a, b, c]) = corner_plan();
        let changes = DragWallEndpoint::new(a, Endpoint::End, p(120.4, -9.6))
            .execute(&plan, &EditorConfig::default())
            .unwrap();
        assert_eq!(
            changes,
            vec![
                Change::Update(
                    a.into(),
                    ElementUpdate::Wall(WallUpdate::endpoint(Endpoint::End, p(120.0, -10.0)))
                ),
                Change::Update(
                    b.into(),
                    ElementUpdate::Wall(WallUpdate::endpoint(Endpoint::Start, p(120.0, -10.0)))
                ),
            ]
        );

        let next = plan.applied(&changes).unwrap();
        assert_eq!(next.wall(a).unwrap().end, p(120.0, -10.0));
        assert_eq!(next.wall(b).unwrap().start, p(120.0, -10.0));
        assert_eq!(next.wall(c).unwrap(), plan.wall(c).unwrap());
    }

    #[test]
    fn corner_drag_refuses_to_collapse_a_wall() {
        let (plan, [a, ..]) = corner_plan();
        // Onto the far end of the second wall.
        assert!(DragWallEndpoint::new(a, Endpoint::End, p(101.0, 98.0))
            .execute(&plan, &EditorConfig::default())
            .is_none());
        // Onto the wall's own start.
        assert!(DragWallEndpoint::new(a, Endpoint::End, p(2.0, 0.0))
            .execute(&plan, &EditorConfig::default())
            .is_none());
    }

    #[test]
    fn free_end_drag_touches_one_wall() {
        let (plan, [a, ..]) = corner_plan();
        let changes = DragWallEndpoint::new(a, Endpoint::Start, p(-50.0, 0.0))
            .execute(&plan, &EditorConfig::default())
            .unwrap();
        assert_eq!(changes.len(), 1);
    }

    // ── properties ──

    #[test]
    fn length_keeps_direction() {
        let mut plan = Plan::new();
        let w = plan.add_wall(Wall::new(p(0.0, 0.0), p(30.0, 40.0), 10.0)).unwrap();
        let change = SetWallLength::new(w, 1000.0).execute(&plan).unwrap();
        let next = plan.applied(&[change]).unwrap();
        let wall = next.wall(w).unwrap();
        assert_relative_eq!(wall.end.x, 60.0, epsilon = 1e-9);
        assert_relative_eq!(wall.end.y, 80.0, epsilon = 1e-9);
        assert_eq!(wall.start, p(0.0, 0.0));
    }

    #[test]
    fn length_below_minimum_is_rejected() {
        let (plan, [a, ..]) = corner_plan();
        let err = SetWallLength::new(a, 99.0).execute(&plan).unwrap_err();
        assert!(matches!(
            err,
            FloorplanError::Plan(PlanError::ParameterOutOfRange {
                parameter: "length",
                ..
            })
        ));
        assert!(SetWallLength::new(a, f64::NAN).execute(&plan).is_err());
    }

    #[test]
    fn height_and_thickness_ranges() {
        let (plan, [a, ..]) = corner_plan();
        assert!(SetWallHeight::new(a, 200.0).execute(&plan).is_ok());
        assert!(SetWallHeight::new(a, 500.0).execute(&plan).is_ok());
        assert!(SetWallHeight::new(a, 199.0).execute(&plan).is_err());
        assert!(SetWallHeight::new(a, 501.0).execute(&plan).is_err());
        assert!(SetWallThickness::new(a, 5.0).execute(&plan).is_ok());
        assert!(SetWallThickness::new(a, 31.0).execute(&plan).is_err());

        let change = SetWallThickness::new(a, 20.0).execute(&plan).unwrap();
        let next = plan.applied(&[change]).unwrap();
        assert_relative_eq!(next.wall(a).unwrap().thickness, 20.0);
    }

    #[test]
    fn unknown_wall_is_not_found() {
        let (mut plan, [a, ..]) = corner_plan();
        plan.remove(a.into()).unwrap();
        let err = SetWallHeight::new(a, 250.0).execute(&plan).unwrap_err();
        assert!(matches!(err, FloorplanError::Plan(PlanError::EntityNotFound(_))));
    }
}
