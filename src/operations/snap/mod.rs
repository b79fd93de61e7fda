mod axis_snap;
mod closure;
mod point_snap;

pub use axis_snap::{axis_align_snap_to_other_walls, axis_snap, AxisAlignment};
pub use closure::is_closing_shape;
pub use point_snap::{find_snap_vertex, point_snap};

use tracing::trace;

use crate::config::EditorConfig;
use crate::math::{round_point, Point2};
use crate::topology::Wall;

/// Which rule produced a snapped point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapKind {
    /// Landed exactly on an existing wall endpoint.
    Vertex,
    /// Locked to the horizontal or vertical through the reference point.
    Axis,
    /// Aligned with an endpoint of another wall.
    WallAlignment,
    /// No rule applied; the point is only rounded.
    Free,
}

/// A resolved pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapOutcome {
    pub point: Point2,
    pub kind: SnapKind,
}

impl SnapOutcome {
    /// Whether the point was locked to an axis, which the preview highlights.
    #[must_use]
    pub fn axis_snapped(&self) -> bool {
        matches!(self.kind, SnapKind::Axis | SnapKind::WallAlignment)
    }
}

/// Runs the snap rules in their fixed order: endpoint snap, then axis lock
/// to the reference point, then alignment with other walls.
///
/// Every rule runs on the result of the previous one and may override it,
/// so an endpoint hit can still be pulled onto an axis. The outcome keeps
/// `SnapKind::Vertex` only when neither later rule moved the endpoint.
#[derive(Debug, Clone, Copy)]
pub struct SnapComposer {
    snap_distance: f64,
    axis_snap_distance: f64,
}

impl SnapComposer {
    #[must_use]
    pub fn new(snap_distance: f64, axis_snap_distance: f64) -> Self {
        Self {
            snap_distance,
            axis_snap_distance,
        }
    }

    #[must_use]
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.snap_distance, config.axis_snap_distance)
    }

    /// Resolves a raw pointer position against the current walls.
    ///
    /// Without a `reference` only endpoint snapping and rounding apply.
    #[must_use]
    pub fn resolve(
        &self,
        candidate: &Point2,
        reference: Option<&Point2>,
        walls: &[Wall],
    ) -> SnapOutcome {
        let outcome = self.resolve_inner(candidate, reference, walls);
        trace!(
            x = candidate.x,
            y = candidate.y,
            snapped_x = outcome.point.x,
            snapped_y = outcome.point.y,
            kind = ?outcome.kind,
            "snap resolved"
        );
        outcome
    }

    fn resolve_inner(
        &self,
        candidate: &Point2,
        reference: Option<&Point2>,
        walls: &[Wall],
    ) -> SnapOutcome {
        let (base, on_vertex) = match find_snap_vertex(candidate, walls, self.snap_distance) {
            Some(vertex) => (vertex, true),
            None => (round_point(candidate), false),
        };
        let untouched = if on_vertex {
            SnapKind::Vertex
        } else {
            SnapKind::Free
        };
        let Some(reference) = reference else {
            return SnapOutcome {
                point: base,
                kind: untouched,
            };
        };

        let axis_locked = axis_snap(&base, reference, self.axis_snap_distance);
        let aligned = axis_align_snap_to_other_walls(&axis_locked, walls, self.axis_snap_distance);
        let kind = if aligned.point != axis_locked {
            SnapKind::WallAlignment
        } else if axis_locked != base {
            SnapKind::Axis
        } else if aligned.snapped && !on_vertex {
            SnapKind::WallAlignment
        } else {
            untouched
        };
        SnapOutcome {
            point: aligned.point,
            kind,
        }
    }
}
