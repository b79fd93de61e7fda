use crate::math::{distance, midpoint, Point2};

use super::wall::WallId;
use super::Endpoint;

slotmap::new_key_type! {
    /// Unique identifier for a window or door in the plan.
    pub struct OpeningId;
}

/// The two kinds of wall-hosted openings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpeningKind {
    Window,
    Door,
}

impl OpeningKind {
    /// Lowercase name, used in logs and error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Window => "window",
            Self::Door => "door",
        }
    }
}

/// A window or door: a segment lying on its host wall's line.
///
/// `wall` is a lookup key only; the plan keeps it in sync with its
/// dependents index but never owns the wall through it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opening {
    pub kind: OpeningKind,
    pub start: Point2,
    pub end: Point2,
    /// Along-wall length in internal units.
    pub width: f64,
    pub wall: Option<WallId>,
}

impl Opening {
    /// Creates an opening spanning `start → end`; `width` is derived from the span.
    #[must_use]
    pub fn new(kind: OpeningKind, start: Point2, end: Point2, wall: Option<WallId>) -> Self {
        Self {
            kind,
            start,
            end,
            width: distance(&start, &end),
            wall,
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        midpoint(&self.start, &self.end)
    }

    /// Returns the coordinate of the requested end.
    #[must_use]
    pub fn endpoint(&self, end: Endpoint) -> Point2 {
        match end {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        }
    }
}
