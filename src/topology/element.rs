use crate::math::Point2;

use super::furniture::{Dimensions, Furniture, FurnitureId};
use super::opening::{Opening, OpeningId, OpeningKind};
use super::wall::{Wall, WallId};

/// One end of a wall or opening segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    End,
}

impl Endpoint {
    /// The opposite end of the same segment.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// The four kinds of plan elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Wall,
    Window,
    Door,
    Furniture,
}

impl ElementKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::Window => "window",
            Self::Door => "door",
            Self::Furniture => "furniture",
        }
    }
}

impl From<OpeningKind> for ElementKind {
    fn from(kind: OpeningKind) -> Self {
        match kind {
            OpeningKind::Window => Self::Window,
            OpeningKind::Door => Self::Door,
        }
    }
}

/// Identifier of any element in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Wall(WallId),
    Opening(OpeningId),
    Furniture(FurnitureId),
}

impl From<WallId> for ElementId {
    fn from(id: WallId) -> Self {
        Self::Wall(id)
    }
}

impl From<OpeningId> for ElementId {
    fn from(id: OpeningId) -> Self {
        Self::Opening(id)
    }
}

impl From<FurnitureId> for ElementId {
    fn from(id: FurnitureId) -> Self {
        Self::Furniture(id)
    }
}

/// A plan element by value.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Wall(Wall),
    Opening(Opening),
    Furniture(Furniture),
}

impl Element {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Wall(_) => ElementKind::Wall,
            Self::Opening(opening) => opening.kind.into(),
            Self::Furniture(_) => ElementKind::Furniture,
        }
    }
}

/// Partial update of a wall. Moving an endpoint moves the shared corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WallUpdate {
    pub start: Option<Point2>,
    pub end: Option<Point2>,
    pub thickness: Option<f64>,
    pub height: Option<f64>,
}

impl WallUpdate {
    /// An update moving one end of the wall.
    #[must_use]
    pub fn endpoint(end: Endpoint, point: Point2) -> Self {
        match end {
            Endpoint::Start => Self {
                start: Some(point),
                ..Self::default()
            },
            Endpoint::End => Self {
                end: Some(point),
                ..Self::default()
            },
        }
    }
}

/// Partial update of a window or door.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OpeningUpdate {
    pub start: Option<Point2>,
    pub end: Option<Point2>,
    pub width: Option<f64>,
    /// `Some(None)` detaches the opening from its wall.
    pub wall: Option<Option<WallId>>,
}

/// Partial update of a furniture item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FurnitureUpdate {
    pub position: Option<Point2>,
    pub dimensions: Option<Dimensions>,
    pub rotation: Option<f64>,
    pub price: Option<f64>,
    pub name: Option<String>,
    pub product_id: Option<String>,
}

/// Partial update addressed to one element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementUpdate {
    Wall(WallUpdate),
    Opening(OpeningUpdate),
    Furniture(FurnitureUpdate),
}

impl ElementUpdate {
    pub(crate) fn target_name(&self) -> &'static str {
        match self {
            Self::Wall(_) => "wall",
            Self::Opening(_) => "opening",
            Self::Furniture(_) => "furniture",
        }
    }
}

/// A single mutation of the plan, as emitted by the editing operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Add(Element),
    Update(ElementId, ElementUpdate),
    Delete(ElementId),
}
