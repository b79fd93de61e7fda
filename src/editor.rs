use tracing::{debug, warn};

use crate::config::EditorConfig;
use crate::document::{Document, ElementSink};
use crate::error::Result;
use crate::math::Point2;
use crate::operations::draw::{Clock, SystemClock, WallDrawing};
use crate::operations::edit::{DeleteElement, DragWallEndpoint};
use crate::operations::placement::{
    snap_furniture_to_walls, DragOpening, PlaceOpening, ResizeOpening,
};
use crate::topology::{
    Change, Element, ElementId, ElementUpdate, Endpoint, Furniture, FurnitureId, FurnitureUpdate,
    OpeningId, OpeningKind, Product, WallId,
};

/// The active editing tool.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Tool {
    #[default]
    Select,
    Wall,
    Window,
    Door,
    /// Places one item of the given product, then returns to `Select`.
    Furniture(Product),
}

/// What a drag gesture grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    WallEndpoint(WallId, Endpoint),
    Opening(OpeningId),
    OpeningEndpoint(OpeningId, Endpoint),
    Furniture(FurnitureId),
}

impl DragTarget {
    fn element(self) -> ElementId {
        match self {
            Self::WallEndpoint(id, _) => id.into(),
            Self::Opening(id) | Self::OpeningEndpoint(id, _) => id.into(),
            Self::Furniture(id) => id.into(),
        }
    }
}

/// Pointer and keyboard input, in plan coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Click(Point2),
    Move(Point2),
    DragStart(DragTarget),
    DragMove(Point2),
    DragEnd(Point2),
    Cancel,
    Delete(ElementId),
}

/// Routes input events to the drawing session and the editing operations,
/// and forwards the resulting changes to an [`ElementSink`].
#[derive(Debug)]
pub struct Editor<S: ElementSink, C: Clock = SystemClock> {
    sink: S,
    config: EditorConfig,
    tool: Tool,
    drawing: WallDrawing<C>,
    drag: Option<DragTarget>,
}

impl Editor<Document> {
    /// An editor over a fresh [`Document`] using the system clock.
    #[must_use]
    pub fn with_document(config: EditorConfig) -> Self {
        let document = Document::new(&config);
        Self::new(document, config, SystemClock::default())
    }
}

impl<S: ElementSink, C: Clock> Editor<S, C> {
    #[must_use]
    pub fn new(sink: S, config: EditorConfig, clock: C) -> Self {
        let drawing = WallDrawing::new(&config, clock);
        Self {
            sink,
            config,
            tool: Tool::Select,
            drawing,
            drag: None,
        }
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    #[must_use]
    pub fn drawing(&self) -> &WallDrawing<C> {
        &self.drawing
    }

    /// The drag gesture in progress, if any.
    #[must_use]
    pub fn drag(&self) -> Option<DragTarget> {
        self.drag
    }

    /// Switches tools. Leaving the wall tool abandons an unfinished session.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool != Tool::Wall {
            self.drawing.cancel();
        }
        debug!(?tool, "tool selected");
        self.tool = tool;
    }

    /// Handles one input event.
    ///
    /// Returns `true` if the sink accepted at least one change. Refused
    /// placements, drags and resizes are not errors; they simply change
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::EntityNotFound` when a drag or delete names an
    /// element that is not in the plan, and `PlanError::HasDependents` when
    /// the orphan policy forbids deleting a wall.
    pub fn handle(&mut self, event: InputEvent) -> Result<bool> {
        match event {
            InputEvent::Click(point) => Ok(self.click(point)),
            InputEvent::Move(point) => {
                if self.tool == Tool::Wall {
                    self.drawing.pointer_moved(point, self.sink.snapshot());
                }
                Ok(false)
            }
            InputEvent::DragStart(target) => {
                self.sink.snapshot().element(target.element())?;
                self.drag = Some(target);
                Ok(false)
            }
            InputEvent::DragMove(point) => Ok(self.drag_to(point)),
            InputEvent::DragEnd(point) => {
                let moved = self.drag_to(point);
                let snapped = match self.drag.take() {
                    Some(DragTarget::Furniture(id)) => self.snap_furniture(id, point),
                    _ => false,
                };
                Ok(moved || snapped)
            }
            InputEvent::Cancel => {
                self.drawing.cancel();
                self.drag = None;
                Ok(false)
            }
            InputEvent::Delete(id) => {
                let changes =
                    DeleteElement::new(id).execute(self.sink.snapshot(), self.config.orphan_policy)?;
                if self.drag.is_some_and(|drag| drag.element() == id) {
                    self.drag = None;
                }
                Ok(self.submit_all(changes))
            }
        }
    }

    fn click(&mut self, point: Point2) -> bool {
        match &self.tool {
            Tool::Select => false,
            Tool::Wall => {
                let before = self.sink.snapshot().len();
                self.drawing.click(point, &mut self.sink);
                self.sink.snapshot().len() != before
            }
            Tool::Window => self.place_opening(OpeningKind::Window, point),
            Tool::Door => self.place_opening(OpeningKind::Door, point),
            Tool::Furniture(product) => {
                let item = Furniture::from_product(product, point);
                let added = self.sink.add_element(Element::Furniture(item)).is_some();
                if added {
                    self.tool = Tool::Select;
                }
                added
            }
        }
    }

    fn place_opening(&mut self, kind: OpeningKind, point: Point2) -> bool {
        match PlaceOpening::new(kind, point).execute(self.sink.snapshot(), &self.config) {
            Some(opening) => self.sink.add_element(Element::Opening(opening)).is_some(),
            None => false,
        }
    }

    fn drag_to(&mut self, point: Point2) -> bool {
        let Some(target) = self.drag else {
            return false;
        };
        let plan = self.sink.snapshot();
        let changes = match target {
            DragTarget::WallEndpoint(wall, end) => {
                DragWallEndpoint::new(wall, end, point).execute(plan, &self.config)
            }
            DragTarget::Opening(id) => DragOpening::new(id, point)
                .execute(plan, &self.config)
                .map(|change| vec![change]),
            DragTarget::OpeningEndpoint(id, end) => ResizeOpening::new(id, end, point)
                .execute(plan, &self.config)
                .map(|change| vec![change]),
            DragTarget::Furniture(id) => Some(vec![move_furniture(id, point)]),
        };
        changes.is_some_and(|changes| self.submit_all(changes))
    }

    fn snap_furniture(&mut self, id: FurnitureId, point: Point2) -> bool {
        let plan = self.sink.snapshot();
        let Ok(item) = plan.furniture_item(id) else {
            return false;
        };
        let snapped = snap_furniture_to_walls(&point, item, &plan.wall_values(), &self.config);
        if snapped == item.position {
            return false;
        }
        debug!(x = snapped.x, y = snapped.y, "furniture snapped to walls");
        self.sink.submit(move_furniture(id, snapped))
    }

    /// Submits a batch of changes only if the whole batch applies cleanly to
    /// the current snapshot.
    fn submit_all(&mut self, changes: Vec<Change>) -> bool {
        if let Err(err) = self.sink.snapshot().applied(&changes) {
            warn!(%err, count = changes.len(), "change batch refused");
            return false;
        }
        let mut accepted = false;
        for change in changes {
            accepted |= self.sink.submit(change);
        }
        accepted
    }
}

fn move_furniture(id: FurnitureId, position: Point2) -> Change {
    Change::Update(
        id.into(),
        ElementUpdate::Furniture(FurnitureUpdate {
            position: Some(position),
            ..FurnitureUpdate::default()
        }),
    )
}
