pub mod element;
pub mod furniture;
pub mod opening;
pub mod vertex;
pub mod wall;

pub use element::{
    Change, Element, ElementId, ElementKind, ElementUpdate, Endpoint, FurnitureUpdate,
    OpeningUpdate, WallUpdate,
};
pub use furniture::{Dimensions, Furniture, FurnitureId, Product};
pub use opening::{Opening, OpeningId, OpeningKind};
pub use vertex::{VertexData, VertexId};
pub use wall::{Wall, WallData, WallId};

use crate::error::{GeometryError, PlanError, Result};
use crate::math::{angle_between, distance, Point2, TOLERANCE};
use slotmap::{SecondaryMap, SlotMap};

const DEFAULT_VERTEX_TOLERANCE: f64 = 5.0;

/// The element collection: central arena that owns every wall, corner,
/// opening and furniture item of a floor plan.
///
/// Walls reference corners by [`VertexId`], so walls meeting at a corner
/// share it explicitly. Openings reference their host wall by [`WallId`]; the
/// reverse index is kept in the same mutation that changes the reference.
///
/// Insertion order is preserved and is the scan order of every
/// "first match wins" rule in the snapping and placement engines.
///
/// A `Plan` is a cheap-to-clone snapshot. Editing code never mutates the
/// snapshot it reads; it builds a new one with [`Plan::applied`].
#[derive(Debug, Clone)]
pub struct Plan {
    vertices: SlotMap<VertexId, VertexData>,
    walls: SlotMap<WallId, WallData>,
    openings: SlotMap<OpeningId, Opening>,
    furniture: SlotMap<FurnitureId, Furniture>,
    order: Vec<ElementId>,
    dependents: SecondaryMap<WallId, Vec<OpeningId>>,
    vertex_tolerance: f64,
}

impl Default for Plan {
    fn default() -> Self {
        Self::with_vertex_tolerance(DEFAULT_VERTEX_TOLERANCE)
    }
}

impl Plan {
    /// Creates a new, empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty plan whose wall endpoints weld into one corner when
    /// closer than `vertex_tolerance`.
    #[must_use]
    pub fn with_vertex_tolerance(vertex_tolerance: f64) -> Self {
        Self {
            vertices: SlotMap::with_key(),
            walls: SlotMap::with_key(),
            openings: SlotMap::with_key(),
            furniture: SlotMap::with_key(),
            order: Vec::new(),
            dependents: SecondaryMap::new(),
            vertex_tolerance,
        }
    }

    #[must_use]
    pub fn vertex_tolerance(&self) -> f64 {
        self.vertex_tolerance
    }

    /// Number of elements (corners are not elements).
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Element ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[ElementId] {
        &self.order
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        match id {
            ElementId::Wall(id) => self.walls.contains_key(id),
            ElementId::Opening(id) => self.openings.contains_key(id),
            ElementId::Furniture(id) => self.furniture.contains_key(id),
        }
    }

    // --- Corner queries ---

    /// Returns the corner data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the corner is not in the plan.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData> {
        Ok(self
            .vertices
            .get(id)
            .ok_or_else(|| PlanError::EntityNotFound("vertex".into()))?)
    }

    /// Corner at one end of a wall.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not in the plan.
    pub fn wall_vertex(&self, wall: WallId, end: Endpoint) -> Result<VertexId> {
        let data = self.wall_data(wall)?;
        Ok(match end {
            Endpoint::Start => data.start,
            Endpoint::End => data.end,
        })
    }

    /// Walls meeting at a corner, in insertion order.
    #[must_use]
    pub fn walls_at(&self, vertex: VertexId) -> Vec<WallId> {
        self.wall_ids()
            .filter(|id| {
                self.walls
                    .get(*id)
                    .is_some_and(|w| w.start == vertex || w.end == vertex)
            })
            .collect()
    }

    /// Nearest corner strictly closer than the weld tolerance.
    #[must_use]
    pub fn find_vertex(&self, point: &Point2) -> Option<VertexId> {
        self.vertices
            .iter()
            .map(|(id, v)| (id, distance(&v.point, point)))
            .filter(|(_, d)| *d < self.vertex_tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    // --- Wall queries ---

    /// Returns the wall resolved to coordinates, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall or one of its corners is not in the plan.
    pub fn wall(&self, id: WallId) -> Result<Wall> {
        let data = self.wall_data(id)?;
        Ok(Wall {
            start: self.vertex(data.start)?.point,
            end: self.vertex(data.end)?.point,
            thickness: data.thickness,
            height: data.height,
        })
    }

    fn wall_data(&self, id: WallId) -> Result<&WallData> {
        Ok(self
            .walls
            .get(id)
            .ok_or_else(|| PlanError::EntityNotFound("wall".into()))?)
    }

    fn wall_ids(&self) -> impl Iterator<Item = WallId> + '_ {
        self.order.iter().filter_map(|id| match id {
            ElementId::Wall(id) => Some(*id),
            _ => None,
        })
    }

    /// Walls in insertion order.
    pub fn walls(&self) -> impl Iterator<Item = (WallId, Wall)> + '_ {
        self.wall_ids()
            .filter_map(|id| self.wall(id).ok().map(|wall| (id, wall)))
    }

    /// Wall values in insertion order, the shape the snap engine consumes.
    #[must_use]
    pub fn wall_values(&self) -> Vec<Wall> {
        self.walls().map(|(_, wall)| wall).collect()
    }

    /// Openings hosted by a wall.
    #[must_use]
    pub fn dependents(&self, wall: WallId) -> &[OpeningId] {
        self.dependents.get(wall).map_or(&[], Vec::as_slice)
    }

    // --- Opening and furniture queries ---

    /// Returns the opening, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the opening is not in the plan.
    pub fn opening(&self, id: OpeningId) -> Result<&Opening> {
        Ok(self
            .openings
            .get(id)
            .ok_or_else(|| PlanError::EntityNotFound("opening".into()))?)
    }

    /// Windows and doors in insertion order.
    pub fn openings(&self) -> impl Iterator<Item = (OpeningId, &Opening)> + '_ {
        self.order.iter().filter_map(|id| match id {
            ElementId::Opening(id) => self.openings.get(*id).map(|o| (*id, o)),
            _ => None,
        })
    }

    /// Returns the furniture item, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not in the plan.
    pub fn furniture_item(&self, id: FurnitureId) -> Result<&Furniture> {
        Ok(self
            .furniture
            .get(id)
            .ok_or_else(|| PlanError::EntityNotFound("furniture".into()))?)
    }

    /// Furniture in insertion order.
    pub fn furniture(&self) -> impl Iterator<Item = (FurnitureId, &Furniture)> + '_ {
        self.order.iter().filter_map(|id| match id {
            ElementId::Furniture(id) => self.furniture.get(*id).map(|f| (*id, f)),
            _ => None,
        })
    }

    /// Returns any element by value.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not in the plan.
    pub fn element(&self, id: ElementId) -> Result<Element> {
        Ok(match id {
            ElementId::Wall(id) => Element::Wall(self.wall(id)?),
            ElementId::Opening(id) => Element::Opening(*self.opening(id)?),
            ElementId::Furniture(id) => Element::Furniture(self.furniture_item(id)?.clone()),
        })
    }

    /// All elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, Element)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.element(*id).ok().map(|e| (*id, e)))
    }

    /// Sum of all furniture prices.
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.furniture().map(|(_, f)| f.price).sum()
    }

    /// Interior angle, in degrees, at every corner joining exactly two walls.
    ///
    /// Corners are reported in the order their first wall was drawn.
    #[must_use]
    pub fn corner_angles(&self) -> Vec<(VertexId, f64)> {
        let mut seen: SecondaryMap<VertexId, ()> = SecondaryMap::new();
        let mut angles = Vec::new();
        for wall in self.wall_ids() {
            let Some(data) = self.walls.get(wall) else {
                continue;
            };
            for vertex in [data.start, data.end] {
                if seen.insert(vertex, ()).is_some() {
                    continue;
                }
                if let Some(angle) = self.corner_angle(vertex) {
                    angles.push((vertex, angle));
                }
            }
        }
        angles
    }

    fn corner_angle(&self, vertex: VertexId) -> Option<f64> {
        let walls = self.walls_at(vertex);
        let [a, b] = walls.as_slice() else {
            return None;
        };
        let far = |id: WallId| -> Option<Point2> {
            let data = self.walls.get(id)?;
            let other = if data.start == vertex { data.end } else { data.start };
            self.vertices.get(other).map(|v| v.point)
        };
        let corner = self.vertices.get(vertex)?.point;
        angle_between(&far(*a)?, &corner, &far(*b)?)
    }

    // --- Mutation ---

    /// Inserts a wall, welding each endpoint onto an existing corner within
    /// the weld tolerance.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if both endpoints resolve to the
    /// same corner.
    pub fn add_wall(&mut self, wall: Wall) -> Result<WallId> {
        if distance(&wall.start, &wall.end) < self.vertex_tolerance {
            return Err(GeometryError::Degenerate(format!(
                "wall from ({}, {}) to ({}, {}) is shorter than the weld tolerance",
                wall.start.x, wall.start.y, wall.end.x, wall.end.y
            ))
            .into());
        }
        let start = self.find_vertex(&wall.start);
        let end = self.find_vertex(&wall.end);
        if start.is_some() && start == end {
            return Err(
                GeometryError::Degenerate("both wall ends weld to one corner".to_owned()).into(),
            );
        }
        let start = start.unwrap_or_else(|| self.vertices.insert(VertexData::new(wall.start)));
        let end = end.unwrap_or_else(|| self.vertices.insert(VertexData::new(wall.end)));

        let id = self.walls.insert(WallData {
            start,
            end,
            thickness: wall.thickness,
            height: wall.height,
        });
        self.dependents.insert(id, Vec::new());
        self.order.push(id.into());
        Ok(id)
    }

    /// Inserts a window or door.
    ///
    /// # Errors
    ///
    /// Returns an error if the opening references a wall that is not in the plan.
    pub fn add_opening(&mut self, opening: Opening) -> Result<OpeningId> {
        if let Some(wall) = opening.wall {
            self.wall_data(wall)?;
        }
        let id = self.openings.insert(opening);
        self.link(opening.wall, id);
        self.order.push(id.into());
        Ok(id)
    }

    /// Inserts a furniture item.
    pub fn add_furniture(&mut self, furniture: Furniture) -> FurnitureId {
        let id = self.furniture.insert(furniture);
        self.order.push(id.into());
        id
    }

    /// Inserts any element.
    ///
    /// # Errors
    ///
    /// See [`Plan::add_wall`] and [`Plan::add_opening`].
    pub fn add(&mut self, element: Element) -> Result<ElementId> {
        Ok(match element {
            Element::Wall(wall) => self.add_wall(wall)?.into(),
            Element::Opening(opening) => self.add_opening(opening)?.into(),
            Element::Furniture(furniture) => self.add_furniture(furniture).into(),
        })
    }

    /// Applies a partial update to one element.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::KindMismatch` if the update does not fit the
    /// element, `PlanError::EntityNotFound` for unknown ids, and
    /// `GeometryError::Degenerate` if moving a corner would collapse a wall.
    pub fn update(&mut self, id: ElementId, update: &ElementUpdate) -> Result<()> {
        match (id, update) {
            (ElementId::Wall(id), ElementUpdate::Wall(u)) => self.update_wall(id, u),
            (ElementId::Opening(id), ElementUpdate::Opening(u)) => self.update_opening(id, u),
            (ElementId::Furniture(id), ElementUpdate::Furniture(u)) => {
                self.update_furniture(id, u)
            }
            (id, update) => Err(PlanError::KindMismatch {
                expected: id_name(id),
                found: update.target_name(),
            }
            .into()),
        }
    }

    fn update_wall(&mut self, id: WallId, update: &WallUpdate) -> Result<()> {
        let data = self.wall_data(id)?.clone();
        if let Some(point) = update.start {
            self.move_vertex(data.start, point)?;
        }
        if let Some(point) = update.end {
            self.move_vertex(data.end, point)?;
        }
        let data = self
            .walls
            .get_mut(id)
            .ok_or_else(|| PlanError::EntityNotFound("wall".into()))?;
        if let Some(thickness) = update.thickness {
            data.thickness = thickness;
        }
        if let Some(height) = update.height {
            data.height = Some(height);
        }
        Ok(())
    }

    /// Moves a corner, and with it every wall that meets there.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` (leaving the plan unchanged) if a
    /// wall at this corner would collapse to a point.
    pub fn move_vertex(&mut self, id: VertexId, point: Point2) -> Result<()> {
        self.vertex(id)?;
        for wall in self.walls_at(id) {
            let data = self.wall_data(wall)?;
            let other = if data.start == id { data.end } else { data.start };
            if distance(&self.vertex(other)?.point, &point) < TOLERANCE {
                return Err(GeometryError::Degenerate(format!(
                    "moving corner to ({}, {}) collapses a wall",
                    point.x, point.y
                ))
                .into());
            }
        }
        if let Some(vertex) = self.vertices.get_mut(id) {
            vertex.point = point;
        }
        Ok(())
    }

    fn update_opening(&mut self, id: OpeningId, update: &OpeningUpdate) -> Result<()> {
        if let Some(Some(wall)) = update.wall {
            self.wall_data(wall)?;
        }
        let opening = self
            .openings
            .get_mut(id)
            .ok_or_else(|| PlanError::EntityNotFound("opening".into()))?;
        let old_wall = opening.wall;
        if let Some(start) = update.start {
            opening.start = start;
        }
        if let Some(end) = update.end {
            opening.end = end;
        }
        if let Some(width) = update.width {
            opening.width = width;
        }
        if let Some(wall) = update.wall {
            opening.wall = wall;
        }
        let new_wall = opening.wall;
        if old_wall != new_wall {
            self.unlink(old_wall, id);
            self.link(new_wall, id);
        }
        Ok(())
    }

    fn update_furniture(&mut self, id: FurnitureId, update: &FurnitureUpdate) -> Result<()> {
        let item = self
            .furniture
            .get_mut(id)
            .ok_or_else(|| PlanError::EntityNotFound("furniture".into()))?;
        if let Some(position) = update.position {
            item.position = position;
        }
        if let Some(dimensions) = update.dimensions {
            item.dimensions = dimensions;
        }
        if let Some(rotation) = update.rotation {
            item.rotation = rotation;
        }
        if let Some(price) = update.price {
            item.price = price;
        }
        if let Some(name) = &update.name {
            name.clone_into(&mut item.name);
        }
        if let Some(product_id) = &update.product_id {
            item.product_id = Some(product_id.clone());
        }
        Ok(())
    }

    /// Removes an element and returns its last value.
    ///
    /// Removing a wall clears the wall reference of the openings it hosted
    /// and drops corners no other wall uses.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not in the plan.
    pub fn remove(&mut self, id: ElementId) -> Result<Element> {
        let element = self.element(id)?;
        match id {
            ElementId::Wall(wall) => self.remove_wall(wall),
            ElementId::Opening(opening) => {
                if let Some(removed) = self.openings.remove(opening) {
                    self.unlink(removed.wall, opening);
                }
            }
            ElementId::Furniture(item) => {
                self.furniture.remove(item);
            }
        }
        self.order.retain(|e| *e != id);
        Ok(element)
    }

    fn remove_wall(&mut self, id: WallId) {
        let Some(data) = self.walls.remove(id) else {
            return;
        };
        if let Some(hosted) = self.dependents.remove(id) {
            for opening in hosted {
                if let Some(opening) = self.openings.get_mut(opening) {
                    opening.wall = None;
                }
            }
        }
        for vertex in [data.start, data.end] {
            if self.walls_at(vertex).is_empty() {
                self.vertices.remove(vertex);
            }
        }
    }

    fn link(&mut self, wall: Option<WallId>, opening: OpeningId) {
        if let Some(hosted) = wall.and_then(|w| self.dependents.get_mut(w)) {
            hosted.push(opening);
        }
    }

    fn unlink(&mut self, wall: Option<WallId>, opening: OpeningId) {
        if let Some(hosted) = wall.and_then(|w| self.dependents.get_mut(w)) {
            hosted.retain(|o| *o != opening);
        }
    }

    /// Applies one change in place, returning the id of an added element.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying add, update or remove.
    pub fn apply(&mut self, change: &Change) -> Result<Option<ElementId>> {
        match change {
            Change::Add(element) => self.add(element.clone()).map(Some),
            Change::Update(id, update) => self.update(*id, update).map(|()| None),
            Change::Delete(id) => self.remove(*id).map(|_| None),
        }
    }

    /// Returns a new snapshot with all changes applied, leaving `self` untouched.
    ///
    /// # Errors
    ///
    /// Returns the first failing change's error; no partial snapshot escapes.
    pub fn applied(&self, changes: &[Change]) -> Result<Self> {
        let mut next = self.clone();
        for change in changes {
            next.apply(change)?;
        }
        Ok(next)
    }
}

fn id_name(id: ElementId) -> &'static str {
    match id {
        ElementId::Wall(_) => "wall",
        ElementId::Opening(_) => "opening",
        ElementId::Furniture(_) => "furniture",
    }
}
