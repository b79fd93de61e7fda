use crate::math::{to_internal_units, Point2, Vector2};

slotmap::new_key_type! {
    /// Unique identifier for a furniture item in the plan.
    pub struct FurnitureId;
}

/// Footprint of a furniture item in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A catalog entry a furniture item can be created from or swapped to.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub dimensions: Dimensions,
}

/// A free-standing item positioned anywhere on the plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Furniture {
    pub category: String,
    pub product_id: Option<String>,
    pub name: String,
    /// Center of the footprint.
    pub position: Point2,
    pub dimensions: Dimensions,
    /// Rotation in radians.
    pub rotation: f64,
    pub price: f64,
}

impl Furniture {
    /// Creates an unrotated item from a catalog product.
    #[must_use]
    pub fn from_product(product: &Product, position: Point2) -> Self {
        Self {
            category: product.category.clone(),
            product_id: Some(product.id.clone()),
            name: product.name.clone(),
            position,
            dimensions: product.dimensions,
            rotation: 0.0,
            price: product.price,
        }
    }

    /// Half-size of the axis-aligned box around the (possibly rotated)
    /// footprint, in internal units.
    #[must_use]
    pub fn half_extents(&self) -> Vector2 {
        let hw = to_internal_units(self.dimensions.width) * 0.5;
        let hh = to_internal_units(self.dimensions.height) * 0.5;
        let (sin, cos) = self.rotation.sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        Vector2::new(cos * hw + sin * hh, sin * hw + cos * hh)
    }
}
