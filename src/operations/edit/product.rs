use crate::error::Result;
use crate::topology::{Change, ElementUpdate, FurnitureId, FurnitureUpdate, Plan, Product};

/// Swaps the catalog product behind a placed furniture item.
///
/// Position and rotation are kept; name, price, footprint and product id
/// come from the new product.
pub struct ApplyProduct {
    furniture: FurnitureId,
    product: Product,
}

impl ApplyProduct {
    #[must_use]
    pub fn new(furniture: FurnitureId, product: Product) -> Self {
        Self { furniture, product }
    }

    /// # Errors
    ///
    /// Returns `PlanError::EntityNotFound` if the item is not in the plan.
    pub fn execute(&self, plan: &Plan) -> Result<Change> {
        plan.furniture_item(self.furniture)?;
        Ok(Change::Update(
            self.furniture.into(),
            ElementUpdate::Furniture(FurnitureUpdate {
                dimensions: Some(self.product.dimensions),
                price: Some(self.product.price),
                name: Some(self.product.name.clone()),
                product_id: Some(self.product.id.clone()),
                ..FurnitureUpdate::default()
            }),
        ))
    }
}
