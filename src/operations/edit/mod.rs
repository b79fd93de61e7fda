mod delete;
mod product;
mod wall;

pub use delete::DeleteElement;
pub use product::ApplyProduct;
pub use wall::{DragWallEndpoint, SetWallHeight, SetWallLength, SetWallThickness};
