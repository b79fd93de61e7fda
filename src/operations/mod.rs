pub mod draw;
pub mod edit;
pub mod placement;
pub mod snap;
