pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{FloorplanError, Result};
