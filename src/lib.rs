pub mod attributes;
pub mod error;
pub mod geometry;
pub mod host;
pub mod math;
pub mod mesh;
pub mod operations;
pub mod scene;

pub use error::{BridgeError, Result};
