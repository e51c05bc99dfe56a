pub mod geometric_key;

pub use geometric_key::{GeometricKey, GeometricKeyIndex};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Number of decimals used when merging coincident points.
pub const DEFAULT_KEY_PRECISION: u32 = 3;
