mod plane;

pub use plane::Plane;

use crate::error::Result;
use crate::math::Point3;

/// Rectangular `(u, v)` parameter range of a surface patch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDomain {
    pub u_min: f64,
    pub u_max: f64,
    pub v_min: f64,
    pub v_max: f64,
}

impl SurfaceDomain {
    #[must_use]
    pub fn new(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Self {
            u_min,
            u_max,
            v_min,
            v_max,
        }
    }

    /// The unit square `[0, 1] x [0, 1]`.
    #[must_use]
    pub fn unit() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }

    /// The `step`-th of `count` evenly spaced `u` values, ends included.
    #[must_use]
    pub fn u_at(&self, step: usize, count: usize) -> f64 {
        spaced(self.u_min, self.u_max, step, count)
    }

    /// The `step`-th of `count` evenly spaced `v` values, ends included.
    #[must_use]
    pub fn v_at(&self, step: usize, count: usize) -> f64 {
        spaced(self.v_min, self.v_max, step, count)
    }
}

// A single sample sits at the start of the range.
#[allow(clippy::cast_precision_loss)]
fn spaced(min: f64, max: f64, step: usize, count: usize) -> f64 {
    if count < 2 {
        return min;
    }
    min + (max - min) * step as f64 / (count - 1) as f64
}

/// A parametric surface patch that can be sampled over its domain.
pub trait Surface {
    /// Point at parameters `(u, v)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be evaluated at `(u, v)`.
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3>;

    fn domain(&self) -> SurfaceDomain;
}
