use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A straight line segment between two points.
///
/// The parametric form is `P(t) = start + t * direction` for
/// `t` in `[0, length]`, with `direction` of unit length. Both end points
/// are kept as given, so [`Curve::end_point`] returns `end` exactly.
#[derive(Debug, Clone)]
pub struct Line {
    start: Point3,
    end: Point3,
    direction: Vector3,
    length: f64,
}

impl Line {
    /// Creates a new line segment from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the two points coincide.
    pub fn new(start: Point3, end: Point3) -> Result<Self> {
        let delta = end - start;
        let length = delta.norm();
        if length < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            start,
            end,
            direction: delta / length,
            length,
        })
    }

    /// Returns the unit direction vector of the segment.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    /// Returns the length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }
}

impl Curve for Line {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        self.domain().check(t)?;
        Ok(self.start + self.direction * t)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.length)
    }

    fn start_point(&self) -> Result<Point3> {
        Ok(self.start)
    }

    fn end_point(&self) -> Result<Point3> {
        Ok(self.end)
    }
}
