use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A circular arc segment of a boundary loop.
///
/// The arc starts at a given point and sweeps about `axis` through the center.
/// A positive sweep turns counter-clockwise seen from the tip of `axis`. The
/// parameter is the swept angle, from `0` to `sweep`.
#[derive(Debug, Clone)]
pub struct Arc {
    center: Point3,
    start: Point3,
    radius: f64,
    // Orthonormal frame in the arc plane; `x_dir` points at the start point.
    x_dir: Vector3,
    y_dir: Vector3,
    sweep: f64,
}

impl Arc {
    /// Creates the arc from `start` around `center`, sweeping `sweep` radians about `axis`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if `axis` is zero-length or
    /// `start` coincides with `center`, and [`GeometryError::Degenerate`] if
    /// `axis` is not perpendicular to the radius or the sweep is zero or
    /// exceeds a full turn.
    pub fn new(center: Point3, start: Point3, axis: Vector3, sweep: f64) -> Result<Self> {
        let radial = start - center;
        let radius = radial.norm();
        let axis_len = axis.norm();
        if radius < TOLERANCE || axis_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }

        let x_dir = radial / radius;
        let axis = axis / axis_len;
        if axis.dot(&x_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "arc axis is not perpendicular to its radius".into(),
            )
            .into());
        }
        if sweep.abs() < TOLERANCE || sweep.abs() > TAU + TOLERANCE {
            return Err(
                GeometryError::Degenerate(format!("arc sweep {sweep} is out of range")).into(),
            );
        }

        Ok(Self {
            center,
            start,
            radius,
            x_dir,
            y_dir: axis.cross(&x_dir),
            sweep,
        })
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the signed swept angle in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }
}

impl Curve for Arc {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        self.domain().check(t)?;
        let (sin, cos) = t.sin_cos();
        Ok(self.center + (self.x_dir * cos + self.y_dir * sin) * self.radius)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.sweep)
    }

    fn start_point(&self) -> Result<Point3> {
        Ok(self.start)
    }
}
