use crate::error::{GeometryError, Result};
use crate::geometry::boundary::BoundaryLoop;
use crate::geometry::curve::{CurveSegment, Line};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Surface, SurfaceDomain};

/// A bounded planar patch: `origin + u * u_dir + v * v_dir` over its domain.
///
/// The directions are stored normalized and must not be parallel.
#[derive(Debug, Clone)]
pub struct Plane {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    domain: SurfaceDomain,
}

impl Plane {
    /// Creates a patch spanned by two independent directions.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] for a zero-length direction and
    /// [`GeometryError::Degenerate`] for parallel directions.
    pub fn new(
        origin: Point3,
        u_dir: Vector3,
        v_dir: Vector3,
        domain: SurfaceDomain,
    ) -> Result<Self> {
        let u_dir = unit(u_dir)?;
        let v_dir = unit(v_dir)?;
        if u_dir.cross(&v_dir).norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("plane directions are parallel".into()).into());
        }
        Ok(Self {
            origin,
            u_dir,
            v_dir,
            domain,
        })
    }

    /// A patch of the world XY plane.
    ///
    /// # Errors
    ///
    /// Never fails for the fixed axes; the `Result` mirrors [`Plane::new`].
    pub fn xy(domain: SurfaceDomain) -> Result<Self> {
        Self::new(Point3::origin(), Vector3::x(), Vector3::y(), domain)
    }

    /// The patch outline as four lines, counter-clockwise about `u_dir x v_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is empty in either direction.
    pub fn boundary(&self) -> Result<BoundaryLoop> {
        let d = self.domain;
        let corners = [
            self.evaluate(d.u_min, d.v_min)?,
            self.evaluate(d.u_max, d.v_min)?,
            self.evaluate(d.u_max, d.v_max)?,
            self.evaluate(d.u_min, d.v_max)?,
        ];
        let mut segments = Vec::with_capacity(corners.len());
        for (i, start) in corners.iter().enumerate() {
            let end = corners[(i + 1) % corners.len()];
            segments.push(CurveSegment::from(Line::new(*start, end)?));
        }
        Ok(BoundaryLoop::new(segments))
    }
}

fn unit(direction: Vector3) -> Result<Vector3> {
    direction
        .try_normalize(TOLERANCE)
        .ok_or_else(|| GeometryError::ZeroVector.into())
}

impl Surface for Plane {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        Ok(self.origin + self.u_dir * u + self.v_dir * v)
    }

    fn domain(&self) -> SurfaceDomain {
        self.domain
    }
}
