mod arc;
mod line;

pub use arc::Arc;
pub use line::Line;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, TOLERANCE};

/// Parameter range of a curve segment, from its start to its end.
///
/// `t_min` may exceed `t_max` for segments traversed backwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    pub t_min: f64,
    pub t_max: f64,
}

impl CurveDomain {
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Checks that `t` lies in the range, within [`TOLERANCE`].
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] for parameters outside
    /// `[t_min, t_max]`.
    pub fn check(&self, t: f64) -> Result<()> {
        let (min, max) = if self.t_min <= self.t_max {
            (self.t_min, self.t_max)
        } else {
            (self.t_max, self.t_min)
        };
        if t < min - TOLERANCE || t > max + TOLERANCE {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min,
                max,
            }
            .into());
        }
        Ok(())
    }
}

/// A bounded parametric curve, as found in surface boundary loops.
pub trait Curve {
    /// Point at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] if `t` is outside
    /// [`Curve::domain`].
    fn evaluate(&self, t: f64) -> Result<Point3>;

    fn domain(&self) -> CurveDomain;

    /// The point at the start of the domain.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn start_point(&self) -> Result<Point3> {
        self.evaluate(self.domain().t_min)
    }

    /// The point at the end of the domain.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn end_point(&self) -> Result<Point3> {
        self.evaluate(self.domain().t_max)
    }
}

/// A simple curve segment of a boundary loop.
#[derive(Debug, Clone)]
pub enum CurveSegment {
    /// A line segment.
    Line(Line),
    /// A circular arc.
    Arc(Arc),
}

impl Curve for CurveSegment {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        match self {
            Self::Line(line) => line.evaluate(t),
            Self::Arc(arc) => arc.evaluate(t),
        }
    }

    fn domain(&self) -> CurveDomain {
        match self {
            Self::Line(line) => line.domain(),
            Self::Arc(arc) => arc.domain(),
        }
    }

    fn start_point(&self) -> Result<Point3> {
        match self {
            Self::Line(line) => line.start_point(),
            Self::Arc(arc) => arc.start_point(),
        }
    }

    fn end_point(&self) -> Result<Point3> {
        match self {
            Self::Line(line) => line.end_point(),
            Self::Arc(arc) => arc.end_point(),
        }
    }
}

impl From<Line> for CurveSegment {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<Arc> for CurveSegment {
    fn from(arc: Arc) -> Self {
        Self::Arc(arc)
    }
}
