pub mod boundary;
pub mod curve;
pub mod surface;

pub use boundary::BoundaryLoop;
pub use curve::{Arc, Curve, CurveDomain, CurveSegment, Line};
pub use surface::{Plane, Surface, SurfaceDomain};
