use crate::attributes::{AttributeBearing, AttributeMap};
use crate::math::Point3;

/// Key of a vertex in a [`Mesh`](super::Mesh): its position in the vertex list.
pub type VertexKey = usize;

/// Data associated with a mesh vertex.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// The 3D position of the vertex.
    pub point: Point3,
    /// Named attribute values.
    pub attributes: AttributeMap,
}

impl VertexData {
    /// Creates a new vertex at the given point.
    #[must_use]
    pub fn new(point: Point3, attributes: AttributeMap) -> Self {
        Self { point, attributes }
    }
}

impl AttributeBearing for VertexData {
    fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut AttributeMap {
        &mut self.attributes
    }
}
