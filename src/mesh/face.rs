use crate::attributes::{AttributeBearing, AttributeMap};

use super::edge::EdgeKey;
use super::vertex::VertexKey;

/// Key of a face in a [`Mesh`](super::Mesh): its position in the face list.
pub type FaceKey = usize;

/// Data associated with a mesh face.
///
/// The vertex cycle is stored open: the closing vertex is implicit.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// Ordered vertex keys, at least three.
    pub vertices: Vec<VertexKey>,
    /// Named attribute values.
    pub attributes: AttributeMap,
}

impl FaceData {
    /// Directed edges of the face cycle, including the closing edge.
    pub fn halfedges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

impl AttributeBearing for FaceData {
    fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut AttributeMap {
        &mut self.attributes
    }
}
