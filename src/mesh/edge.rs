use crate::attributes::{AttributeBearing, AttributeMap};

use super::vertex::VertexKey;

/// Key of an edge: its two vertices in the direction first traversed by a face.
pub type EdgeKey = (VertexKey, VertexKey);

/// Data associated with a mesh edge.
///
/// Edges are derived from face cycles; each undirected edge is stored once.
#[derive(Debug, Clone, Default)]
pub struct EdgeData {
    /// Named attribute values.
    pub attributes: AttributeMap,
}

impl AttributeBearing for EdgeData {
    fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut AttributeMap {
        &mut self.attributes
    }
}
