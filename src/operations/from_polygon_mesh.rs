use tracing::debug;

use crate::error::Result;
use crate::math::Point3;
use crate::mesh::{Mesh, MeshBuffers};

use super::MeshParams;

/// Imports a host polygon mesh.
///
/// Hosts that store every face in four slots encode a triangle by repeating
/// its last index. Such faces lose the repeated index on import.
pub struct PolygonMeshImport {
    params: MeshParams,
}

impl PolygonMeshImport {
    /// Creates a new `PolygonMeshImport` operation.
    #[must_use]
    pub fn new(params: MeshParams) -> Self {
        Self { params }
    }

    /// Executes the import.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::TopologyError::InvalidFace`] if a face still
    /// has fewer than three vertices after trimming, or references a vertex
    /// that does not exist.
    pub fn execute(&self, vertices: Vec<Point3>, faces: Vec<Vec<usize>>) -> Result<Mesh> {
        let mut trimmed = 0usize;
        let faces = faces
            .into_iter()
            .map(|mut face| {
                if matches!(face.as_slice(), [.., a, b] if a == b) {
                    face.pop();
                    trimmed += 1;
                }
                face
            })
            .collect();

        debug!(trimmed, "imported polygon mesh");
        let mesh = Mesh::from_buffers(MeshBuffers { vertices, faces })?;
        Ok(mesh.with_attributes(self.params.attributes.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeMap, AttributeValue};
    use crate::error::{BridgeError, TopologyError};

    fn square() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn repeated_last_index_is_trimmed() {
        let mesh = PolygonMeshImport::new(MeshParams::default())
            .execute(square(), vec![vec![0, 1, 2, 2], vec![0, 2, 3, 3]])
            .unwrap();
        assert_eq!(mesh.face(0).unwrap().vertices, vec![0, 1, 2]);
        assert_eq!(mesh.face(1).unwrap().vertices, vec![0, 2, 3]);
        assert_eq!(mesh.edge_count(), 5);
    }

    #[test]
    fn quads_are_kept() {
        let mesh = PolygonMeshImport::new(MeshParams::default())
            .execute(square(), vec![vec![0, 1, 2, 3]])
            .unwrap();
        assert_eq!(mesh.face(0).unwrap().vertices.len(), 4);
    }

    #[test]
    fn mesh_attributes_are_applied() {
        let attributes = AttributeMap::from([("name".to_owned(), AttributeValue::from("slab"))]);
        let mesh = PolygonMeshImport::new(MeshParams::default().with_attributes(attributes))
            .execute(square(), vec![vec![0, 1, 2, 3]])
            .unwrap();
        assert_eq!(mesh.name(), "slab");
    }

    #[test]
    fn collapsed_face_is_rejected() {
        let err = PolygonMeshImport::new(MeshParams::default())
            .execute(square(), vec![vec![0, 1, 1]])
            .unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Topology(TopologyError::InvalidFace { face: 0, .. })
        ));
    }
}
