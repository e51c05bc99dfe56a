//! Operations that build meshes from host geometry and edit their attributes.

mod from_grid;
mod from_polygon_mesh;
mod from_surface;
mod update_attributes;

pub use from_grid::{GridDensity, GridMeshBuilder, MeshFromSurfaceGrid, ParametricSampler};
pub use from_polygon_mesh::PolygonMeshImport;
pub use from_surface::{MeshFromSurface, SurfaceLoopAssembler};
pub use update_attributes::{
    UpdateEdgeAttributes, UpdateFaceAttributes, UpdateMeshAttributes, UpdateVertexAttributes,
};

use crate::attributes::AttributeMap;
use crate::math::DEFAULT_KEY_PRECISION;

/// Parameters shared by the mesh construction operations.
#[derive(Debug, Clone)]
pub struct MeshParams {
    /// Decimal places at which boundary points are merged.
    pub key_precision: u32,
    /// Attributes given to the created mesh.
    pub attributes: AttributeMap,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            key_precision: DEFAULT_KEY_PRECISION,
            attributes: AttributeMap::new(),
        }
    }
}

impl MeshParams {
    /// Sets the merge precision.
    #[must_use]
    pub fn with_key_precision(mut self, precision: u32) -> Self {
        self.key_precision = precision;
        self
    }

    /// Sets the attributes of the created mesh.
    #[must_use]
    pub fn with_attributes(mut self, attributes: AttributeMap) -> Self {
        self.attributes = attributes;
        self
    }
}
