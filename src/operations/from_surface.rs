use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::{Result, TopologyError};
use crate::geometry::{BoundaryLoop, Curve};
use crate::host::{HostContext, SurfaceDecomposer};
use crate::math::{GeometricKey, GeometricKeyIndex, Point3};
use crate::mesh::{Mesh, MeshBuffers};

use super::MeshParams;

/// Assembles face loops from surface boundary loops, merging coincident points.
pub struct SurfaceLoopAssembler {
    precision: u32,
}

impl SurfaceLoopAssembler {
    /// Creates an assembler merging points at `precision` decimals.
    #[must_use]
    pub fn new(precision: u32) -> Self {
        Self { precision }
    }

    /// Builds one face per loop and the vertex set shared by all faces.
    ///
    /// A loop of `n` segments yields a face of `n` vertices: the first
    /// segment's start and end, then the end of every later segment except
    /// the last, which closes the loop implicitly. Vertices are ordered by
    /// first appearance.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DegenerateLoop`] for a loop with fewer than
    /// three segments or whose corners merge into fewer distinct vertices than
    /// it has segments, [`TopologyError::MalformedLoop`] if a loop's segments
    /// do not form a closed chain, and a geometry error if a segment cannot
    /// be evaluated at its ends.
    pub fn assemble(&self, loops: &[BoundaryLoop]) -> Result<MeshBuffers> {
        let mut index = GeometricKeyIndex::new(self.precision);
        let mut faces = Vec::with_capacity(loops.len());

        for (loop_index, boundary) in loops.iter().enumerate() {
            let ends = self.checked_ends(loop_index, boundary)?;
            let mut face = Vec::with_capacity(ends.len());
            face.push(index.insert(ends[0].0));
            for &(_, end) in &ends[..ends.len() - 1] {
                face.push(index.insert(end));
            }
            let corners = face.iter().collect::<HashSet<_>>().len();
            if corners < face.len() {
                return Err(TopologyError::DegenerateLoop {
                    loop_index,
                    segments: ends.len(),
                    corners,
                }
                .into());
            }
            faces.push(face);
        }

        debug!(
            loops = loops.len(),
            vertices = index.len(),
            "assembled boundary loops"
        );
        Ok(MeshBuffers {
            vertices: index.into_points(),
            faces,
        })
    }

    /// Start and end point of every segment, after checking the chain closes.
    fn checked_ends(
        &self,
        loop_index: usize,
        boundary: &BoundaryLoop,
    ) -> Result<Vec<(Point3, Point3)>> {
        let ends = boundary
            .segments()
            .iter()
            .map(|s| Ok((s.start_point()?, s.end_point()?)))
            .collect::<Result<Vec<_>>>()?;
        if ends.len() < 3 {
            let corners = ends
                .iter()
                .map(|(start, _)| GeometricKey::new(start, self.precision))
                .collect::<HashSet<_>>()
                .len();
            return Err(TopologyError::DegenerateLoop {
                loop_index,
                segments: ends.len(),
                corners,
            }
            .into());
        }

        for (segment_index, (_, end)) in ends.iter().enumerate() {
            let (next_start, _) = ends[(segment_index + 1) % ends.len()];
            let closes = GeometricKey::new(end, self.precision)
                == GeometricKey::new(&next_start, self.precision);
            if !closes {
                return Err(TopologyError::MalformedLoop {
                    loop_index,
                    segment_index,
                }
                .into());
            }
        }
        Ok(ends)
    }
}

/// Creates a mesh from the boundary loops of a host surface.
pub struct MeshFromSurface {
    params: MeshParams,
}

impl MeshFromSurface {
    /// Creates a new `MeshFromSurface` operation.
    #[must_use]
    pub fn new(params: MeshParams) -> Self {
        Self { params }
    }

    /// Executes the operation for one surface.
    ///
    /// Returns `Ok(None)` if the surface has no boundary representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the decomposer fails or a loop is malformed.
    pub fn execute<D>(
        &self,
        ctx: &HostContext,
        decomposer: &D,
        handle: &D::Handle,
    ) -> Result<Option<Mesh>>
    where
        D: SurfaceDecomposer + ?Sized,
    {
        let Some(loops) = decomposer.boundary_loops(ctx, handle)? else {
            debug!("surface has no boundary representation");
            return Ok(None);
        };
        let buffers = SurfaceLoopAssembler::new(self.params.key_precision).assemble(&loops)?;
        let mesh = Mesh::from_buffers(buffers)?.with_attributes(self.params.attributes.clone());
        Ok(Some(mesh))
    }

    /// Executes the operation for a batch of surfaces.
    ///
    /// Surfaces without a boundary representation are skipped.
    ///
    /// # Errors
    ///
    /// Stops at the first surface that fails with an error.
    pub fn execute_many<'h, D, I>(
        &self,
        ctx: &HostContext,
        decomposer: &D,
        handles: I,
    ) -> Result<Vec<Mesh>>
    where
        D: SurfaceDecomposer + ?Sized,
        D::Handle: 'h,
        I: IntoIterator<Item = &'h D::Handle>,
    {
        let mut meshes = Vec::new();
        let mut skipped = 0usize;
        for handle in handles {
            match self.execute(ctx, decomposer, handle)? {
                Some(mesh) => meshes.push(mesh),
                None => skipped += 1,
            }
        }
        info!(meshes = meshes.len(), skipped, "converted surfaces");
        Ok(meshes)
    }
}
