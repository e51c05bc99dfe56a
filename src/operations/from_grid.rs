use tracing::debug;

use crate::error::{Result, TopologyError};
use crate::geometry::Surface;
use crate::host::{GridSampler, HostContext};
use crate::math::Point3;
use crate::mesh::{Mesh, MeshBuffers};

use super::MeshParams;

/// Number of grid samples in each parametric direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDensity {
    /// Samples along the first direction (grid rows).
    pub u: usize,
    /// Samples along the second direction (grid columns).
    pub v: usize,
}

impl GridDensity {
    /// Creates a density of `u` rows by `v` columns.
    #[must_use]
    pub fn new(u: usize, v: usize) -> Self {
        Self { u, v }
    }

    /// The same number of samples in both directions.
    #[must_use]
    pub fn square(n: usize) -> Self {
        Self { u: n, v: n }
    }

    /// Total number of samples.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.u * self.v
    }
}

impl Default for GridDensity {
    fn default() -> Self {
        Self::square(10)
    }
}

/// Builds a quad mesh from a row-major grid of samples.
pub struct GridMeshBuilder;

impl GridMeshBuilder {
    /// Connects `u` rows of `v` samples into quads.
    ///
    /// Vertices keep the sample order (index `row * v + col`). Each cell
    /// `(i, j)` becomes the quad `(i, j), (i, j+1), (i+1, j+1), (i+1, j)`.
    /// An empty grid yields an empty mesh; a single row or column yields
    /// vertices without faces.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::GridSizeMismatch`] if a non-empty grid does
    /// not hold exactly `u * v` samples.
    pub fn build(samples: &[Point3], u: usize, v: usize) -> Result<MeshBuffers> {
        if u == 0 || v == 0 {
            return Ok(MeshBuffers::default());
        }
        let expected = u * v;
        if samples.len() != expected {
            return Err(TopologyError::GridSizeMismatch {
                expected,
                actual: samples.len(),
            }
            .into());
        }

        let mut faces = Vec::with_capacity((u - 1) * (v - 1));
        for i in 0..u - 1 {
            for j in 0..v - 1 {
                faces.push(vec![
                    i * v + j,
                    i * v + j + 1,
                    (i + 1) * v + j + 1,
                    (i + 1) * v + j,
                ]);
            }
        }

        debug!(u, v, faces = faces.len(), "built grid mesh");
        Ok(MeshBuffers {
            vertices: samples.to_vec(),
            faces,
        })
    }
}

/// Samples any [`Surface`] evenly over its parameter domain.
///
/// A direction with a single sample uses the start of its domain.
pub struct ParametricSampler;

impl ParametricSampler {
    /// Samples `surface` on a `density.u` by `density.v` grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be evaluated.
    pub fn sample(surface: &dyn Surface, density: GridDensity) -> Result<Vec<Point3>> {
        let domain = surface.domain();
        let mut points = Vec::with_capacity(density.sample_count());
        for i in 0..density.u {
            let s = domain.u_at(i, density.u);
            for j in 0..density.v {
                points.push(surface.evaluate(s, domain.v_at(j, density.v))?);
            }
        }
        Ok(points)
    }
}

impl GridSampler for ParametricSampler {
    type Handle = dyn Surface;

    fn sample_grid(
        &self,
        _ctx: &HostContext,
        handle: &dyn Surface,
        density: GridDensity,
    ) -> Result<Option<Vec<Point3>>> {
        Self::sample(handle, density).map(Some)
    }
}

/// Creates a quad mesh from a grid of points sampled on a host surface.
pub struct MeshFromSurfaceGrid {
    density: GridDensity,
    params: MeshParams,
}

impl MeshFromSurfaceGrid {
    /// Creates a new `MeshFromSurfaceGrid` operation.
    #[must_use]
    pub fn new(density: GridDensity, params: MeshParams) -> Self {
        Self { density, params }
    }

    /// Executes the operation.
    ///
    /// Returns `Ok(None)` if the sampler cannot sample the surface.
    ///
    /// # Errors
    ///
    /// Returns an error if sampling fails or the sampler returns a grid of
    /// the wrong size.
    pub fn execute<G>(
        &self,
        ctx: &HostContext,
        sampler: &G,
        handle: &G::Handle,
    ) -> Result<Option<Mesh>>
    where
        G: GridSampler + ?Sized,
    {
        let Some(samples) = sampler.sample_grid(ctx, handle, self.density)? else {
            debug!("surface cannot be sampled");
            return Ok(None);
        };
        let buffers = GridMeshBuilder::build(&samples, self.density.u, self.density.v)?;
        let mesh = Mesh::from_buffers(buffers)?.with_attributes(self.params.attributes.clone());
        Ok(Some(mesh))
    }
}
