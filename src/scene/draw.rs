use tracing::{debug, warn};

use crate::error::Result;
use crate::host::{HostContext, SceneNaming, SceneSink};
use crate::mesh::{EdgeKey, ElementKind, FaceKey, Mesh, VertexKey};

use super::{ElementColors, ElementRef, FaceSpec, LineSpec, PointSpec};

/// Which parts of a mesh [`DrawMesh`] puts into the scene.
#[derive(Debug, Clone)]
pub struct DrawOptions {
    /// Draw vertices as points.
    pub vertices: bool,
    /// Draw edges as lines.
    pub edges: bool,
    /// Draw faces as polygons.
    pub faces: bool,
    /// Empty the target layer before drawing.
    pub clear_layer: bool,
    /// Per-element colors.
    pub colors: ElementColors,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            vertices: true,
            edges: false,
            faces: true,
            clear_layer: false,
            colors: ElementColors::new(),
        }
    }
}

/// Objects created by one draw call, grouped by element kind.
#[derive(Debug)]
pub struct DrawnObjects<Id> {
    pub vertices: Vec<Id>,
    pub edges: Vec<Id>,
    pub faces: Vec<Id>,
}

/// Replaces a mesh's scene objects with freshly drawn ones.
pub struct DrawMesh {
    options: DrawOptions,
}

impl DrawMesh {
    /// Creates a new `DrawMesh` operation.
    #[must_use]
    pub fn new(options: DrawOptions) -> Self {
        Self { options }
    }

    /// Executes the drawing.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh references missing vertices.
    pub fn execute<N, S>(
        &self,
        ctx: &HostContext,
        mesh: &Mesh,
        naming: &N,
        sink: &mut S,
    ) -> Result<DrawnObjects<S::ObjectId>>
    where
        N: SceneNaming + ?Sized,
        S: SceneSink + ?Sized,
    {
        let removed = sink.delete_objects(ctx, &naming.objects_pattern(&mesh.name(), None));
        debug!(mesh = %mesh.name(), removed, "removed previous mesh objects");
        if self.options.clear_layer {
            sink.clear_layer(ctx);
        }

        let colors = &self.options.colors;
        let mut drawn = DrawnObjects {
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
        };
        if self.options.vertices {
            drawn.vertices = DrawVertices::new()
                .with_colors(colors.clone())
                .without_redraw()
                .execute(ctx, mesh, naming, sink)?;
        }
        if self.options.edges {
            drawn.edges = DrawEdges::new()
                .with_colors(colors.clone())
                .without_redraw()
                .execute(ctx, mesh, naming, sink)?;
        }
        if self.options.faces {
            drawn.faces = DrawFaces::new()
                .with_colors(colors.clone())
                .without_redraw()
                .execute(ctx, mesh, naming, sink)?;
        }
        sink.redraw(ctx);
        Ok(drawn)
    }
}

macro_rules! draw_op_builders {
    ($ty:ident, $key:ty $(, $field:ident: $init:expr)*) => {
        impl $ty {
            /// Creates the operation for every element of its kind.
            #[must_use]
            pub fn new() -> Self {
                Self {
                    keys: None,
                    colors: ElementColors::new(),
                    redraw: true,
                    $($field: $init,)*
                }
            }

            /// Restricts drawing to `keys`.
            #[must_use]
            pub fn with_keys(mut self, keys: Vec<$key>) -> Self {
                self.keys = Some(keys);
                self
            }

            /// Sets per-element colors.
            #[must_use]
            pub fn with_colors(mut self, colors: ElementColors) -> Self {
                self.colors = colors;
                self
            }

            /// Skips the viewport refresh after drawing.
            #[must_use]
            pub fn without_redraw(mut self) -> Self {
                self.redraw = false;
                self
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// Draws vertices as named points.
pub struct DrawVertices {
    keys: Option<Vec<VertexKey>>,
    colors: ElementColors,
    redraw: bool,
}

draw_op_builders!(DrawVertices, VertexKey);

impl DrawVertices {
    /// Deletes the mesh's vertex objects and draws the selected vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if a requested vertex does not exist.
    pub fn execute<N, S>(
        &self,
        ctx: &HostContext,
        mesh: &Mesh,
        naming: &N,
        sink: &mut S,
    ) -> Result<Vec<S::ObjectId>>
    where
        N: SceneNaming + ?Sized,
        S: SceneSink + ?Sized,
    {
        let name = mesh.name();
        let keys: Vec<VertexKey> = match &self.keys {
            Some(keys) => keys.clone(),
            None => mesh.vertices().map(|(k, _)| k).collect(),
        };
        let points = keys
            .into_iter()
            .map(|key| {
                let element = ElementRef::Vertex(key);
                Ok(PointSpec {
                    position: mesh.vertex_coordinates(key)?,
                    name: naming.element_name(&name, &element),
                    color: self.colors.get(&element).copied(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        sink.delete_objects(ctx, &naming.objects_pattern(&name, Some(ElementKind::Vertex)));
        let ids = sink.draw_points(ctx, &points);
        if self.redraw {
            sink.redraw(ctx);
        }
        Ok(ids)
    }
}

/// Draws edges as named lines.
pub struct DrawEdges {
    keys: Option<Vec<EdgeKey>>,
    colors: ElementColors,
    redraw: bool,
}

draw_op_builders!(DrawEdges, EdgeKey);

impl DrawEdges {
    /// Deletes the mesh's edge objects and draws the selected edges.
    ///
    /// # Errors
    ///
    /// Returns an error if a requested edge does not exist.
    pub fn execute<N, S>(
        &self,
        ctx: &HostContext,
        mesh: &Mesh,
        naming: &N,
        sink: &mut S,
    ) -> Result<Vec<S::ObjectId>>
    where
        N: SceneNaming + ?Sized,
        S: SceneSink + ?Sized,
    {
        let name = mesh.name();
        let keys: Vec<EdgeKey> = match &self.keys {
            Some(keys) => keys.clone(),
            None => mesh.edges().map(|(k, _)| k).collect(),
        };
        let lines = keys
            .into_iter()
            .map(|(u, v)| {
                let key = mesh.edge_key(u, v)?;
                let element = ElementRef::Edge(key);
                Ok(LineSpec {
                    start: mesh.vertex_coordinates(key.0)?,
                    end: mesh.vertex_coordinates(key.1)?,
                    name: naming.element_name(&name, &element),
                    color: self.colors.get(&element).copied(),
                    arrow: false,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        sink.delete_objects(ctx, &naming.objects_pattern(&name, Some(ElementKind::Edge)));
        let ids = sink.draw_lines(ctx, &lines);
        if self.redraw {
            sink.redraw(ctx);
        }
        Ok(ids)
    }
}

/// Draws faces as named polygons.
pub struct DrawFaces {
    keys: Option<Vec<FaceKey>>,
    colors: ElementColors,
    redraw: bool,
    join: bool,
}

draw_op_builders!(DrawFaces, FaceKey, join: false);

impl DrawFaces {
    /// Joins the drawn polygons into a single mesh object.
    #[must_use]
    pub fn with_join(mut self) -> Self {
        self.join = true;
        self
    }

    /// Deletes the mesh's face objects and draws the selected faces.
    ///
    /// With [`DrawFaces::with_join`] the result holds the joined object
    /// alone, unless the host could not join the faces.
    ///
    /// # Errors
    ///
    /// Returns an error if a requested face does not exist.
    pub fn execute<N, S>(
        &self,
        ctx: &HostContext,
        mesh: &Mesh,
        naming: &N,
        sink: &mut S,
    ) -> Result<Vec<S::ObjectId>>
    where
        N: SceneNaming + ?Sized,
        S: SceneSink + ?Sized,
    {
        let name = mesh.name();
        let keys: Vec<FaceKey> = match &self.keys {
            Some(keys) => keys.clone(),
            None => mesh.faces().map(|(k, _)| k).collect(),
        };
        let faces = keys
            .into_iter()
            .map(|key| {
                let element = ElementRef::Face(key);
                Ok(FaceSpec {
                    points: mesh.face_coordinates(key)?,
                    name: naming.element_name(&name, &element),
                    color: self.colors.get(&element).copied(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        sink.delete_objects(ctx, &naming.objects_pattern(&name, Some(ElementKind::Face)));
        let mut ids = sink.draw_faces(ctx, &faces);
        if self.join {
            match sink.join_faces(ctx, &ids) {
                Some(joined) => ids = vec![joined],
                None => warn!(mesh = %name, faces = ids.len(), "host could not join faces"),
            }
        }
        if self.redraw {
            sink.redraw(ctx);
        }
        Ok(ids)
    }
}
