//! Services the CAD host provides, expressed as traits.
//!
//! Nothing in this crate talks to a real host. Collaborators implement these
//! traits and receive an explicit [`HostContext`] on every call instead of
//! reading ambient document state.

use crate::attributes::Consensus;
use crate::error::Result;
use crate::geometry::BoundaryLoop;
use crate::math::Point3;
use crate::mesh::ElementKind;
use crate::operations::GridDensity;
use crate::scene::{ElementRef, FaceSpec, LabelSpec, LineSpec, PointSpec, SceneObjectName};

/// Host document state passed to collaborators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostContext {
    /// Layer to draw in; `None` means the host's current layer.
    pub layer: Option<String>,
}

impl HostContext {
    /// Creates a context targeting the host's current layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Targets a named layer.
    #[must_use]
    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }
}

/// Splits a host surface into its boundary loops.
pub trait SurfaceDecomposer {
    /// The host's surface handle.
    type Handle: ?Sized;

    /// Returns the boundary loops of `handle`, or `None` if it has no
    /// boundary representation.
    ///
    /// # Errors
    ///
    /// Returns an error if a segment cannot be converted.
    fn boundary_loops(
        &self,
        ctx: &HostContext,
        handle: &Self::Handle,
    ) -> Result<Option<Vec<BoundaryLoop>>>;
}

/// Samples a host surface on a regular parametric grid.
pub trait GridSampler {
    /// The host's surface handle.
    type Handle: ?Sized;

    /// Returns `density.u * density.v` points in row-major order (rows follow
    /// the first parametric direction), or `None` if `handle` cannot be sampled.
    ///
    /// # Errors
    ///
    /// Returns an error if surface evaluation fails.
    fn sample_grid(
        &self,
        ctx: &HostContext,
        handle: &Self::Handle,
        density: GridDensity,
    ) -> Result<Option<Vec<Point3>>>;
}

/// Maps mesh elements to scene object names and back.
pub trait SceneNaming {
    /// Name of the scene object drawn for `element`.
    fn element_name(&self, mesh: &str, element: &ElementRef) -> String;

    /// Name of the label drawn for `element`.
    fn label_name(&self, mesh: &str, element: &ElementRef) -> String;

    /// Wildcard pattern matching the mesh's objects, optionally of one kind only.
    fn objects_pattern(&self, mesh: &str, kind: Option<ElementKind>) -> String;

    /// Wildcard pattern matching the mesh's labels of one kind.
    fn labels_pattern(&self, mesh: &str, kind: ElementKind) -> String;

    /// Name of the normal line drawn for `element`.
    fn normal_name(&self, mesh: &str, element: &ElementRef) -> String;

    /// Wildcard pattern matching the mesh's normal lines of one kind.
    fn normals_pattern(&self, mesh: &str, kind: ElementKind) -> String;

    /// Resolves a scene object name, or `None` if it does not name a mesh element.
    fn parse(&self, name: &str) -> Option<SceneObjectName>;
}

/// Creates and deletes scene objects.
pub trait SceneSink {
    /// Identifier the host assigns to created objects.
    type ObjectId;

    /// Deletes every object whose name matches `pattern`, returning how many went.
    fn delete_objects(&mut self, ctx: &HostContext, pattern: &str) -> usize;

    /// Deletes everything on the context's layer.
    fn clear_layer(&mut self, ctx: &HostContext);

    /// Draws point objects.
    fn draw_points(&mut self, ctx: &HostContext, points: &[PointSpec]) -> Vec<Self::ObjectId>;

    /// Draws line objects.
    fn draw_lines(&mut self, ctx: &HostContext, lines: &[LineSpec]) -> Vec<Self::ObjectId>;

    /// Draws polygon objects.
    fn draw_faces(&mut self, ctx: &HostContext, faces: &[FaceSpec]) -> Vec<Self::ObjectId>;

    /// Joins drawn polygon objects into one mesh object, deleting the inputs.
    ///
    /// Returns `None`, leaving the inputs in place, if the host cannot join them.
    fn join_faces(&mut self, ctx: &HostContext, faces: &[Self::ObjectId])
        -> Option<Self::ObjectId>;

    /// Draws text labels.
    fn draw_labels(&mut self, ctx: &HostContext, labels: &[LabelSpec]) -> Vec<Self::ObjectId>;

    /// Refreshes the viewport.
    fn redraw(&mut self, ctx: &HostContext);
}

/// One named value shown in an attribute dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeField {
    /// Attribute name.
    pub name: String,
    /// Current value rendered as text, or `Mixed`.
    pub value: Consensus<String>,
}

/// Lets the user edit a list of named values.
pub trait AttributeEditor {
    /// Shows `fields` and returns the edited values in the same order, or
    /// `None` if the user cancelled. A field left `Mixed` is not written.
    fn edit(&mut self, ctx: &HostContext, fields: &[AttributeField])
        -> Option<Vec<Consensus<String>>>;
}
