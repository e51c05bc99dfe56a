//! Drawing mesh elements as named scene objects and resolving selections.

pub mod draw;
pub mod labels;
pub mod normals;
pub mod select;

#[cfg(test)]
mod testing;

pub use draw::{DrawEdges, DrawFaces, DrawMesh, DrawOptions, DrawVertices};
pub use labels::{DisplayLabels, LabelContent, LabelFormatter};
pub use normals::DisplayNormals;
pub use select::{
    select_edge, select_edges, select_face, select_faces, select_vertex, select_vertices,
};

use std::collections::HashMap;

use crate::math::Point3;
use crate::mesh::{EdgeKey, ElementKind, FaceKey, VertexKey};

/// An 8-bit RGB color.
pub type Rgb = [u8; 3];

/// Per-element colors; elements without an entry use the layer color.
pub type ElementColors = HashMap<ElementRef, Rgb>;

/// A reference to one mesh element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRef {
    Vertex(VertexKey),
    Edge(EdgeKey),
    Face(FaceKey),
}

impl ElementRef {
    /// The kind of element referenced.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Vertex(_) => ElementKind::Vertex,
            Self::Edge(_) => ElementKind::Edge,
            Self::Face(_) => ElementKind::Face,
        }
    }
}

/// A scene object name resolved to the mesh element it stands for.
///
/// Labels resolve to the element they annotate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneObjectName {
    /// Name of the mesh the object belongs to.
    pub mesh: String,
    /// The element the object represents.
    pub element: ElementRef,
}

/// A point object to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSpec {
    pub position: Point3,
    pub name: String,
    pub color: Option<Rgb>,
}

/// A line object to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSpec {
    pub start: Point3,
    pub end: Point3,
    pub name: String,
    pub color: Option<Rgb>,
    /// Draw an arrow head at `end`.
    pub arrow: bool,
}

/// A polygon object to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceSpec {
    pub points: Vec<Point3>,
    pub name: String,
    pub color: Option<Rgb>,
}

/// A text label to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    pub position: Point3,
    pub text: String,
    pub name: String,
    pub color: Option<Rgb>,
}
