use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::host::{HostContext, SceneNaming, SceneSink};
use crate::math::{Point3, Vector3};
use crate::mesh::{ElementKind, Mesh};

use super::{ElementRef, LineSpec, Rgb};

/// Color of normal lines unless set otherwise.
pub const DEFAULT_NORMAL_COLOR: Rgb = [0, 0, 255];

/// Shows vertex or face normals as arrows.
///
/// Vertex normals start at the vertex, face normals at the face centroid.
/// Previously drawn normals of the same kind are always removed first.
pub struct DisplayNormals {
    kind: ElementKind,
    display: bool,
    scale: f64,
    color: Rgb,
}

impl DisplayNormals {
    /// Creates a new `DisplayNormals` operation drawing unit-length normals.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            display: true,
            scale: 1.0,
            color: DEFAULT_NORMAL_COLOR,
        }
    }

    /// Sets the length of the drawn arrows.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Only removes the normals already in the scene.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.display = false;
        self
    }

    /// Replaces the mesh's normals of this kind.
    ///
    /// Elements without a defined normal are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UndefinedNormals`] for edges.
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
        if self.kind == ElementKind::Edge {
            return Err(ConfigError::UndefinedNormals(self.kind).into());
        }
        let mesh_name = mesh.name();
        let lines = if self.display {
            self.lines(mesh, naming, &mesh_name)?
        } else {
            Vec::new()
        };

        let removed = sink.delete_objects(ctx, &naming.normals_pattern(&mesh_name, self.kind));
        debug!(mesh = %mesh_name, kind = %self.kind, removed, "removed previous normals");
        let ids = if self.display {
            sink.draw_lines(ctx, &lines)
        } else {
            Vec::new()
        };
        sink.redraw(ctx);
        Ok(ids)
    }

    fn lines<N>(&self, mesh: &Mesh, naming: &N, mesh_name: &str) -> Result<Vec<LineSpec>>
    where
        N: SceneNaming + ?Sized,
    {
        let anchors: Vec<(ElementRef, Point3, Option<Vector3>)> = match self.kind {
            ElementKind::Vertex => mesh
                .vertices()
                .map(|(k, v)| Ok((ElementRef::Vertex(k), v.point, mesh.vertex_normal(k)?)))
                .collect::<Result<_>>()?,
            ElementKind::Face => mesh
                .faces()
                .map(|(k, _)| {
                    let centroid = mesh.face_centroid(k)?;
                    Ok((ElementRef::Face(k), centroid, mesh.face_normal(k)?))
                })
                .collect::<Result<_>>()?,
            ElementKind::Edge => Vec::new(),
        };

        let total = anchors.len();
        let lines: Vec<LineSpec> = anchors
            .into_iter()
            .filter_map(|(element, start, normal)| {
                normal.map(|n| LineSpec {
                    start,
                    end: start + n * self.scale,
                    name: naming.normal_name(mesh_name, &element),
                    color: Some(self.color),
                    arrow: true,
                })
            })
            .collect();
        if lines.len() < total {
            debug!(skipped = total - lines.len(), "elements without a normal");
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;
    use crate::scene::testing::{DottedNaming, RecordingSink};
    use approx::assert_relative_eq;

    // Two triangles and a vertex that belongs to no face.
    fn mesh() -> Mesh {
        let mut mesh = Mesh::from_vertices_and_faces(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(3.0, 0.0, 0.0),
                Point3::new(0.0, 3.0, 0.0),
                Point3::new(3.0, 3.0, 0.0),
                Point3::new(9.0, 9.0, 9.0),
            ],
            vec![vec![0, 1, 2], vec![1, 3, 2]],
        )
        .unwrap();
        mesh.set_name("n");
        mesh
    }

    #[test]
    fn face_normals_start_at_centroids() {
        let mut sink = RecordingSink::default();
        let ids = DisplayNormals::new(ElementKind::Face)
            .with_scale(2.0)
            .with_color([255, 0, 0])
            .execute(&HostContext::new(), &mesh(), &DottedNaming, &mut sink)
            .unwrap();
        assert_eq!(ids.len(), 2);
        let first = &sink.lines[0];
        assert_eq!(first.name, "n.face.normal.0");
        assert_relative_eq!(first.start, Point3::new(1.0, 1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(first.end, Point3::new(1.0, 1.0, 2.0), epsilon = 1e-12);
        assert_eq!(first.color, Some([255, 0, 0]));
        assert!(first.arrow);
    }

    #[test]
    fn vertices_without_faces_are_skipped() {
        let mut sink = RecordingSink::default();
        DisplayNormals::new(ElementKind::Vertex)
            .execute(&HostContext::new(), &mesh(), &DottedNaming, &mut sink)
            .unwrap();
        assert_eq!(sink.lines.len(), 4);
        assert!(sink.lines.iter().all(|l| l.color == Some(DEFAULT_NORMAL_COLOR)));
        assert_relative_eq!(sink.lines[3].start, Point3::new(3.0, 3.0, 0.0));
        assert_relative_eq!(sink.lines[3].end, Point3::new(3.0, 3.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn hidden_normals_are_only_removed() {
        let mesh = mesh();
        let ctx = HostContext::new();
        let mut sink = RecordingSink::default();
        DisplayNormals::new(ElementKind::Face)
            .execute(&ctx, &mesh, &DottedNaming, &mut sink)
            .unwrap();
        DisplayNormals::new(ElementKind::Vertex)
            .execute(&ctx, &mesh, &DottedNaming, &mut sink)
            .unwrap();
        assert_eq!(sink.objects.len(), 6);

        let ids = DisplayNormals::new(ElementKind::Face)
            .hidden()
            .execute(&ctx, &mesh, &DottedNaming, &mut sink)
            .unwrap();
        assert!(ids.is_empty());
        assert_eq!(sink.objects.len(), 4);
        assert!(sink.objects.iter().all(|n| n.starts_with("n.vertex.normal.")));
    }

    #[test]
    fn edges_have_no_normals() {
        let mut sink = RecordingSink::default();
        let err = DisplayNormals::new(ElementKind::Edge)
            .execute(&HostContext::new(), &mesh(), &DottedNaming, &mut sink)
            .unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Config(ConfigError::UndefinedNormals(ElementKind::Edge))
        ));
        assert_eq!(sink.redraws, 0);
    }
}
