//! Polygon mesh with per-element attributes.

pub mod edge;
pub mod face;
pub mod vertex;

pub use edge::{EdgeData, EdgeKey};
pub use face::{FaceData, FaceKey};
pub use vertex::{VertexData, VertexKey};

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::attributes::{AttributeBearing, AttributeMap, AttributeValue};
use crate::error::{Result, TopologyError};
use crate::math::{Point3, Vector3, TOLERANCE};

/// Name given to meshes that were not named explicitly.
pub const DEFAULT_MESH_NAME: &str = "Mesh";

/// The three kinds of attribute-bearing mesh elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Vertex,
    Edge,
    Face,
}

impl ElementKind {
    /// Lower-case name of the kind, as used in scene object names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Edge => "edge",
            Self::Face => "face",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertices and faces produced by a mesh builder, ready for [`Mesh::from_buffers`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// Vertex positions; a vertex's index is its key.
    pub vertices: Vec<Point3>,
    /// Face cycles as vertex indices.
    pub faces: Vec<Vec<usize>>,
}

/// A polygon mesh: vertices, faces, derived edges, and attribute maps.
///
/// Every element carries every default attribute of its kind. Defaults are
/// copied in when the element is created and when a new default is set.
#[derive(Debug, Clone)]
pub struct Mesh {
    attributes: AttributeMap,
    vertices: Vec<VertexData>,
    faces: Vec<FaceData>,
    edges: BTreeMap<EdgeKey, EdgeData>,
    default_vertex_attributes: AttributeMap,
    default_edge_attributes: AttributeMap,
    default_face_attributes: AttributeMap,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Creates an empty mesh named [`DEFAULT_MESH_NAME`].
    #[must_use]
    pub fn new() -> Self {
        let mut attributes = AttributeMap::new();
        attributes.insert("name".into(), AttributeValue::from(DEFAULT_MESH_NAME));
        Self {
            attributes,
            vertices: Vec::new(),
            faces: Vec::new(),
            edges: BTreeMap::new(),
            default_vertex_attributes: AttributeMap::new(),
            default_edge_attributes: AttributeMap::new(),
            default_face_attributes: AttributeMap::new(),
        }
    }

    /// Builds a mesh from vertex positions and face cycles.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::InvalidFace`] if a face has fewer than three
    /// vertices or references a vertex that does not exist.
    pub fn from_vertices_and_faces(vertices: Vec<Point3>, faces: Vec<Vec<usize>>) -> Result<Self> {
        let mut mesh = Self::new();
        for point in vertices {
            mesh.add_vertex(point);
        }
        for face in faces {
            mesh.add_face(face)?;
        }
        Ok(mesh)
    }

    /// Builds a mesh from builder output.
    ///
    /// # Errors
    ///
    /// See [`Mesh::from_vertices_and_faces`].
    pub fn from_buffers(buffers: MeshBuffers) -> Result<Self> {
        Self::from_vertices_and_faces(buffers.vertices, buffers.faces)
    }

    /// Merges `attributes` into the mesh attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: AttributeMap) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// The mesh name, used as the prefix of its scene objects.
    #[must_use]
    pub fn name(&self) -> String {
        self.attributes
            .get("name")
            .map_or_else(|| DEFAULT_MESH_NAME.to_owned(), ToString::to_string)
    }

    /// Sets the mesh name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.attributes
            .insert("name".into(), AttributeValue::Text(name.into()));
    }

    // --- Vertex operations ---

    /// Appends a vertex carrying the default vertex attributes and returns its key.
    pub fn add_vertex(&mut self, point: Point3) -> VertexKey {
        let key = self.vertices.len();
        self.vertices
            .push(VertexData::new(point, self.default_vertex_attributes.clone()));
        key
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Iterates over vertices with their keys.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexKey, &VertexData)> {
        self.vertices.iter().enumerate()
    }

    /// Returns the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex does not exist.
    pub fn vertex(&self, key: VertexKey) -> Result<&VertexData> {
        self.vertices
            .get(key)
            .ok_or_else(|| not_found(ElementKind::Vertex, key))
    }

    /// Returns the mutable vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex does not exist.
    pub fn vertex_mut(&mut self, key: VertexKey) -> Result<&mut VertexData> {
        self.vertices
            .get_mut(key)
            .ok_or_else(|| not_found(ElementKind::Vertex, key))
    }

    /// Position of a vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex does not exist.
    pub fn vertex_coordinates(&self, key: VertexKey) -> Result<Point3> {
        Ok(self.vertex(key)?.point)
    }

    // --- Face operations ---

    /// Appends a face, registering its edges, and returns its key.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::InvalidFace`] if the face has fewer than three
    /// vertices, repeats a vertex, or references a vertex that does not exist.
    pub fn add_face(&mut self, vertices: Vec<VertexKey>) -> Result<FaceKey> {
        let key = self.faces.len();
        if vertices.len() < 3 {
            return Err(TopologyError::InvalidFace {
                face: key,
                reason: format!("{} vertices, at least 3 are required", vertices.len()),
            }
            .into());
        }
        if let Some(&bad) = vertices.iter().find(|&&v| v >= self.vertices.len()) {
            return Err(TopologyError::InvalidFace {
                face: key,
                reason: format!("vertex {bad} does not exist"),
            }
            .into());
        }
        let mut seen = HashSet::with_capacity(vertices.len());
        if let Some(&repeated) = vertices.iter().find(|&&v| !seen.insert(v)) {
            return Err(TopologyError::InvalidFace {
                face: key,
                reason: format!("vertex {repeated} repeats"),
            }
            .into());
        }

        let face = FaceData {
            vertices,
            attributes: self.default_face_attributes.clone(),
        };
        for (u, v) in face.halfedges() {
            if !self.edges.contains_key(&(u, v)) && !self.edges.contains_key(&(v, u)) {
                self.edges.insert(
                    (u, v),
                    EdgeData {
                        attributes: self.default_edge_attributes.clone(),
                    },
                );
            }
        }
        self.faces.push(face);
        Ok(key)
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Iterates over faces with their keys.
    pub fn faces(&self) -> impl Iterator<Item = (FaceKey, &FaceData)> {
        self.faces.iter().enumerate()
    }

    /// Returns the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the face does not exist.
    pub fn face(&self, key: FaceKey) -> Result<&FaceData> {
        self.faces
            .get(key)
            .ok_or_else(|| not_found(ElementKind::Face, key))
    }

    /// Returns the mutable face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the face does not exist.
    pub fn face_mut(&mut self, key: FaceKey) -> Result<&mut FaceData> {
        self.faces
            .get_mut(key)
            .ok_or_else(|| not_found(ElementKind::Face, key))
    }

    /// Positions of the face's vertices, in cycle order.
    ///
    /// # Errors
    ///
    /// Returns an error if the face does not exist.
    pub fn face_coordinates(&self, key: FaceKey) -> Result<Vec<Point3>> {
        self.face(key)?
            .vertices
            .iter()
            .map(|&v| self.vertex_coordinates(v))
            .collect()
    }

    /// Average of the face's vertex positions.
    ///
    /// # Errors
    ///
    /// Returns an error if the face does not exist.
    #[allow(clippy::cast_precision_loss)]
    pub fn face_centroid(&self, key: FaceKey) -> Result<Point3> {
        let points = self.face_coordinates(key)?;
        let sum = points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Ok(Point3::from(sum / points.len() as f64))
    }

    /// Unit normal of the face, or `None` if the face has no area.
    ///
    /// The normal points to the side from which the vertex cycle runs
    /// counter-clockwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the face does not exist.
    pub fn face_normal(&self, key: FaceKey) -> Result<Option<Vector3>> {
        Ok(self.face_area_vector(key)?.try_normalize(TOLERANCE))
    }

    /// Unit normal at the vertex, weighting the normals of its faces by area.
    ///
    /// Returns `None` for a vertex without faces, or whose faces cancel out.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex does not exist.
    pub fn vertex_normal(&self, key: VertexKey) -> Result<Option<Vector3>> {
        self.vertex(key)?;
        let mut sum = Vector3::zeros();
        for (face, data) in self.faces() {
            if data.vertices.contains(&key) {
                sum += self.face_area_vector(face)?;
            }
        }
        Ok(sum.try_normalize(TOLERANCE))
    }

    // Sum of the triangles fanned around the centroid; its length is the area.
    fn face_area_vector(&self, key: FaceKey) -> Result<Vector3> {
        let points = self.face_coordinates(key)?;
        let centroid = self.face_centroid(key)?;
        let n = points.len();
        let twice = (0..n).fold(Vector3::zeros(), |acc, i| {
            acc + (points[i] - centroid).cross(&(points[(i + 1) % n] - centroid))
        });
        Ok(twice / 2.0)
    }

    // --- Edge operations ---

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over edges with their stored keys, ordered by key.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &EdgeData)> {
        self.edges.iter().map(|(&k, e)| (k, e))
    }

    /// Resolves `(u, v)` in either orientation to the stored edge key.
    ///
    /// # Errors
    ///
    /// Returns an error if no edge connects `u` and `v`.
    pub fn edge_key(&self, u: VertexKey, v: VertexKey) -> Result<EdgeKey> {
        if self.edges.contains_key(&(u, v)) {
            Ok((u, v))
        } else if self.edges.contains_key(&(v, u)) {
            Ok((v, u))
        } else {
            Err(TopologyError::ElementNotFound {
                kind: "edge",
                key: format!("{u}-{v}"),
            }
            .into())
        }
    }

    /// Returns the edge data for `(u, v)` in either orientation.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge does not exist.
    pub fn edge(&self, u: VertexKey, v: VertexKey) -> Result<&EdgeData> {
        let key = self.edge_key(u, v)?;
        self.edges
            .get(&key)
            .ok_or_else(|| not_found(ElementKind::Edge, format!("{u}-{v}")))
    }

    /// Midpoint of the edge `(u, v)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge does not exist.
    pub fn edge_midpoint(&self, u: VertexKey, v: VertexKey) -> Result<Point3> {
        let (a, b) = self.edge_key(u, v)?;
        let pa = self.vertex_coordinates(a)?;
        let pb = self.vertex_coordinates(b)?;
        Ok(nalgebra::center(&pa, &pb))
    }

    // --- Selections ---

    /// Vertices for `keys`, in key order.
    ///
    /// # Errors
    ///
    /// Returns an error if any key does not exist.
    pub fn select_vertices(&self, keys: &[VertexKey]) -> Result<Vec<&VertexData>> {
        keys.iter().map(|&k| self.vertex(k)).collect()
    }

    /// Mutable vertices for `keys`; duplicate keys yield one element.
    ///
    /// # Errors
    ///
    /// Returns an error if any key does not exist.
    pub fn select_vertices_mut(&mut self, keys: &[VertexKey]) -> Result<Vec<&mut VertexData>> {
        for &k in keys {
            self.vertex(k)?;
        }
        let wanted: HashSet<VertexKey> = keys.iter().copied().collect();
        Ok(self
            .vertices
            .iter_mut()
            .enumerate()
            .filter(|(k, _)| wanted.contains(k))
            .map(|(_, v)| v)
            .collect())
    }

    /// Faces for `keys`, in key order.
    ///
    /// # Errors
    ///
    /// Returns an error if any key does not exist.
    pub fn select_faces(&self, keys: &[FaceKey]) -> Result<Vec<&FaceData>> {
        keys.iter().map(|&k| self.face(k)).collect()
    }

    /// Mutable faces for `keys`; duplicate keys yield one element.
    ///
    /// # Errors
    ///
    /// Returns an error if any key does not exist.
    pub fn select_faces_mut(&mut self, keys: &[FaceKey]) -> Result<Vec<&mut FaceData>> {
        for &k in keys {
            self.face(k)?;
        }
        let wanted: HashSet<FaceKey> = keys.iter().copied().collect();
        Ok(self
            .faces
            .iter_mut()
            .enumerate()
            .filter(|(k, _)| wanted.contains(k))
            .map(|(_, f)| f)
            .collect())
    }

    /// Edges for `keys` (either orientation), in key order.
    ///
    /// # Errors
    ///
    /// Returns an error if any edge does not exist.
    pub fn select_edges(&self, keys: &[EdgeKey]) -> Result<Vec<&EdgeData>> {
        keys.iter().map(|&(u, v)| self.edge(u, v)).collect()
    }

    /// Mutable edges for `keys` (either orientation); duplicates yield one element.
    ///
    /// # Errors
    ///
    /// Returns an error if any edge does not exist.
    pub fn select_edges_mut(&mut self, keys: &[EdgeKey]) -> Result<Vec<&mut EdgeData>> {
        let wanted = keys
            .iter()
            .map(|&(u, v)| self.edge_key(u, v))
            .collect::<Result<HashSet<EdgeKey>>>()?;
        Ok(self
            .edges
            .iter_mut()
            .filter(|(k, _)| wanted.contains(*k))
            .map(|(_, e)| e)
            .collect())
    }

    // --- Default attributes ---

    /// Default attributes of one element kind.
    #[must_use]
    pub fn default_attributes(&self, kind: ElementKind) -> &AttributeMap {
        match kind {
            ElementKind::Vertex => &self.default_vertex_attributes,
            ElementKind::Edge => &self.default_edge_attributes,
            ElementKind::Face => &self.default_face_attributes,
        }
    }

    /// Sorted names of the default attributes of one element kind.
    #[must_use]
    pub fn default_attribute_names(&self, kind: ElementKind) -> Vec<String> {
        self.default_attributes(kind).keys().cloned().collect()
    }

    /// Registers a default attribute and gives it to every existing element of
    /// that kind that does not carry the name yet.
    pub fn set_default_attribute(
        &mut self,
        kind: ElementKind,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) {
        let name = name.into();
        let value = value.into();
        let fill = |attributes: &mut AttributeMap| {
            attributes
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        };
        let defaults = match kind {
            ElementKind::Vertex => {
                self.vertices.iter_mut().for_each(|v| fill(&mut v.attributes));
                &mut self.default_vertex_attributes
            }
            ElementKind::Edge => {
                self.edges.values_mut().for_each(|e| fill(&mut e.attributes));
                &mut self.default_edge_attributes
            }
            ElementKind::Face => {
                self.faces.iter_mut().for_each(|f| fill(&mut f.attributes));
                &mut self.default_face_attributes
            }
        };
        defaults.insert(name, value);
    }
}

impl AttributeBearing for Mesh {
    fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut AttributeMap {
        &mut self.attributes
    }
}

fn not_found(kind: ElementKind, key: impl fmt::Display) -> crate::error::BridgeError {
    TopologyError::ElementNotFound {
        kind: kind.as_str(),
        key: key.to_string(),
    }
    .into()
}
