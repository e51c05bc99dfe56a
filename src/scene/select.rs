//! Resolving selected scene object names back to mesh element keys.

use std::collections::HashSet;

use tracing::warn;

use crate::host::SceneNaming;
use crate::mesh::{EdgeKey, FaceKey, Mesh, VertexKey};

use super::ElementRef;

/// Parses `names` into elements of `mesh`, deduplicated in first-seen order.
///
/// Names of other meshes and names that do not parse are ignored; elements
/// that are not in `mesh` are dropped with a warning. Labels select their
/// element.
fn resolve<N, I, S>(mesh: &Mesh, naming: &N, names: I) -> Vec<ElementRef>
where
    N: SceneNaming + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mesh_name = mesh.name();
    let mut seen = HashSet::new();
    let mut elements = Vec::new();
    for name in names {
        let Some(parsed) = naming.parse(name.as_ref()) else {
            continue;
        };
        if parsed.mesh != mesh_name || !seen.insert(parsed.element) {
            continue;
        }
        if !contains(mesh, &parsed.element) {
            warn!(object = name.as_ref(), "selected object has no matching mesh element");
            continue;
        }
        elements.push(parsed.element);
    }
    elements
}

fn contains(mesh: &Mesh, element: &ElementRef) -> bool {
    match *element {
        ElementRef::Vertex(k) => mesh.vertex(k).is_ok(),
        ElementRef::Edge((u, v)) => mesh.edge_key(u, v).is_ok(),
        ElementRef::Face(k) => mesh.face(k).is_ok(),
    }
}

/// Vertex keys of the selected objects.
pub fn select_vertices<N, I, S>(mesh: &Mesh, naming: &N, names: I) -> Vec<VertexKey>
where
    N: SceneNaming + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    resolve(mesh, naming, names)
        .into_iter()
        .filter_map(|e| match e {
            ElementRef::Vertex(k) => Some(k),
            _ => None,
        })
        .collect()
}

/// The vertex key of a single selected object.
pub fn select_vertex<N: SceneNaming + ?Sized>(
    mesh: &Mesh,
    naming: &N,
    name: &str,
) -> Option<VertexKey> {
    select_vertices(mesh, naming, [name]).into_iter().next()
}

/// Edge keys of the selected objects, as named (either orientation).
pub fn select_edges<N, I, S>(mesh: &Mesh, naming: &N, names: I) -> Vec<EdgeKey>
where
    N: SceneNaming + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    resolve(mesh, naming, names)
        .into_iter()
        .filter_map(|e| match e {
            ElementRef::Edge(k) => Some(k),
            _ => None,
        })
        .collect()
}

/// The edge key of a single selected object.
pub fn select_edge<N: SceneNaming + ?Sized>(
    mesh: &Mesh,
    naming: &N,
    name: &str,
) -> Option<EdgeKey> {
    select_edges(mesh, naming, [name]).into_iter().next()
}

/// Face keys of the selected objects.
pub fn select_faces<N, I, S>(mesh: &Mesh, naming: &N, names: I) -> Vec<FaceKey>
where
    N: SceneNaming + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    resolve(mesh, naming, names)
        .into_iter()
        .filter_map(|e| match e {
            ElementRef::Face(k) => Some(k),
            _ => None,
        })
        .collect()
}

/// The face key of a single selected object.
pub fn select_face<N: SceneNaming + ?Sized>(
    mesh: &Mesh,
    naming: &N,
    name: &str,
) -> Option<FaceKey> {
    select_faces(mesh, naming, [name]).into_iter().next()
}
