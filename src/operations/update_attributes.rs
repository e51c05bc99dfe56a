use std::collections::BTreeMap;
use std::iter;

use tracing::debug;

use crate::attributes::{apply, summarize, AttributeBearing, AttributeValue, Consensus};
use crate::error::{AttributeError, Result};
use crate::host::{AttributeEditor, AttributeField, HostContext};
use crate::mesh::{EdgeKey, ElementKind, FaceKey, Mesh, VertexKey};

/// Shows `summary` in the editor and collects the edits by name.
///
/// Returns `Ok(None)` if there is nothing to edit or the dialog was cancelled.
fn ask<E>(
    ctx: &HostContext,
    editor: &mut E,
    summary: BTreeMap<String, Consensus<AttributeValue>>,
) -> Result<Option<BTreeMap<String, Consensus<String>>>>
where
    E: AttributeEditor + ?Sized,
{
    if summary.is_empty() {
        debug!("no attributes to edit");
        return Ok(None);
    }

    let fields: Vec<AttributeField> = summary
        .into_iter()
        .map(|(name, consensus)| AttributeField {
            name,
            value: consensus.map(|v| v.to_string()),
        })
        .collect();

    let Some(values) = editor.edit(ctx, &fields) else {
        debug!(fields = fields.len(), "attribute dialog cancelled");
        return Ok(None);
    };
    if values.len() != fields.len() {
        return Err(AttributeError::EditorMismatch {
            expected: fields.len(),
            actual: values.len(),
        }
        .into());
    }

    Ok(Some(
        fields
            .into_iter()
            .map(|field| field.name)
            .zip(values)
            .collect(),
    ))
}

/// Edits shared attributes of a set of vertices.
pub struct UpdateVertexAttributes {
    keys: Vec<VertexKey>,
    names: Option<Vec<String>>,
}

impl UpdateVertexAttributes {
    /// Creates a new `UpdateVertexAttributes` operation over `keys`.
    ///
    /// Without explicit names the mesh's default vertex attributes are edited.
    #[must_use]
    pub fn new(keys: Vec<VertexKey>) -> Self {
        Self { keys, names: None }
    }

    /// Restricts the dialog to `names`.
    #[must_use]
    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = Some(names);
        self
    }

    /// Executes the operation, returning whether any attribute was written.
    ///
    /// # Errors
    ///
    /// Returns an error if a key does not exist, the selection is empty, an
    /// element lacks an edited attribute, or the editor answers with the
    /// wrong number of values.
    pub fn execute<E>(&self, ctx: &HostContext, mesh: &mut Mesh, editor: &mut E) -> Result<bool>
    where
        E: AttributeEditor + ?Sized,
    {
        let names = self
            .names
            .clone()
            .unwrap_or_else(|| mesh.default_attribute_names(ElementKind::Vertex));
        let summary = summarize(mesh.select_vertices(&self.keys)?, &names)?;
        let Some(edits) = ask(ctx, editor, summary)? else {
            return Ok(false);
        };
        Ok(apply(mesh.select_vertices_mut(&self.keys)?, &edits))
    }
}

/// Edits shared attributes of a set of edges.
pub struct UpdateEdgeAttributes {
    keys: Vec<EdgeKey>,
    names: Option<Vec<String>>,
}

impl UpdateEdgeAttributes {
    /// Creates a new `UpdateEdgeAttributes` operation over `keys`, in either
    /// orientation.
    #[must_use]
    pub fn new(keys: Vec<EdgeKey>) -> Self {
        Self { keys, names: None }
    }

    /// Restricts the dialog to `names`.
    #[must_use]
    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = Some(names);
        self
    }

    /// Executes the operation, returning whether any attribute was written.
    ///
    /// # Errors
    ///
    /// See [`UpdateVertexAttributes::execute`].
    pub fn execute<E>(&self, ctx: &HostContext, mesh: &mut Mesh, editor: &mut E) -> Result<bool>
    where
        E: AttributeEditor + ?Sized,
    {
        let names = self
            .names
            .clone()
            .unwrap_or_else(|| mesh.default_attribute_names(ElementKind::Edge));
        let summary = summarize(mesh.select_edges(&self.keys)?, &names)?;
        let Some(edits) = ask(ctx, editor, summary)? else {
            return Ok(false);
        };
        Ok(apply(mesh.select_edges_mut(&self.keys)?, &edits))
    }
}

/// Edits shared attributes of a set of faces.
pub struct UpdateFaceAttributes {
    keys: Vec<FaceKey>,
    names: Option<Vec<String>>,
}

impl UpdateFaceAttributes {
    /// Creates a new `UpdateFaceAttributes` operation over `keys`.
    #[must_use]
    pub fn new(keys: Vec<FaceKey>) -> Self {
        Self { keys, names: None }
    }

    /// Restricts the dialog to `names`.
    #[must_use]
    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = Some(names);
        self
    }

    /// Executes the operation, returning whether any attribute was written.
    ///
    /// # Errors
    ///
    /// See [`UpdateVertexAttributes::execute`].
    pub fn execute<E>(&self, ctx: &HostContext, mesh: &mut Mesh, editor: &mut E) -> Result<bool>
    where
        E: AttributeEditor + ?Sized,
    {
        let names = self
            .names
            .clone()
            .unwrap_or_else(|| mesh.default_attribute_names(ElementKind::Face));
        let summary = summarize(mesh.select_faces(&self.keys)?, &names)?;
        let Some(edits) = ask(ctx, editor, summary)? else {
            return Ok(false);
        };
        Ok(apply(mesh.select_faces_mut(&self.keys)?, &edits))
    }
}

/// Edits the attributes of the mesh itself.
#[derive(Default)]
pub struct UpdateMeshAttributes {
    names: Option<Vec<String>>,
}

impl UpdateMeshAttributes {
    /// Creates a new `UpdateMeshAttributes` operation over every mesh attribute.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the dialog to `names`.
    #[must_use]
    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = Some(names);
        self
    }

    /// Executes the operation, returning whether any attribute was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh lacks a requested attribute or the editor
    /// answers with the wrong number of values.
    pub fn execute<E>(&self, ctx: &HostContext, mesh: &mut Mesh, editor: &mut E) -> Result<bool>
    where
        E: AttributeEditor + ?Sized,
    {
        let names = match &self.names {
            Some(names) => names.clone(),
            None => mesh.attributes().keys().cloned().collect(),
        };
        let summary = summarize(iter::once(&*mesh), &names)?;
        let Some(edits) = ask(ctx, editor, summary)? else {
            return Ok(false);
        };
        Ok(apply(iter::once(mesh), &edits))
    }
}
