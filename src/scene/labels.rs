use crate::attributes::AttributeValue;
use crate::error::{AttributeError, ConfigError, Result};
use crate::host::{HostContext, SceneNaming, SceneSink};
use crate::math::Point3;
use crate::mesh::{ElementKind, Mesh};

use super::{ElementColors, ElementRef, LabelSpec};

/// What a label shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LabelContent {
    /// The element key (`u-v` for edges).
    #[default]
    Key,
    /// The element's position in iteration order.
    Index,
    /// The value of a named attribute.
    Attribute(String),
}

/// Turns a label value into text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LabelFormatter {
    /// The value's own text form.
    #[default]
    Display,
    /// Numbers with a fixed number of decimals; other values as `Display`.
    Precision(usize),
    /// A template whose single `{}` is replaced by the value's text form.
    Template(String),
}

impl LabelFormatter {
    /// Checks that the formatter can be applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFormatter`] if a template does not
    /// contain exactly one `{}` placeholder.
    pub fn validate(&self) -> Result<()> {
        if let Self::Template(template) = self {
            let placeholders = template.matches("{}").count();
            if placeholders != 1 {
                return Err(ConfigError::InvalidFormatter(format!(
                    "template {template:?} has {placeholders} placeholders, expected 1"
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Formats `value`.
    #[must_use]
    pub fn format(&self, value: &AttributeValue) -> String {
        match self {
            Self::Display => value.to_string(),
            Self::Precision(decimals) => match value.as_f64() {
                Some(x) => format!("{x:.decimals$}"),
                None => value.to_string(),
            },
            Self::Template(template) => template.replacen("{}", &value.to_string(), 1),
        }
    }
}

/// Draws one text label per element of a kind.
pub struct DisplayLabels {
    kind: ElementKind,
    content: LabelContent,
    formatter: LabelFormatter,
    colors: ElementColors,
}

impl DisplayLabels {
    /// Creates a new `DisplayLabels` operation showing element keys.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            content: LabelContent::default(),
            formatter: LabelFormatter::default(),
            colors: ElementColors::new(),
        }
    }

    /// Sets what the labels show.
    #[must_use]
    pub fn with_content(mut self, content: LabelContent) -> Self {
        self.content = content;
        self
    }

    /// Sets how label values are turned into text.
    #[must_use]
    pub fn with_formatter(mut self, formatter: LabelFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Sets per-element colors.
    #[must_use]
    pub fn with_colors(mut self, colors: ElementColors) -> Self {
        self.colors = colors;
        self
    }

    /// Replaces the mesh's labels of this kind.
    ///
    /// The formatter is validated before anything in the scene changes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFormatter`] for an unusable formatter and
    /// [`AttributeError::MissingAttribute`] if an element lacks the shown attribute.
    #[allow(clippy::cast_possible_wrap)]
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
        self.formatter.validate()?;

        let mesh_name = mesh.name();
        let mut labels = Vec::new();
        for (index, (element, position)) in self.anchors(mesh)?.into_iter().enumerate() {
            let value = match &self.content {
                LabelContent::Key => key_value(&element),
                LabelContent::Index => AttributeValue::Int(index as i64),
                LabelContent::Attribute(name) => attribute_value(mesh, &element, name)?,
            };
            labels.push(LabelSpec {
                position,
                text: self.formatter.format(&value),
                name: naming.label_name(&mesh_name, &element),
                color: self.colors.get(&element).copied(),
            });
        }

        sink.delete_objects(ctx, &naming.labels_pattern(&mesh_name, self.kind));
        let ids = sink.draw_labels(ctx, &labels);
        sink.redraw(ctx);
        Ok(ids)
    }

    fn anchors(&self, mesh: &Mesh) -> Result<Vec<(ElementRef, Point3)>> {
        match self.kind {
            ElementKind::Vertex => Ok(mesh
                .vertices()
                .map(|(k, v)| (ElementRef::Vertex(k), v.point))
                .collect()),
            ElementKind::Edge => mesh
                .edges()
                .map(|((u, v), _)| Ok((ElementRef::Edge((u, v)), mesh.edge_midpoint(u, v)?)))
                .collect(),
            ElementKind::Face => mesh
                .faces()
                .map(|(k, _)| Ok((ElementRef::Face(k), mesh.face_centroid(k)?)))
                .collect(),
        }
    }
}

#[allow(clippy::cast_possible_wrap)]
fn key_value(element: &ElementRef) -> AttributeValue {
    match element {
        ElementRef::Vertex(k) | ElementRef::Face(k) => AttributeValue::Int(*k as i64),
        ElementRef::Edge((u, v)) => AttributeValue::Text(format!("{u}-{v}")),
    }
}

fn attribute_value(mesh: &Mesh, element: &ElementRef, name: &str) -> Result<AttributeValue> {
    let attributes = match element {
        ElementRef::Vertex(k) => &mesh.vertex(*k)?.attributes,
        ElementRef::Edge((u, v)) => &mesh.edge(*u, *v)?.attributes,
        ElementRef::Face(k) => &mesh.face(*k)?.attributes,
    };
    attributes.get(name).cloned().ok_or_else(|| {
        AttributeError::MissingAttribute {
            name: name.to_owned(),
        }
        .into()
    })
}
