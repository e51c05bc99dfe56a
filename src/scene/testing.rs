//! In-memory host doubles for scene tests.

use crate::host::{HostContext, SceneNaming, SceneSink};
use crate::mesh::ElementKind;

use super::{ElementRef, FaceSpec, LabelSpec, LineSpec, PointSpec, SceneObjectName};

/// `<mesh>.<kind>.<key>` naming, with `<u>-<v>` edge keys, `.label.` for labels
/// and `.normal.` for normals.
pub struct DottedNaming;

fn key_text(element: &ElementRef) -> String {
    match element {
        ElementRef::Vertex(k) | ElementRef::Face(k) => k.to_string(),
        ElementRef::Edge((u, v)) => format!("{u}-{v}"),
    }
}

impl SceneNaming for DottedNaming {
    fn element_name(&self, mesh: &str, element: &ElementRef) -> String {
        format!("{mesh}.{}.{}", element.kind(), key_text(element))
    }

    fn label_name(&self, mesh: &str, element: &ElementRef) -> String {
        format!("{mesh}.{}.label.{}", element.kind(), key_text(element))
    }

    fn objects_pattern(&self, mesh: &str, kind: Option<ElementKind>) -> String {
        match kind {
            Some(kind) => format!("{mesh}.{kind}.*"),
            None => format!("{mesh}.*"),
        }
    }

    fn labels_pattern(&self, mesh: &str, kind: ElementKind) -> String {
        format!("{mesh}.{kind}.label.*")
    }

    fn normal_name(&self, mesh: &str, element: &ElementRef) -> String {
        format!("{mesh}.{}.normal.{}", element.kind(), key_text(element))
    }

    fn normals_pattern(&self, mesh: &str, kind: ElementKind) -> String {
        format!("{mesh}.{kind}.normal.*")
    }

    fn parse(&self, name: &str) -> Option<SceneObjectName> {
        let parts: Vec<&str> = name.split('.').collect();
        let (key, head) = parts.split_last()?;
        let (mut kind, mut head) = head.split_last()?;
        if *kind == "label" {
            (kind, head) = head.split_last()?;
        }
        if head.is_empty() {
            return None;
        }
        let element = match *kind {
            "vertex" => ElementRef::Vertex(key.parse().ok()?),
            "face" => ElementRef::Face(key.parse().ok()?),
            "edge" => {
                let (u, v) = key.split_once('-')?;
                ElementRef::Edge((u.parse().ok()?, v.parse().ok()?))
            }
            _ => return None,
        };
        Some(SceneObjectName {
            mesh: head.join("."),
            element,
        })
    }
}

/// Records drawn objects by name; deletion understands trailing-`*` patterns.
#[derive(Default)]
pub struct RecordingSink {
    pub objects: Vec<String>,
    pub points: Vec<PointSpec>,
    pub lines: Vec<LineSpec>,
    pub faces: Vec<FaceSpec>,
    pub labels: Vec<LabelSpec>,
    pub joined: Vec<Vec<usize>>,
    pub cleared: usize,
    pub redraws: usize,
}

impl RecordingSink {
    fn record(&mut self, names: impl Iterator<Item = String>) -> Vec<usize> {
        names
            .map(|name| {
                self.objects.push(name);
                self.objects.len() - 1
            })
            .collect()
    }
}

impl SceneSink for RecordingSink {
    type ObjectId = usize;

    fn delete_objects(&mut self, _ctx: &HostContext, pattern: &str) -> usize {
        let prefix = pattern.trim_end_matches('*');
        let before = self.objects.len();
        self.objects.retain(|name| !name.starts_with(prefix));
        before - self.objects.len()
    }

    fn clear_layer(&mut self, _ctx: &HostContext) {
        self.cleared += 1;
        self.objects.clear();
    }

    fn draw_points(&mut self, _ctx: &HostContext, points: &[PointSpec]) -> Vec<usize> {
        self.points.extend_from_slice(points);
        self.record(points.iter().map(|p| p.name.clone()))
    }

    fn draw_lines(&mut self, _ctx: &HostContext, lines: &[LineSpec]) -> Vec<usize> {
        self.lines.extend_from_slice(lines);
        self.record(lines.iter().map(|l| l.name.clone()))
    }

    fn draw_faces(&mut self, _ctx: &HostContext, faces: &[FaceSpec]) -> Vec<usize> {
        self.faces.extend_from_slice(faces);
        self.record(faces.iter().map(|f| f.name.clone()))
    }

    fn join_faces(&mut self, _ctx: &HostContext, faces: &[usize]) -> Option<usize> {
        if faces.is_empty() {
            return None;
        }
        self.joined.push(faces.to_vec());
        self.record(std::iter::once("joined".to_owned())).pop()
    }

    fn draw_labels(&mut self, _ctx: &HostContext, labels: &[LabelSpec]) -> Vec<usize> {
        self.labels.extend_from_slice(labels);
        self.record(labels.iter().map(|l| l.name.clone()))
    }

    fn redraw(&mut self, _ctx: &HostContext) {
        self.redraws += 1;
    }
}
