use thiserror::Error;

use crate::mesh::ElementKind;

/// Top-level error type for meshbridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to mesh topology and its reconstruction.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("{kind} not found: {key}")]
    ElementNotFound { kind: &'static str, key: String },

    #[error("boundary loop {loop_index} is not contiguous after segment {segment_index}")]
    MalformedLoop {
        loop_index: usize,
        segment_index: usize,
    },

    #[error(
        "boundary loop {loop_index} has {segments} segments and {corners} distinct corners, \
         at least 3 of each are required"
    )]
    DegenerateLoop {
        loop_index: usize,
        segments: usize,
        corners: usize,
    },

    #[error("grid expects {expected} samples, got {actual}")]
    GridSizeMismatch { expected: usize, actual: usize },

    #[error("invalid face {face}: {reason}")]
    InvalidFace { face: usize, reason: String },
}

/// Errors related to element attributes.
#[derive(Debug, Error)]
pub enum AttributeError {
    #[error("attribute summary requires at least one element")]
    EmptySelection,

    #[error("element has no attribute named {name:?}")]
    MissingAttribute { name: String },

    #[error("attribute editor returned {actual} values for {expected} fields")]
    EditorMismatch { expected: usize, actual: usize },
}

/// Errors in caller-supplied configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid label formatter: {0}")]
    InvalidFormatter(String),

    #[error("{0} normals are not defined")]
    UndefinedNormals(ElementKind),
}

/// Convenience type alias for results using [`BridgeError`].
pub type Result<T> = std::result::Result<T, BridgeError>;
