use super::curve::CurveSegment;

/// An ordered cycle of curve segments bounding a surface patch.
///
/// Segments are expected to be contiguous: each segment ends where the next
/// one starts, and the last one ends where the first one starts.
#[derive(Debug, Clone, Default)]
pub struct BoundaryLoop {
    segments: Vec<CurveSegment>,
}

impl BoundaryLoop {
    /// Creates a loop from its ordered segments.
    #[must_use]
    pub fn new(segments: Vec<CurveSegment>) -> Self {
        Self { segments }
    }

    /// Returns the ordered segments.
    #[must_use]
    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }

    /// Number of segments in the loop.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the loop has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromIterator<CurveSegment> for BoundaryLoop {
    fn from_iter<I: IntoIterator<Item = CurveSegment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
