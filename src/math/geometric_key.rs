//! Precision-rounded point keys for merging coincident points.

use std::collections::HashMap;
use std::fmt;

use super::Point3;

/// Largest supported number of decimals; keeps the scaled coordinates inside `i64`.
pub const MAX_KEY_PRECISION: u32 = 12;

/// Canonical identifier of a 3D point at a fixed decimal precision.
///
/// Each coordinate is scaled by `10^precision` and rounded half-up to an
/// integer, so two points share a key exactly when they are
/// indistinguishable at that precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometricKey {
    coords: [i64; 3],
    precision: u32,
}

impl GeometricKey {
    /// Computes the key of `point` at `precision` decimals.
    ///
    /// Precisions above [`MAX_KEY_PRECISION`] are clamped.
    #[must_use]
    pub fn new(point: &Point3, precision: u32) -> Self {
        let precision = precision.min(MAX_KEY_PRECISION);
        let scale = scale_factor(precision);
        Self {
            coords: [
                round_half_up(point.x * scale),
                round_half_up(point.y * scale),
                round_half_up(point.z * scale),
            ],
            precision,
        }
    }

    /// Returns the scaled integer coordinates.
    #[must_use]
    pub fn coords(&self) -> [i64; 3] {
        self.coords
    }

    /// Returns the number of decimals this key was computed at.
    #[must_use]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    fn write_coord(&self, f: &mut fmt::Formatter<'_>, value: i64) -> fmt::Result {
        let sign = if value < 0 { "-" } else { "" };
        let magnitude = value.unsigned_abs();
        if self.precision == 0 {
            return write!(f, "{sign}{magnitude}");
        }
        let scale = 10u64.pow(self.precision);
        let width = self.precision as usize;
        write!(
            f,
            "{sign}{}.{:0width$}",
            magnitude / scale,
            magnitude % scale
        )
    }
}

impl fmt::Display for GeometricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.coords;
        self.write_coord(f, x)?;
        f.write_str(",")?;
        self.write_coord(f, y)?;
        f.write_str(",")?;
        self.write_coord(f, z)
    }
}

#[allow(clippy::cast_possible_wrap)]
fn scale_factor(precision: u32) -> f64 {
    10f64.powi(precision as i32)
}

#[allow(clippy::cast_possible_truncation)]
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Deduplicates points by [`GeometricKey`], assigning indices in first-seen order.
#[derive(Debug, Clone)]
pub struct GeometricKeyIndex {
    precision: u32,
    indices: HashMap<GeometricKey, usize>,
    points: Vec<Point3>,
}

impl GeometricKeyIndex {
    /// Creates an empty index keyed at `precision` decimals.
    #[must_use]
    pub fn new(precision: u32) -> Self {
        Self {
            precision,
            indices: HashMap::new(),
            points: Vec::new(),
        }
    }

    /// Returns the precision used for keys.
    #[must_use]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Computes the key of `point` at this index's precision.
    #[must_use]
    pub fn key(&self, point: &Point3) -> GeometricKey {
        GeometricKey::new(point, self.precision)
    }

    /// Inserts a point and returns its vertex index.
    ///
    /// The first point seen for a key fixes both the stored position and the
    /// index; later points with the same key only return that index.
    pub fn insert(&mut self, point: Point3) -> usize {
        let key = self.key(&point);
        if let Some(&index) = self.indices.get(&key) {
            return index;
        }
        let index = self.points.len();
        self.points.push(point);
        self.indices.insert(key, index);
        index
    }

    /// Returns the index of a point already in the index.
    #[must_use]
    pub fn index_of(&self, point: &Point3) -> Option<usize> {
        self.indices.get(&self.key(point)).copied()
    }

    /// Number of unique points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no point has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Unique points in insertion order.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Consumes the index, returning the unique points in insertion order.
    #[must_use]
    pub fn into_points(self) -> Vec<Point3> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_fixed_decimals() {
        let key = GeometricKey::new(&Point3::new(1.0, 0.5, -0.25), 3);
        assert_eq!(key.to_string(), "1.000,0.500,-0.250");
    }

    #[test]
    fn small_negative_values_keep_their_sign() {
        let key = GeometricKey::new(&Point3::new(-0.005, 0.0, 12.0), 3);
        assert_eq!(key.to_string(), "-0.005,0.000,12.000");
    }

    #[test]
    fn zero_precision_prints_integers() {
        let key = GeometricKey::new(&Point3::new(1.4, -2.0, 3.6), 0);
        assert_eq!(key.to_string(), "1,-2,4");
    }

    #[test]
    fn rounds_half_up() {
        // 0.25 * 10 = 2.5 exactly.
        let up = GeometricKey::new(&Point3::new(0.25, -0.25, 0.0), 1);
        assert_eq!(up.coords(), [3, -2, 0]);
    }

    #[test]
    fn negative_zero_matches_zero() {
        let a = GeometricKey::new(&Point3::new(-0.0, -0.0001, 0.0), 3);
        let b = GeometricKey::new(&Point3::new(0.0, 0.0, 0.0), 3);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "0.000,0.000,0.000");
    }

    #[test]
    fn nearby_points_share_a_key() {
        let a = GeometricKey::new(&Point3::new(0.1234, 1.0, 2.0), 3);
        let b = GeometricKey::new(&Point3::new(0.12341, 1.00004, 1.99996), 3);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_points_differ() {
        let a = GeometricKey::new(&Point3::new(0.0, 0.0, 0.0), 6);
        let b = GeometricKey::new(&Point3::new(0.0, 0.0, 2e-6), 6);
        assert_ne!(a, b);
    }

    #[test]
    fn precision_is_clamped() {
        let key = GeometricKey::new(&Point3::origin(), 40);
        assert_eq!(key.precision(), MAX_KEY_PRECISION);
    }

    #[test]
    fn index_keeps_first_seen_point() {
        let mut index = GeometricKeyIndex::new(3);
        let a = index.insert(Point3::new(1.0, 0.0, 0.0));
        let b = index.insert(Point3::new(0.0, 1.0, 0.0));
        let c = index.insert(Point3::new(1.0001, 0.0, 0.0));
        assert_eq!((a, b, c), (0, 1, 0));
        assert_eq!(index.len(), 2);
        assert_eq!(index.points()[0], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(index.index_of(&Point3::new(0.0, 1.0, 0.0)), Some(1));
        assert_eq!(index.index_of(&Point3::new(5.0, 5.0, 5.0)), None);
    }
}
