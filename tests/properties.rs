//! Property-based tests for key merging, meshing and attribute reconciliation.
//!
//! Run with: cargo test --test properties

use std::collections::BTreeMap;

use meshbridge::attributes::{
    apply, parse_literal, summarize, AttributeMap, AttributeValue, Consensus,
};
use meshbridge::geometry::{BoundaryLoop, CurveSegment, Line};
use meshbridge::math::{GeometricKey, Point3};
use meshbridge::mesh::MeshBuffers;
use meshbridge::operations::{GridMeshBuilder, SurfaceLoopAssembler};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Scaled integer coordinates and sub-half-step offsets at 3 decimals.
fn arb_lattice_point() -> impl Strategy<Value = ([i64; 3], [f64; 3])> {
    (
        prop::array::uniform3(-100_000i64..100_000),
        prop::array::uniform3(-0.4..0.4f64),
    )
}

/// A convex polygon on a circle, far enough apart that no two corners merge.
fn arb_polygon() -> impl Strategy<Value = Vec<Point3>> {
    (3usize..8, -50.0..50.0f64, -50.0..50.0f64, 1.0..10.0f64).prop_map(|(n, cx, cy, r)| {
        (0..n)
            .map(|k| {
                let angle = std::f64::consts::TAU * k as f64 / n as f64;
                Point3::new(cx + r * angle.cos(), cy + r * angle.sin(), 0.0)
            })
            .collect()
    })
}

fn arb_value() -> impl Strategy<Value = AttributeValue> {
    prop_oneof![
        any::<i64>().prop_map(AttributeValue::Int),
        any::<bool>().prop_map(AttributeValue::Bool),
        "[a-z]{1,8}".prop_map(AttributeValue::Text),
    ]
}

fn arb_attributes() -> impl Strategy<Value = AttributeMap> {
    prop::collection::btree_map("[a-z]{1,6}", arb_value(), 1..6)
}

fn loop_through(points: &[Point3]) -> BoundaryLoop {
    (0..points.len())
        .map(|k| {
            let line = Line::new(points[k], points[(k + 1) % points.len()])
                .expect("polygon corners are distinct");
            CurveSegment::from(line)
        })
        .collect()
}

fn loops_of(buffers: &MeshBuffers) -> Vec<BoundaryLoop> {
    buffers
        .faces
        .iter()
        .map(|face| {
            let points: Vec<Point3> = face.iter().map(|&i| buffers.vertices[i]).collect();
            loop_through(&points)
        })
        .collect()
}

// =============================================================================
// Geometric keys
// =============================================================================

proptest! {
    #[test]
    fn key_is_the_rounded_lattice_point((coords, offsets) in arb_lattice_point()) {
        let point = Point3::new(
            (coords[0] as f64 + offsets[0]) / 1000.0,
            (coords[1] as f64 + offsets[1]) / 1000.0,
            (coords[2] as f64 + offsets[2]) / 1000.0,
        );
        prop_assert_eq!(GeometricKey::new(&point, 3).coords(), coords);
    }

    #[test]
    fn keys_agree_iff_rounded_points_agree(
        (a, da) in arb_lattice_point(),
        (b, db) in arb_lattice_point(),
    ) {
        let p = Point3::new(
            (a[0] as f64 + da[0]) / 1000.0,
            (a[1] as f64 + da[1]) / 1000.0,
            (a[2] as f64 + da[2]) / 1000.0,
        );
        let q = Point3::new(
            (b[0] as f64 + db[0]) / 1000.0,
            (b[1] as f64 + db[1]) / 1000.0,
            (b[2] as f64 + db[2]) / 1000.0,
        );
        prop_assert_eq!(GeometricKey::new(&p, 3) == GeometricKey::new(&q, 3), a == b);
    }
}

// =============================================================================
// Meshing
// =============================================================================

proptest! {
    #[test]
    fn grid_counts(u in 0usize..12, v in 0usize..12) {
        let samples: Vec<Point3> = (0..u * v)
            .map(|k| Point3::new((k % v.max(1)) as f64, (k / v.max(1)) as f64, 0.0))
            .collect();
        let buffers = GridMeshBuilder::build(&samples, u, v).unwrap();

        prop_assert_eq!(buffers.vertices.len(), u * v);
        prop_assert_eq!(buffers.faces.len(), u.saturating_sub(1) * v.saturating_sub(1));
        for face in &buffers.faces {
            prop_assert_eq!(face.len(), 4);
            prop_assert!(face.iter().all(|&i| i < u * v));
        }
    }

    #[test]
    fn reassembly_is_idempotent(polygons in prop::collection::vec(arb_polygon(), 1..4)) {
        let loops: Vec<BoundaryLoop> = polygons.iter().map(|p| loop_through(p)).collect();
        let assembler = SurfaceLoopAssembler::new(3);

        let first = assembler.assemble(&loops).unwrap();
        let second = assembler.assemble(&loops_of(&first)).unwrap();

        prop_assert_eq!(&first.faces, &second.faces);
        prop_assert_eq!(first.vertices.len(), second.vertices.len());
        for (a, b) in first.vertices.iter().zip(&second.vertices) {
            prop_assert!((a - b).norm() < 1e-9);
        }
    }
}

// =============================================================================
// Attribute reconciliation
// =============================================================================

proptest! {
    #[test]
    fn single_element_summary_is_verbatim(attributes in arb_attributes()) {
        let names: Vec<String> = attributes.keys().cloned().collect();
        let summary = summarize([&attributes], &names).unwrap();

        for (name, value) in &attributes {
            prop_assert_eq!(summary[name].value(), Some(value));
        }
    }

    #[test]
    fn mixed_edits_are_never_written(
        elements in prop::collection::vec(arb_attributes(), 1..5),
        edits in prop::collection::btree_map(
            "[a-z]{1,6}",
            prop::option::of("[0-9]{1,3}"),
            1..6,
        ),
    ) {
        let edits: BTreeMap<String, Consensus<String>> = edits
            .into_iter()
            .map(|(name, edit)| (name, edit.map_or(Consensus::Mixed, Consensus::Value)))
            .collect();
        let mut after = elements.clone();
        let _written = apply(after.iter_mut(), &edits);

        for (before, after) in elements.iter().zip(&after) {
            for (name, edit) in &edits {
                match edit {
                    Consensus::Mixed => prop_assert_eq!(before.get(name), after.get(name)),
                    Consensus::Value(raw) => {
                        prop_assert_eq!(after.get(name), Some(&parse_literal(raw)));
                    }
                }
            }
        }
    }

    #[test]
    fn integers_survive_display(i in any::<i64>()) {
        let value = AttributeValue::Int(i);
        prop_assert_eq!(parse_literal(&value.to_string()), value);
    }
}
