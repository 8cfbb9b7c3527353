//! Property-based tests for metrics and budget lookup.
//!
//! Run with: cargo test -p mesh-budget -- proptest

#![allow(clippy::cast_possible_truncation)]

use mesh_budget::{BudgetError, BudgetTable, MeshMetrics, Tier, UsageClass};
use mesh_types::{IndexedMesh, Vertex};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_mesh() -> impl Strategy<Value = IndexedMesh> {
    prop::collection::vec(prop::array::uniform3(-50.0..50.0f64), 3..20).prop_flat_map(|points| {
        let n = points.len() as u32;
        prop::collection::vec(prop::array::uniform3(0..n), 0..40).prop_map(move |faces| {
            let vertices = points
                .iter()
                .map(|&[x, y, z]| Vertex::from_coords(x, y, z))
                .collect();
            IndexedMesh::from_parts(vertices, faces)
        })
    })
}

/// A name with each character's case chosen at random, padded with spaces.
fn arb_casing(name: &'static str) -> impl Strategy<Value = String> {
    (prop::collection::vec(any::<bool>(), name.len()), 0..3usize, 0..3usize).prop_map(
        move |(upper, left, right)| {
            let body: String = name
                .chars()
                .zip(upper)
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect();
            format!("{}{body}{}", " ".repeat(left), " ".repeat(right))
        },
    )
}

fn arb_tier() -> impl Strategy<Value = Tier> {
    prop::sample::select(Tier::ALL.to_vec())
}

fn arb_usage() -> impl Strategy<Value = UsageClass> {
    prop::sample::select(UsageClass::ALL.to_vec())
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    /// Density is finite and non-negative, or infinite for zero-area meshes.
    #[test]
    fn density_is_well_formed(mesh in arb_mesh()) {
        let metrics = MeshMetrics::of(&mesh);
        prop_assert_eq!(metrics.face_count + metrics.degenerate_faces, mesh.faces.len());
        let repeated = mesh
            .faces
            .iter()
            .filter(|&&[a, b, c]| a == b || b == c || a == c)
            .count();
        prop_assert_eq!(metrics.degenerate_faces, repeated);
        prop_assert!(metrics.surface_area >= 0.0);
        prop_assert!(!metrics.density.is_nan());
        prop_assert!(metrics.density >= 0.0);
        if metrics.density.is_infinite() {
            prop_assert!(metrics.face_count > 0);
            prop_assert!(metrics.surface_area <= 1e-12);
        }
    }

    /// Lookup ignores case and padding.
    #[test]
    fn lookup_is_case_insensitive(
        (tier, tier_name) in arb_tier().prop_flat_map(|t| (Just(t), arb_casing(t.as_str()))),
        (usage, usage_name) in arb_usage().prop_flat_map(|u| (Just(u), arb_casing(u.as_str()))),
    ) {
        let table = BudgetTable::standard();
        let by_name = table.lookup(&tier_name, &usage_name).unwrap();
        prop_assert_eq!(by_name, table.get(tier, usage).unwrap());
    }

    /// Unknown names always fail, and the same way every time.
    #[test]
    fn unknown_tier_fails_deterministically(name in "[a-z]{1,12}", usage in arb_usage()) {
        prop_assume!(name.parse::<Tier>().is_err());
        let table = BudgetTable::standard();
        let first = table.lookup(&name, usage.as_str()).unwrap_err();
        let second = table.lookup(&name, usage.as_str()).unwrap_err();
        prop_assert_eq!(&first, &second);
        let is_unknown_tier = matches!(first, BudgetError::UnknownTier { .. });
        prop_assert!(is_unknown_tier);
    }
}
