//! End-to-end audit behaviour through the public API.

use mesh_audit::{
    AuditError, AuditOutcome, AuditParams, PaintMode, audit_asset, audit_file, audit_mesh,
};
use mesh_budget::{Budget, BudgetError, BudgetTable};
use mesh_io::{IoError, save_colored_obj};
use mesh_paint::FacePalette;
use mesh_scene::{Part, RawAsset, Scene, SceneError};
use mesh_types::{IndexedMesh, MeshTopology, Vertex, unit_cube};

fn standard_audit(asset: RawAsset, tier: &str, usage: &str) -> Result<AuditOutcome, AuditError> {
    audit_asset(asset, &BudgetTable::standard(), tier, usage, &AuditParams::default())
}

// ============================================================================
// Density
// ============================================================================

#[test]
fn coincident_vertices_have_infinite_density() {
    let p = Vertex::from_coords(2.0, 2.0, 2.0);
    let mesh = IndexedMesh::from_parts(vec![p.clone(), p.clone(), p], vec![[0, 1, 2]]);

    let outcome = audit_mesh(&mesh, &Budget::new(10, 1.0e9), &AuditParams::default()).unwrap();

    assert_eq!(outcome.report.face_count, 1);
    assert!(outcome.report.density.is_infinite());
    assert!(outcome.report.faces_within_budget);
    assert!(!outcome.report.density_within_budget);
    assert!(!outcome.report.is_within_budget());
    assert_eq!(outcome.report.inverted_face_count, 0);
}

#[test]
fn infinite_density_limit_admits_degenerate_mesh() {
    let p = Vertex::from_coords(0.0, 0.0, 0.0);
    let mesh = IndexedMesh::from_parts(vec![p.clone(), p.clone(), p], vec![[0, 1, 2]]);

    let outcome =
        audit_mesh(&mesh, &Budget::new(10, f64::INFINITY), &AuditParams::default()).unwrap();
    assert!(outcome.report.density_within_budget);
}

#[test]
fn infinite_density_serializes_as_null() {
    let p = Vertex::from_coords(0.0, 0.0, 0.0);
    let mesh = IndexedMesh::from_parts(vec![p.clone(), p.clone(), p], vec![[0, 1, 2]]);
    let outcome = audit_mesh(&mesh, &Budget::new(10, 5.0), &AuditParams::default()).unwrap();

    let json: serde_json::Value = serde_json::to_value(outcome.report).unwrap();
    assert!(json["density"].is_null());
    assert_eq!(json["max_density"], 5.0);
}

#[test]
fn repeated_index_face_is_not_counted() {
    let mesh = IndexedMesh::from_parts(
        vec![
            Vertex::from_coords(0.0, 0.0, 0.0),
            Vertex::from_coords(1.0, 0.0, 0.0),
            Vertex::from_coords(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 0, 1]],
    );

    let outcome = audit_mesh(&mesh, &Budget::new(1, 1.0e9), &AuditParams::default()).unwrap();

    assert_eq!(outcome.report.face_count, 1);
    assert_eq!(outcome.report.face_count, outcome.repaired.face_count());
    assert_eq!(outcome.metrics.degenerate_faces, 1);
    assert_eq!(outcome.orientation.degenerate_faces_dropped, 1);
    assert!(outcome.report.is_within_budget());
}

// ============================================================================
// Budget lookup
// ============================================================================

#[test]
fn lookup_ignores_case() {
    let upper = standard_audit(RawAsset::Mesh(unit_cube()), "AAA", "Hero").unwrap();
    let lower = standard_audit(RawAsset::Mesh(unit_cube()), "aaa", "hero").unwrap();

    assert_eq!(upper.summary(), lower.summary());
    assert_eq!(upper.report.max_faces, 6000);
}

#[test]
fn unknown_usage_class_is_reported() {
    let err = standard_audit(RawAsset::Mesh(unit_cube()), "indie", "crowd").unwrap_err();
    assert!(matches!(
        err,
        AuditError::Budget(BudgetError::UnknownUsageClass { .. })
    ));
}

#[test]
fn over_face_budget() {
    let mut scene = Scene::new();
    for i in 0..13 {
        scene.insert(format!("cube_{i}"), unit_cube()).unwrap();
    }
    // 156 faces against low-poly background's 150.
    let outcome = standard_audit(RawAsset::Scene(scene), "low-poly", "background").unwrap();
    assert_eq!(outcome.report.face_count, 156);
    assert!(!outcome.report.faces_within_budget);
}

// ============================================================================
// Flattening
// ============================================================================

#[test]
fn empty_scene_fails_without_a_mesh() {
    let err = standard_audit(RawAsset::Scene(Scene::new()), "aaa", "hero").unwrap_err();
    assert!(matches!(err, AuditError::Scene(SceneError::EmptyScene)));
}

#[test]
fn point_cloud_is_unsupported() {
    let points = vec![Vertex::from_coords(0.0, 0.0, 0.0); 4];
    let err = standard_audit(RawAsset::PointCloud(points), "aaa", "hero").unwrap_err();
    assert!(matches!(
        err,
        AuditError::Scene(SceneError::UnsupportedFormat { .. })
    ));
}

#[test]
fn composite_keeps_only_mesh_parts() {
    let parts = vec![
        Part::Mesh(unit_cube()),
        Part::Points(vec![Vertex::from_coords(5.0, 5.0, 5.0)]),
    ];
    let outcome = standard_audit(RawAsset::Composite(parts), "indie", "prop").unwrap();
    assert_eq!(outcome.report.face_count, 12);
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn obj_file_with_one_flipped_face() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crate.obj");
    let mut cube = unit_cube();
    cube.flip_face(5);
    save_colored_obj(&cube, &path).unwrap();

    let outcome = audit_file(
        &path,
        &BudgetTable::standard(),
        "indie",
        "prop",
        &AuditParams::default(),
    )
    .unwrap();

    assert_eq!(outcome.report.face_count, 12);
    assert_eq!(outcome.report.inverted_face_count, 1);
    assert!(outcome.report.is_within_budget());

    let painted = outcome
        .paint(PaintMode::Inversions, &FacePalette::default())
        .unwrap();
    assert_eq!(painted.face_count(), 12);
    assert_eq!(painted.vertex_count(), 36);
}

#[test]
fn unknown_tier_fails_before_reading_the_file() {
    let err = audit_file(
        "does_not_exist.obj",
        &BudgetTable::standard(),
        "ultra",
        "prop",
        &AuditParams::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AuditError::Budget(BudgetError::UnknownTier { .. })));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = audit_file(
        "does_not_exist.obj",
        &BudgetTable::standard(),
        "indie",
        "prop",
        &AuditParams::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AuditError::Io(IoError::FileNotFound { .. })));
}
