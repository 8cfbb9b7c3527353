//! Loading real files from disk.

use mesh_io::{
    IoError, MeshFormat, load_asset, load_asset_from_bytes, save_colored_obj, save_colored_ply,
};
use mesh_scene::{RawAsset, SceneError, flatten};
use mesh_types::{MeshTopology, VertexColor, unit_cube};

fn write(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Unit-square positions followed by two triangles' `u32` indices.
fn square_bin() -> Vec<u8> {
    let mut bin = Vec::new();
    for c in [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0] {
        bin.extend_from_slice(&c.to_le_bytes());
    }
    for i in [0u32, 1, 2, 0, 2, 3] {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    bin
}

const SQUARE_GLTF: &str = r#"{
  "asset": {"version": "2.0"},
  "buffers": [{"uri": "square.bin", "byteLength": 72}],
  "bufferViews": [
    {"buffer": 0, "byteOffset": 0, "byteLength": 48},
    {"buffer": 0, "byteOffset": 48, "byteLength": 24}
  ],
  "accessors": [
    {"bufferView": 0, "componentType": 5126, "count": 4, "type": "VEC3",
     "min": [0, 0, 0], "max": [1, 1, 0]},
    {"bufferView": 1, "componentType": 5125, "count": 6, "type": "SCALAR"}
  ],
  "meshes": [{"name": "square", "primitives": [{"attributes": {"POSITION": 0}, "indices": 1}]}]
}"#;

// =============================================================================
// Loading
// =============================================================================

#[test]
fn obj_groups_flatten_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "pair.obj",
        b"o left\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\no right\nv 5 0 0\nv 6 0 0\nv 5 1 0\nf 4 5 6\n",
    );

    let asset = load_asset(&path).unwrap();
    assert_eq!(asset.kind(), "scene");

    let mesh = flatten(asset).unwrap();
    assert_eq!(mesh.face_count(), 2);
    assert_eq!(mesh.faces, vec![[0, 1, 2], [3, 4, 5]]);
    assert!((mesh.vertices[3].position.x - 5.0).abs() < 1e-12);
}

#[test]
fn gltf_resolves_buffers_next_to_the_file() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir, "square.bin", &square_bin());
    let path = write(&dir, "square.gltf", SQUARE_GLTF.as_bytes());

    let mesh = flatten(load_asset(&path).unwrap()).unwrap();
    assert_eq!(mesh.face_count(), 2);
    assert!((mesh.surface_area() - 1.0).abs() < 1e-6);

    // The same document without a directory cannot find its buffer.
    let err = load_asset_from_bytes(SQUARE_GLTF.as_bytes(), MeshFormat::Gltf).unwrap_err();
    assert!(err.is_invalid_content());
}

#[test]
fn point_cloud_ply_does_not_flatten() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "scan.ply",
        b"ply\nformat ascii 1.0\nelement vertex 3\nproperty float x\nproperty float y\nproperty float z\nend_header\n0 0 0\n1 0 0\n0 1 0\n",
    );

    let asset = load_asset(&path).unwrap();
    assert!(matches!(asset, RawAsset::PointCloud(ref p) if p.len() == 3));
    assert!(matches!(
        flatten(asset),
        Err(SceneError::UnsupportedFormat { .. })
    ));
}

#[test]
fn empty_obj_group_file_is_a_point_cloud() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "empty.obj", b"# nothing here\n");
    assert!(matches!(load_asset(&path).unwrap(), RawAsset::PointCloud(ref p) if p.is_empty()));
}

#[test]
fn unreadable_content_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "broken.glb", b"definitely not a glb");
    let err = load_asset(&path).unwrap_err();
    assert!(err.is_invalid_content(), "{err}");
}

#[test]
fn unknown_extension_is_rejected_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "model.fbx", b"Kaydara FBX Binary");
    assert!(matches!(
        load_asset(&path),
        Err(IoError::UnknownFormat { .. })
    ));
}

// =============================================================================
// Saving
// =============================================================================

#[test]
fn painted_mesh_survives_ply_and_obj() {
    let mut cube = unit_cube();
    for (i, v) in cube.vertices.iter_mut().enumerate() {
        let c = if i % 2 == 0 {
            VertexColor::RED
        } else {
            VertexColor::new(220, 220, 220)
        };
        v.attributes.color = Some(c);
    }

    let dir = tempfile::tempdir().unwrap();
    for (name, binary) in [("cube.ply", true), ("cube_ascii.ply", false), ("cube.obj", false)] {
        let path = dir.path().join(name);
        if name.ends_with(".obj") {
            save_colored_obj(&cube, &path).unwrap();
        } else {
            save_colored_ply(&cube, &path, binary).unwrap();
        }

        let loaded = flatten(load_asset(&path).unwrap()).unwrap();
        assert_eq!(loaded.faces, cube.faces, "{name}");
        for (a, b) in cube.vertices.iter().zip(&loaded.vertices) {
            assert_eq!(a.color(), b.color(), "{name}");
            assert!((a.position - b.position).norm() < 1e-9, "{name}");
        }
    }
}
