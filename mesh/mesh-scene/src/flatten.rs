//! Consolidate a loaded asset into one indexed mesh.

use mesh_types::{IndexedMesh, MeshTopology};
use tracing::debug;

use crate::asset::{Part, RawAsset};
use crate::error::{SceneError, SceneResult};

/// Flatten a loaded asset into a single mesh.
///
/// - A single mesh is returned unchanged.
/// - A scene has its geometries concatenated in scene order; each
///   geometry's face indices are offset by the vertices appended before it.
/// - A composite is filtered to its mesh parts, which are concatenated the
///   same way. Lines and points are dropped.
///
/// No welding happens here: coincident vertices from different geometries
/// stay separate.
///
/// # Errors
///
/// - [`SceneError::EmptyScene`] for a scene with no geometries.
/// - [`SceneError::UnsupportedFormat`] for a composite without any mesh
///   part, or a point cloud.
///
/// # Example
///
/// ```
/// use mesh_scene::{flatten, RawAsset, Scene};
/// use mesh_types::{unit_cube, MeshTopology};
///
/// let mut scene = Scene::new();
/// scene.insert("a", unit_cube()).unwrap();
/// scene.insert("b", unit_cube()).unwrap();
///
/// let mesh = flatten(RawAsset::Scene(scene)).unwrap();
/// assert_eq!(mesh.face_count(), 24);
/// assert_eq!(mesh.vertex_count(), 16);
/// ```
pub fn flatten(asset: RawAsset) -> SceneResult<IndexedMesh> {
    match asset {
        RawAsset::Mesh(mesh) => Ok(mesh),
        RawAsset::Scene(scene) => {
            if scene.is_empty() {
                return Err(SceneError::EmptyScene);
            }
            debug!(geometries = scene.len(), "flattening scene");
            let meshes: Vec<&IndexedMesh> = scene.iter().map(|(_, mesh)| mesh).collect();
            Ok(concatenate(&meshes))
        }
        RawAsset::Composite(parts) => {
            let meshes: Vec<&IndexedMesh> = parts.iter().filter_map(Part::as_mesh).collect();
            if meshes.is_empty() {
                return Err(SceneError::unsupported(format!(
                    "composite of {} part(s) with no triangle mesh",
                    parts.len()
                )));
            }
            let skipped = parts.len() - meshes.len();
            if skipped > 0 {
                debug!(skipped, "ignoring non-mesh parts");
            }
            Ok(concatenate(&meshes))
        }
        RawAsset::PointCloud(points) => Err(SceneError::unsupported(format!(
            "point cloud with {} point(s) and no faces",
            points.len()
        ))),
    }
}

/// Concatenate meshes, offsetting face indices by the running vertex total.
fn concatenate(meshes: &[&IndexedMesh]) -> IndexedMesh {
    let vertex_total = meshes.iter().map(|m| m.vertex_count()).sum();
    let face_total = meshes.iter().map(|m| m.face_count()).sum();

    let mut combined = IndexedMesh::with_capacity(vertex_total, face_total);
    for mesh in meshes {
        combined.append(mesh);
    }
    combined
}
