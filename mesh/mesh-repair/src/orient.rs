//! Outward orientation per connected component.
//!
//! Runs after winding propagation, so every component is already
//! internally consistent and can only be wholly right or wholly inverted.

use mesh_types::{IndexedMesh, MeshTopology};
use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::adjacency::{FaceAdjacency, face_edges};

/// Relative size below which an orientation score counts as zero.
const SCORE_TOLERANCE: f64 = 1e-9;

/// How one component was judged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentOrientation {
    /// Whether every edge of the component is shared by exactly two faces.
    pub closed: bool,
    /// Signed volume for closed components, area-weighted outward agreement
    /// for open ones. Negative means inverted.
    pub score: f64,
    /// Whether the component's faces were reversed.
    pub reversed: bool,
}

/// Totals over all components.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrientSummary {
    /// Per-component results, in component order.
    pub components: Vec<ComponentOrientation>,
}

impl OrientSummary {
    /// Number of closed components.
    #[must_use]
    pub fn closed_count(&self) -> usize {
        self.components.iter().filter(|c| c.closed).count()
    }

    /// Number of open components.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.components.iter().filter(|c| !c.closed).count()
    }

    /// Number of components whose faces were reversed.
    #[must_use]
    pub fn reversed_count(&self) -> usize {
        self.components.iter().filter(|c| c.reversed).count()
    }
}

/// Turn every component so its normals face outward.
///
/// Closed components are judged by signed volume about the component
/// centroid. Open components have no inside, so they are judged by how
/// well each face normal agrees with the direction from the component
/// centroid to the face, weighted by area. A score within tolerance of
/// zero, as for a flat patch, keeps the input orientation.
///
/// `components` are face lists from [`propagate_winding`](crate::propagate_winding)
/// and `adjacency` must describe `mesh.faces`.
///
/// # Example
///
/// ```
/// use mesh_repair::{orient_outward, FaceAdjacency};
/// use mesh_types::unit_cube;
///
/// let mut cube = unit_cube();
/// cube.flip_normals();
/// let adjacency = FaceAdjacency::build(&cube.faces);
/// let components = vec![(0..12).collect::<Vec<_>>()];
///
/// let summary = orient_outward(&mut cube, &components, &adjacency);
/// assert_eq!(summary.reversed_count(), 1);
/// assert!(cube.signed_volume() > 0.0);
/// ```
pub fn orient_outward(
    mesh: &mut IndexedMesh,
    components: &[Vec<usize>],
    adjacency: &FaceAdjacency,
) -> OrientSummary {
    let mut summary = OrientSummary::default();

    for (component_idx, faces) in components.iter().enumerate() {
        let closed = is_closed(mesh, faces, adjacency);
        let (score, scale) = if closed {
            volume_score(mesh, faces)
        } else {
            outward_score(mesh, faces)
        };

        let reversed = score < -SCORE_TOLERANCE * scale;
        if reversed {
            for &face in faces {
                mesh.flip_face(face);
            }
        }

        debug!(
            component = component_idx,
            faces = faces.len(),
            closed,
            score,
            reversed,
            "oriented component"
        );
        summary.components.push(ComponentOrientation {
            closed,
            score,
            reversed,
        });
    }

    summary
}

/// Every edge of every face has exactly two users.
fn is_closed(mesh: &IndexedMesh, faces: &[usize], adjacency: &FaceAdjacency) -> bool {
    faces.iter().all(|&face| {
        face_edges(mesh.faces[face]).iter().all(|&(a, b)| {
            adjacency
                .faces_for_edge(a, b)
                .is_some_and(|users| users.len() == 2)
        })
    })
}

/// Area-weighted centroid of the faces, with the total area.
///
/// Falls back to the plain mean of face centroids when the area is zero.
#[allow(clippy::cast_precision_loss)]
fn component_centroid(mesh: &IndexedMesh, faces: &[usize]) -> (Point3<f64>, f64) {
    let mut weighted = Vector3::zeros();
    let mut plain = Vector3::zeros();
    let mut area = 0.0;

    for &face in faces {
        if let Some(tri) = mesh.triangle(face) {
            let a = tri.area();
            let c = tri.centroid().coords;
            weighted += c * a;
            plain += c;
            area += a;
        }
    }

    if area > 0.0 {
        (Point3::from(weighted / area), area)
    } else if faces.is_empty() {
        (Point3::origin(), 0.0)
    } else {
        (Point3::from(plain / faces.len() as f64), 0.0)
    }
}

/// Largest distance from `center` to a face vertex.
fn radius(mesh: &IndexedMesh, faces: &[usize], center: &Point3<f64>) -> f64 {
    faces
        .iter()
        .filter_map(|&face| mesh.triangle(face))
        .flat_map(|tri| [tri.v0, tri.v1, tri.v2])
        .map(|p| (p - center).norm())
        .fold(0.0, f64::max)
}

/// Signed volume about the centroid, and the tolerance scale.
fn volume_score(mesh: &IndexedMesh, faces: &[usize]) -> (f64, f64) {
    let (center, area) = component_centroid(mesh, faces);
    let volume = faces
        .iter()
        .filter_map(|&face| mesh.triangle(face))
        .map(|tri| tri.signed_volume_from(&center))
        .sum();
    (volume, area * radius(mesh, faces, &center))
}

/// Area-weighted agreement of face normals with the outward direction.
fn outward_score(mesh: &IndexedMesh, faces: &[usize]) -> (f64, f64) {
    let (center, area) = component_centroid(mesh, faces);
    let agreement = faces
        .iter()
        .filter_map(|&face| mesh.triangle(face))
        .map(|tri| {
            let area_normal = tri.normal_unnormalized() * 0.5;
            area_normal.dot(&(tri.centroid() - center))
        })
        .sum();
    (agreement, area * radius(mesh, faces, &center))
}
