//! Face count, surface area and face density.

use mesh_types::{FaceKey, IndexedMesh, MeshTopology};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Surface area at or below which a mesh with faces has infinite density.
pub const DEFAULT_AREA_EPSILON: f64 = 1e-12;

/// Size metrics of a mesh.
///
/// Density is faces per unit of surface area. A mesh whose faces enclose
/// no measurable area has infinite density; a mesh with no faces has zero.
///
/// Infinite density serializes as `null` and reads back as infinity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshMetrics {
    /// Number of triangles with three distinct vertex indices.
    pub face_count: usize,
    /// Faces skipped because they repeat a vertex index.
    #[serde(default)]
    pub degenerate_faces: usize,
    /// Number of vertices.
    pub vertex_count: usize,
    /// Sum of triangle areas.
    pub surface_area: f64,
    /// `face_count / surface_area`.
    #[serde(with = "density_serde")]
    pub density: f64,
}

impl MeshMetrics {
    /// Metrics with the default area epsilon.
    #[must_use]
    pub fn of(mesh: &IndexedMesh) -> Self {
        compute_metrics(mesh, DEFAULT_AREA_EPSILON)
    }

    /// Whether density is finite.
    #[must_use]
    pub const fn has_finite_density(&self) -> bool {
        self.density.is_finite()
    }
}

/// Measure a mesh.
///
/// Faces that repeat a vertex index are not triangles and are left out of
/// every measure; `degenerate_faces` counts them. Faces with distinct
/// indices but coincident positions are kept.
///
/// `surface_area` sums per-face triangle areas. `density` is
/// `face_count / surface_area`, except:
/// - no faces gives density `0`,
/// - faces with `surface_area <= area_epsilon` give `+inf`.
///
/// # Example
///
/// ```
/// use mesh_budget::compute_metrics;
/// use mesh_types::unit_cube;
///
/// let metrics = compute_metrics(&unit_cube(), 1e-12);
/// assert_eq!(metrics.face_count, 12);
/// assert!((metrics.surface_area - 6.0).abs() < 1e-12);
/// assert!((metrics.density - 2.0).abs() < 1e-12);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_metrics(mesh: &IndexedMesh, area_epsilon: f64) -> MeshMetrics {
    let mut face_count = 0;
    let mut surface_area = 0.0;
    for (face, area) in mesh.faces.iter().zip(mesh.face_areas()) {
        if !FaceKey::from_face(*face).is_degenerate() {
            face_count += 1;
            surface_area += area;
        }
    }
    let degenerate_faces = mesh.face_count() - face_count;
    if degenerate_faces > 0 {
        debug!(degenerate_faces, "skipped faces with a repeated vertex index");
    }

    let density = if face_count == 0 {
        0.0
    } else if surface_area <= area_epsilon {
        f64::INFINITY
    } else {
        face_count as f64 / surface_area
    };

    MeshMetrics {
        face_count,
        degenerate_faces,
        vertex_count: mesh.vertex_count(),
        surface_area,
        density,
    }
}

/// Serde for a density that may be infinite.
pub mod density_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Write finite values as numbers and anything else as `null`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            s.serialize_some(value)
        } else {
            s.serialize_none()
        }
    }

    /// Read a number, or `null` as positive infinity.
    ///
    /// # Errors
    ///
    /// Fails if the value is neither a number nor `null`.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::INFINITY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{Vertex, unit_cube};

    fn right_triangle(legs: f64) -> IndexedMesh {
        IndexedMesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(legs, 0.0, 0.0),
                Vertex::from_coords(0.0, legs, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn single_triangle() {
        let metrics = MeshMetrics::of(&right_triangle(1.0));
        assert_eq!(metrics.face_count, 1);
        assert_eq!(metrics.vertex_count, 3);
        assert!((metrics.surface_area - 0.5).abs() < 1e-12);
        assert!((metrics.density - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_mesh_has_zero_density() {
        let metrics = MeshMetrics::of(&IndexedMesh::new());
        assert_eq!(metrics.face_count, 0);
        assert!(metrics.density.abs() < f64::EPSILON);
    }

    #[test]
    fn zero_area_faces_have_infinite_density() {
        let mesh = IndexedMesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0),
                Vertex::from_coords(2.0, 0.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let metrics = MeshMetrics::of(&mesh);
        assert!(metrics.density.is_infinite());
        assert!(!metrics.has_finite_density());
    }

    #[test]
    fn repeated_index_faces_are_skipped() {
        let mut mesh = right_triangle(1.0);
        mesh.faces.push([0, 0, 1]);
        mesh.faces.push([2, 1, 2]);

        let metrics = MeshMetrics::of(&mesh);
        assert_eq!(metrics.face_count, 1);
        assert_eq!(metrics.degenerate_faces, 2);
        assert!((metrics.density - 2.0).abs() < 1e-12);
    }

    #[test]
    fn only_degenerate_faces_measure_as_empty() {
        let mut mesh = right_triangle(1.0);
        mesh.faces = vec![[1, 1, 1]];

        let metrics = MeshMetrics::of(&mesh);
        assert_eq!(metrics.face_count, 0);
        assert_eq!(metrics.degenerate_faces, 1);
        assert!(metrics.density.abs() < f64::EPSILON);
    }

    #[test]
    fn tiny_area_respects_epsilon() {
        // Area 5e-13 is below the default epsilon...
        let tiny = right_triangle(1e-6);
        assert!(MeshMetrics::of(&tiny).density.is_infinite());
        // ...but measurable with a smaller one.
        assert!(compute_metrics(&tiny, 0.0).density.is_finite());
    }

    #[test]
    fn density_scales_inversely_with_area() {
        let small = MeshMetrics::of(&unit_cube());
        let mut big = unit_cube();
        for v in &mut big.vertices {
            v.position.coords *= 2.0;
        }
        let big = MeshMetrics::of(&big);
        assert!((small.density / big.density - 4.0).abs() < 1e-9);
    }

    #[test]
    fn infinite_density_round_trips_through_json() {
        let metrics = MeshMetrics {
            face_count: 3,
            degenerate_faces: 0,
            vertex_count: 3,
            surface_area: 0.0,
            density: f64::INFINITY,
        };
        let json = serde_json::to_string(&metrics).unwrap();
        assert!(json.contains("\"density\":null"));
        let back: MeshMetrics = serde_json::from_str(&json).unwrap();
        assert!(back.density.is_infinite());

        let finite = MeshMetrics::of(&unit_cube());
        let back: MeshMetrics =
            serde_json::from_str(&serde_json::to_string(&finite).unwrap()).unwrap();
        assert_eq!(back, finite);
    }
}
