//! Topology validation run before any repair step.

use mesh_types::{IndexedMesh, Vertex};

use crate::error::{Malformation, RepairResult};

/// Check that a mesh can be repaired.
///
/// Every face index must address an existing vertex, and every referenced
/// vertex must have finite coordinates. Faces with a repeated index are
/// not an error here; welding drops them.
///
/// # Errors
///
/// Returns [`RepairError::MalformedMesh`](crate::RepairError::MalformedMesh)
/// naming the first problem found.
///
/// # Example
///
/// ```
/// use mesh_repair::check_topology;
/// use mesh_types::{IndexedMesh, Vertex};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert!(check_topology(&mesh).unwrap_err().is_malformed());
/// ```
pub fn check_topology(mesh: &IndexedMesh) -> RepairResult<()> {
    let vertex_count = mesh.vertices.len();

    for (face_idx, face) in mesh.faces.iter().enumerate() {
        for &index in face {
            let Some(vertex) = mesh.vertices.get(index as usize) else {
                return Err(Malformation::IndexOutOfRange {
                    face: face_idx,
                    index,
                    vertex_count,
                }
                .into());
            };
            let p = vertex.position;
            if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
                return Err(Malformation::NonFinitePosition { vertex: index }.into());
            }
        }
    }

    Ok(())
}

/// Build a mesh from flat position and index buffers, validating it.
///
/// # Arguments
///
/// * `positions` - `[x0, y0, z0, x1, y1, z1, ...]`
/// * `indices` - `[a0, b0, c0, a1, b1, c1, ...]`, three per triangle
///
/// # Errors
///
/// Fails with `MalformedMesh` if either buffer length is not a multiple of
/// three, or if the resulting mesh fails [`check_topology`].
///
/// # Example
///
/// ```
/// use mesh_repair::mesh_from_flat;
///
/// let mesh = mesh_from_flat(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 2]).unwrap();
/// assert_eq!(mesh.faces, vec![[0, 1, 2]]);
///
/// // A quad's four indices are not a triangle list
/// assert!(mesh_from_flat(&[0.0; 12], &[0, 1, 2, 3]).is_err());
/// ```
pub fn mesh_from_flat(positions: &[f64], indices: &[u32]) -> RepairResult<IndexedMesh> {
    if positions.len() % 3 != 0 {
        return Err(Malformation::PositionCount {
            value_count: positions.len(),
        }
        .into());
    }
    if indices.len() % 3 != 0 {
        return Err(Malformation::NonTriangular {
            index_count: indices.len(),
        }
        .into());
    }

    let vertices = positions
        .chunks_exact(3)
        .map(|c| Vertex::from_coords(c[0], c[1], c[2]))
        .collect();
    let faces = indices
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();

    let mesh = IndexedMesh::from_parts(vertices, faces);
    check_topology(&mesh)?;
    Ok(mesh)
}

/// Whether a face repeats a vertex index.
#[inline]
#[must_use]
pub(crate) const fn is_degenerate_face(face: [u32; 3]) -> bool {
    face[0] == face[1] || face[1] == face[2] || face[0] == face[2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RepairError;
    use mesh_types::unit_cube;

    #[test]
    fn valid_cube_passes() {
        assert!(check_topology(&unit_cube()).is_ok());
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let mut mesh = unit_cube();
        mesh.faces.push([0, 1, 8]);
        let err = check_topology(&mesh).unwrap_err();
        assert_eq!(
            err,
            RepairError::MalformedMesh(Malformation::IndexOutOfRange {
                face: 12,
                index: 8,
                vertex_count: 8,
            })
        );
    }

    #[test]
    fn nan_position_is_reported() {
        let mut mesh = unit_cube();
        mesh.vertices[5].position.y = f64::NAN;
        let err = check_topology(&mesh).unwrap_err();
        assert!(matches!(
            err,
            RepairError::MalformedMesh(Malformation::NonFinitePosition { vertex: 5 })
        ));
    }

    #[test]
    fn unreferenced_nan_vertex_is_ignored() {
        let mut mesh = unit_cube();
        mesh.vertices
            .push(Vertex::from_coords(f64::INFINITY, 0.0, 0.0));
        assert!(check_topology(&mesh).is_ok());
    }

    #[test]
    fn flat_buffers_must_be_triples() {
        let err = mesh_from_flat(&[0.0, 0.0], &[]).unwrap_err();
        assert!(matches!(
            err,
            RepairError::MalformedMesh(Malformation::PositionCount { value_count: 2 })
        ));

        let err = mesh_from_flat(&[0.0; 9], &[0, 1]).unwrap_err();
        assert!(matches!(
            err,
            RepairError::MalformedMesh(Malformation::NonTriangular { index_count: 2 })
        ));
    }

    #[test]
    fn flat_buffers_check_indices() {
        let err = mesh_from_flat(&[0.0; 9], &[0, 1, 3]).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn degenerate_face_detection() {
        assert!(is_degenerate_face([1, 1, 2]));
        assert!(is_degenerate_face([1, 2, 1]));
        assert!(!is_degenerate_face([0, 1, 2]));
    }
}
