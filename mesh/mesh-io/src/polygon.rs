//! Polygon helpers shared by the loaders.

use mesh_types::IndexedMesh;

use crate::error::{IoError, IoResult};

/// Fan-triangulate a polygon around its first corner.
///
/// Polygons with fewer than three corners produce nothing.
pub(crate) fn fan_triangulate(polygon: &[u32], faces: &mut Vec<[u32; 3]>) {
    if let Some((&first, rest)) = polygon.split_first() {
        for pair in rest.windows(2) {
            faces.push([first, pair[0], pair[1]]);
        }
    }
}

/// Reject faces that point past the vertex list.
pub(crate) fn check_indices(mesh: &IndexedMesh, what: &str) -> IoResult<()> {
    let vertex_count = mesh.vertices.len();
    for (face_idx, face) in mesh.faces.iter().enumerate() {
        if let Some(&bad) = face.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(IoError::invalid_content(format!(
                "{what} face {face_idx} references vertex {bad}, but only {vertex_count} exist"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::Vertex;

    #[test]
    fn fan_of_quad_and_pentagon() {
        let mut faces = Vec::new();
        fan_triangulate(&[0, 1, 2, 3], &mut faces);
        assert_eq!(faces, vec![[0, 1, 2], [0, 2, 3]]);

        faces.clear();
        fan_triangulate(&[4, 5, 6, 7, 8], &mut faces);
        assert_eq!(faces, vec![[4, 5, 6], [4, 6, 7], [4, 7, 8]]);
    }

    #[test]
    fn short_polygons_are_skipped() {
        let mut faces = Vec::new();
        fan_triangulate(&[], &mut faces);
        fan_triangulate(&[0, 1], &mut faces);
        assert!(faces.is_empty());
    }

    #[test]
    fn out_of_range_index_is_invalid_content() {
        let mesh = IndexedMesh::from_parts(vec![Vertex::from_coords(0.0, 0.0, 0.0)], vec![[0, 0, 3]]);
        let err = check_indices(&mesh, "PLY").unwrap_err();
        assert!(err.is_invalid_content());
        assert!(err.to_string().contains("vertex 3"));
    }
}
