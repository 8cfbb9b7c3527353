//! Per-face colouring by splitting shared vertices.

use mesh_types::{IndexedMesh, Vertex, VertexColor};

use crate::error::{PaintError, PaintResult};

/// Give every face its own three vertices, coloured with that face's colour.
///
/// Vertex colours are per vertex, so a face can only get a flat colour if
/// it shares no vertex with a differently coloured face. Face `i` of the
/// result is `[3i, 3i + 1, 3i + 2]`, using the positions of face `i` of the
/// input in winding order. Vertex normals are dropped since the split
/// vertices no longer describe a smooth surface.
///
/// # Errors
///
/// - [`PaintError::ColorCountMismatch`] if `colors` has a different length
///   than `mesh.faces`.
/// - [`PaintError::IndexOutOfRange`] if a face index is invalid.
///
/// # Example
///
/// ```
/// use mesh_paint::explode_with_face_colors;
/// use mesh_types::{unit_cube, VertexColor};
///
/// let cube = unit_cube();
/// let colors = vec![VertexColor::RED; 12];
/// let painted = explode_with_face_colors(&cube, &colors).unwrap();
///
/// assert_eq!(painted.vertices.len(), 36);
/// assert_eq!(painted.faces[4], [12, 13, 14]);
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn explode_with_face_colors(
    mesh: &IndexedMesh,
    colors: &[VertexColor],
) -> PaintResult<IndexedMesh> {
    if colors.len() != mesh.faces.len() {
        return Err(PaintError::ColorCountMismatch {
            colors: colors.len(),
            faces: mesh.faces.len(),
        });
    }

    let mut exploded = IndexedMesh::with_capacity(mesh.faces.len() * 3, mesh.faces.len());
    for (face_idx, (face, &color)) in mesh.faces.iter().zip(colors).enumerate() {
        let base = exploded.vertices.len() as u32;
        for &index in face {
            let vertex = mesh
                .vertices
                .get(index as usize)
                .ok_or(PaintError::IndexOutOfRange {
                    face: face_idx,
                    index,
                })?;
            exploded
                .vertices
                .push(Vertex::with_color(vertex.position, color));
        }
        exploded.faces.push([base, base + 1, base + 2]);
    }

    Ok(exploded)
}
