//! Inversion highlights and uniform tints.

use mesh_types::{IndexedMesh, VertexColor};
use tracing::debug;

use crate::error::{PaintError, PaintResult};
use crate::explode::explode_with_face_colors;
use crate::palette::FacePalette;

/// Paint flagged faces with the alert colour and the rest neutral.
///
/// The result is exploded: every face has its own three vertices, so one
/// red face never bleeds into its neighbours.
///
/// # Errors
///
/// - [`PaintError::FlagCountMismatch`] if `flags` does not have one entry
///   per face.
/// - [`PaintError::IndexOutOfRange`] if a face index is invalid.
///
/// # Example
///
/// ```
/// use mesh_paint::{paint_inversions, FacePalette};
/// use mesh_types::{unit_cube, VertexColor};
///
/// let cube = unit_cube();
/// let mut flags = vec![false; 12];
/// flags[3] = true;
///
/// let painted = paint_inversions(&cube, &flags, &FacePalette::default()).unwrap();
/// assert_eq!(painted.vertices[9].color(), Some(VertexColor::RED));
/// ```
pub fn paint_inversions(
    mesh: &IndexedMesh,
    flags: &[bool],
    palette: &FacePalette,
) -> PaintResult<IndexedMesh> {
    if flags.len() != mesh.faces.len() {
        return Err(PaintError::FlagCountMismatch {
            flags: flags.len(),
            faces: mesh.faces.len(),
        });
    }

    let colors: Vec<VertexColor> = flags.iter().map(|&flag| palette.pick(flag)).collect();
    let flagged = flags.iter().filter(|&&flag| flag).count();
    debug!(faces = flags.len(), flagged, "painting inversions");

    explode_with_face_colors(mesh, &colors)
}

/// Tint every vertex with one colour.
///
/// Topology is untouched, since a uniform colour needs no vertex splitting.
#[must_use]
pub fn paint_uniform(mesh: &IndexedMesh, color: VertexColor) -> IndexedMesh {
    let mut painted = mesh.clone();
    for vertex in &mut painted.vertices {
        vertex.attributes.color = Some(color);
    }
    painted
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{MeshTopology, unit_cube};

    #[test]
    fn only_flagged_faces_are_alert_coloured() {
        let cube = unit_cube();
        let flags: Vec<bool> = (0..12).map(|i| i % 5 == 0).collect();
        let painted = paint_inversions(&cube, &flags, &FacePalette::default()).unwrap();

        assert_eq!(painted.face_count(), 12);
        for (i, face) in painted.faces.iter().enumerate() {
            let expected = if flags[i] {
                VertexColor::RED
            } else {
                VertexColor::new(220, 220, 220)
            };
            for &v in face {
                assert_eq!(painted.vertices[v as usize].color(), Some(expected));
            }
        }
    }

    #[test]
    fn no_flags_paints_everything_neutral() {
        let palette = FacePalette::default();
        let painted = paint_inversions(&unit_cube(), &[false; 12], &palette).unwrap();
        assert!(
            painted
                .vertices
                .iter()
                .all(|v| v.color() == Some(palette.neutral))
        );
    }

    #[test]
    fn flag_count_must_match() {
        let err = paint_inversions(&unit_cube(), &[true; 11], &FacePalette::default()).unwrap_err();
        assert_eq!(
            err,
            PaintError::FlagCountMismatch {
                flags: 11,
                faces: 12
            }
        );
    }

    #[test]
    fn uniform_tint_keeps_topology() {
        let cube = unit_cube();
        let painted = paint_uniform(&cube, VertexColor::RED);

        assert_eq!(painted.faces, cube.faces);
        assert_eq!(painted.vertex_count(), cube.vertex_count());
        assert!(painted.vertices.iter().all(|v| v.color() == Some(VertexColor::RED)));
        for (before, after) in cube.vertices.iter().zip(&painted.vertices) {
            assert_eq!(before.position, after.position);
        }
    }
}
