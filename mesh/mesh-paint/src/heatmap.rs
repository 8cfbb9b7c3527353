//! Face-area heatmap.
//!
//! Faces are coloured by how their log-area sits relative to the rest of
//! the mesh. The scale is robust: it is centred on the median log-area and
//! normalised by twice the median absolute deviation, then clamped to
//! `[-1, 1]`. Negative values (small, dense faces) ramp toward
//! [`HeatmapPalette::small`], positive values toward
//! [`HeatmapPalette::large`].

use mesh_types::{IndexedMesh, VertexColor};
use tracing::debug;

use crate::error::PaintResult;
use crate::explode::explode_with_face_colors;
use crate::palette::HeatmapPalette;

/// Added to each area before taking the log so zero-area faces stay finite.
const LOG_AREA_FLOOR: f64 = 1e-12;

/// Added to the deviation so a uniform mesh does not divide by zero.
const MAD_FLOOR: f64 = 1e-6;

/// Colour faces by relative area with the default palette.
///
/// # Errors
///
/// Returns [`crate::PaintError::IndexOutOfRange`] if a face index is invalid.
pub fn paint_area_heatmap(mesh: &IndexedMesh) -> PaintResult<IndexedMesh> {
    paint_area_heatmap_with(mesh, &HeatmapPalette::default())
}

/// Colour faces by relative area.
///
/// The result is exploded so each face carries one flat colour.
///
/// # Errors
///
/// Returns [`crate::PaintError::IndexOutOfRange`] if a face index is invalid.
pub fn paint_area_heatmap_with(
    mesh: &IndexedMesh,
    palette: &HeatmapPalette,
) -> PaintResult<IndexedMesh> {
    let scores = relative_area_scores(mesh);
    let colors: Vec<VertexColor> = scores
        .iter()
        .map(|&d| {
            if d < 0.0 {
                palette.base.blend(palette.small, -d)
            } else {
                palette.base.blend(palette.large, d)
            }
        })
        .collect();

    debug!(faces = colors.len(), "painting area heatmap");
    explode_with_face_colors(mesh, &colors)
}

/// Per-face score in `[-1, 1]`: `(ln(area) - median) / (2 * MAD)`, clamped.
///
/// Faces with invalid indices count as zero-area.
#[must_use]
pub fn relative_area_scores(mesh: &IndexedMesh) -> Vec<f64> {
    let log_areas: Vec<f64> = mesh
        .face_areas()
        .into_iter()
        .map(|area| (area + LOG_AREA_FLOOR).ln())
        .collect();

    let Some(center) = median(&log_areas) else {
        return Vec::new();
    };
    let deviations: Vec<f64> = log_areas.iter().map(|x| (x - center).abs()).collect();
    let mad = median(&deviations).unwrap_or(0.0) + MAD_FLOOR;

    log_areas
        .iter()
        .map(|x| ((x - center) / (2.0 * mad)).clamp(-1.0, 1.0))
        .collect()
}

/// Median, averaging the two middle values for even lengths.
fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some(f64::midpoint(sorted[mid - 1], sorted[mid]))
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{Vertex, unit_cube};

    /// Disjoint right triangles with legs `(a, b)`, so area is `a * b / 2`.
    fn triangles(legs: &[(f64, f64)]) -> IndexedMesh {
        let mut mesh = IndexedMesh::new();
        for (i, &(a, b)) in legs.iter().enumerate() {
            let x = 10.0 * f64::from(u32::try_from(i).unwrap());
            let base = u32::try_from(mesh.vertices.len()).unwrap();
            mesh.vertices.push(Vertex::from_coords(x, 0.0, 0.0));
            mesh.vertices.push(Vertex::from_coords(x + a, 0.0, 0.0));
            mesh.vertices.push(Vertex::from_coords(x, b, 0.0));
            mesh.faces.push([base, base + 1, base + 2]);
        }
        mesh
    }

    fn face_color(mesh: &IndexedMesh, face: usize) -> Option<VertexColor> {
        mesh.vertices[mesh.faces[face][0] as usize].color()
    }

    #[test]
    fn median_matches_midpoint_convention() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn uniform_faces_stay_base_gray() {
        let painted = paint_area_heatmap(&unit_cube()).unwrap();
        let base = HeatmapPalette::default().base;
        assert!(painted.vertices.iter().all(|v| v.color() == Some(base)));
        assert_eq!(painted.faces.len(), 12);
    }

    #[test]
    fn outlier_saturates_to_small_colour() {
        // Areas 1, 1 and 0.01.
        let mesh = triangles(&[(2.0, 1.0), (1.0, 2.0), (0.2, 0.1)]);
        let scores = relative_area_scores(&mesh);
        assert!(scores[0].abs() < 1e-9);
        assert!(scores[1].abs() < 1e-9);
        assert!((scores[2] + 1.0).abs() < 1e-12);

        let painted = paint_area_heatmap(&mesh).unwrap();
        assert_eq!(face_color(&painted, 0), Some(VertexColor::new(180, 180, 180)));
        assert_eq!(face_color(&painted, 2), Some(VertexColor::RED));
    }

    #[test]
    fn two_sizes_split_to_both_ends() {
        // Areas 1 and 4: scores just inside -0.5 and +0.5.
        let mesh = triangles(&[(2.0, 1.0), (4.0, 2.0)]);
        let painted = paint_area_heatmap(&mesh).unwrap();

        assert_eq!(face_color(&painted, 0), Some(VertexColor::new(217, 90, 90)));
        assert_eq!(face_color(&painted, 1), Some(VertexColor::new(90, 122, 217)));
    }

    #[test]
    fn scores_are_clamped() {
        let mesh = triangles(&[(1.0, 1.0), (1.0, 1.0), (1e3, 1e3), (1e-3, 1e-3)]);
        for d in relative_area_scores(&mesh) {
            assert!((-1.0..=1.0).contains(&d));
        }
    }

    #[test]
    fn empty_mesh_paints_nothing() {
        assert!(relative_area_scores(&IndexedMesh::new()).is_empty());
        let painted = paint_area_heatmap(&IndexedMesh::new()).unwrap();
        assert!(painted.faces.is_empty());
    }
}
