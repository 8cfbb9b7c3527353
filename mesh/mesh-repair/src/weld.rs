//! Vertex welding.
//!
//! Coincident vertices are merged into one canonical vertex, faces are
//! remapped, faces that collapse are dropped and the vertex buffer is
//! compacted. Running a weld twice with the same epsilon changes nothing
//! the second time.

use std::fmt;

use hashbrown::HashMap;
use mesh_types::IndexedMesh;
use nalgebra::Point3;
use tracing::debug;

use crate::validate::is_degenerate_face;

/// What a weld pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeldSummary {
    /// Vertices merged into an earlier coincident vertex.
    pub vertices_merged: usize,
    /// Vertices removed because no face referenced them after merging.
    pub unreferenced_removed: usize,
    /// Faces dropped because they repeated a vertex index.
    pub degenerate_faces_dropped: usize,
}

impl WeldSummary {
    /// Whether the weld left the mesh untouched.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.vertices_merged == 0
            && self.unreferenced_removed == 0
            && self.degenerate_faces_dropped == 0
    }
}

impl fmt::Display for WeldSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} merged, {} unreferenced removed, {} degenerate faces dropped",
            self.vertices_merged, self.unreferenced_removed, self.degenerate_faces_dropped
        )
    }
}

/// Weld vertices closer than `epsilon`, then compact the mesh.
///
/// With `epsilon > 0`, vertices are bucketed into a spatial hash with cell
/// size `2 * epsilon` and compared against the 27 surrounding cells. With
/// `epsilon <= 0`, only positions that are exactly equal are merged.
///
/// The lowest-index vertex of each cluster survives and absorbs every
/// surviving vertex within `epsilon` of it. Survivors are therefore at
/// least `epsilon` apart, which is what makes the weld idempotent.
///
/// After merging:
/// - faces are remapped to canonical vertices,
/// - faces with a repeated index are dropped,
/// - vertices no face references are removed, keeping the relative order of
///   the survivors.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex};
/// use mesh_repair::weld_vertices;
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0)); // duplicate of 1
/// mesh.faces.push([0, 1, 2]);
/// mesh.faces.push([0, 2, 3]);
///
/// let summary = weld_vertices(&mut mesh, 1e-8);
/// assert_eq!(summary.vertices_merged, 1);
/// assert_eq!(mesh.vertices.len(), 3);
/// assert_eq!(mesh.faces[1], [0, 2, 1]);
/// ```
pub fn weld_vertices(mesh: &mut IndexedMesh, epsilon: f64) -> WeldSummary {
    let mut summary = WeldSummary::default();
    if mesh.vertices.is_empty() {
        return summary;
    }

    let mut remap = if epsilon > 0.0 {
        merge_within(mesh, epsilon)
    } else {
        merge_exact(mesh)
    };
    summary.vertices_merged = resolve_chains(&mut remap);

    for face in &mut mesh.faces {
        for index in face.iter_mut() {
            *index = remap[*index as usize];
        }
    }

    let face_count = mesh.faces.len();
    mesh.faces.retain(|&face| !is_degenerate_face(face));
    summary.degenerate_faces_dropped = face_count - mesh.faces.len();

    summary.unreferenced_removed = compact_vertices(mesh) - summary.vertices_merged;

    if !summary.is_noop() {
        debug!(
            merged = summary.vertices_merged,
            unreferenced = summary.unreferenced_removed,
            degenerate = summary.degenerate_faces_dropped,
            "welded vertices"
        );
    }

    summary
}

/// Map each vertex to a lower-index vertex within `epsilon`, or itself.
#[allow(clippy::cast_possible_truncation)]
fn merge_within(mesh: &IndexedMesh, epsilon: f64) -> Vec<u32> {
    let cell_size = epsilon * 2.0;

    let mut spatial_hash: HashMap<(i64, i64, i64), Vec<u32>> = HashMap::new();
    for (idx, vertex) in mesh.vertices.iter().enumerate() {
        let cell = pos_to_cell(&vertex.position, cell_size);
        spatial_hash.entry(cell).or_default().push(idx as u32);
    }

    let mut remap: Vec<u32> = (0..mesh.vertices.len() as u32).collect();

    for (idx, vertex) in mesh.vertices.iter().enumerate() {
        let idx = idx as u32;
        if remap[idx as usize] != idx {
            continue;
        }

        let cell = pos_to_cell(&vertex.position, cell_size);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let neighbor = (
                        cell.0.saturating_add(dx),
                        cell.1.saturating_add(dy),
                        cell.2.saturating_add(dz),
                    );
                    let Some(candidates) = spatial_hash.get(&neighbor) else {
                        continue;
                    };
                    for &other in candidates {
                        if other <= idx || remap[other as usize] != other {
                            continue;
                        }
                        let other_pos = &mesh.vertices[other as usize].position;
                        if (vertex.position - other_pos).norm() < epsilon {
                            remap[other as usize] = idx;
                        }
                    }
                }
            }
        }
    }

    remap
}

/// Map each vertex to the first vertex with a bit-identical position.
#[allow(clippy::cast_possible_truncation)]
fn merge_exact(mesh: &IndexedMesh) -> Vec<u32> {
    let mut first_seen: HashMap<[u64; 3], u32> = HashMap::with_capacity(mesh.vertices.len());
    mesh.vertices
        .iter()
        .enumerate()
        .map(|(idx, vertex)| {
            let p = vertex.position;
            let key = [exact_bits(p.x), exact_bits(p.y), exact_bits(p.z)];
            *first_seen.entry(key).or_insert(idx as u32)
        })
        .collect()
}

/// Bit pattern with `-0.0` folded onto `0.0`.
fn exact_bits(value: f64) -> u64 {
    if value == 0.0 { 0 } else { value.to_bits() }
}

/// Follow merge chains to their root. Returns how many vertices moved.
fn resolve_chains(remap: &mut [u32]) -> usize {
    let mut merged = 0;
    for i in 0..remap.len() {
        let mut target = remap[i];
        while remap[target as usize] != target {
            target = remap[target as usize];
        }
        remap[i] = target;
        if target as usize != i {
            merged += 1;
        }
    }
    merged
}

/// Drop unreferenced vertices. Returns how many were removed, merged
/// vertices included.
#[allow(clippy::cast_possible_truncation)]
fn compact_vertices(mesh: &mut IndexedMesh) -> usize {
    let mut referenced = vec![false; mesh.vertices.len()];
    for face in &mesh.faces {
        for &index in face {
            referenced[index as usize] = true;
        }
    }

    let mut new_index = vec![u32::MAX; mesh.vertices.len()];
    let mut kept = Vec::with_capacity(mesh.vertices.len());
    for (old, vertex) in mesh.vertices.iter().enumerate() {
        if referenced[old] {
            new_index[old] = kept.len() as u32;
            kept.push(vertex.clone());
        }
    }

    for face in &mut mesh.faces {
        for index in face.iter_mut() {
            *index = new_index[*index as usize];
        }
    }

    let removed = mesh.vertices.len() - kept.len();
    mesh.vertices = kept;
    removed
}

/// Grid cell of a position. Cells saturate at the `i64` range for
/// coordinates far from the origin relative to `cell_size`.
#[allow(clippy::cast_possible_truncation)]
fn pos_to_cell(pos: &Point3<f64>, cell_size: f64) -> (i64, i64, i64) {
    (
        (pos.x / cell_size).floor() as i64,
        (pos.y / cell_size).floor() as i64,
        (pos.z / cell_size).floor() as i64,
    )
}
