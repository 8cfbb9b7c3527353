//! Consistent winding across connected components.

use std::collections::VecDeque;

use tracing::debug;

use crate::adjacency::{FaceAdjacency, traverses};

/// Result of winding propagation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindingOutcome {
    /// Connected components as face lists, each starting at its
    /// lowest-index face and listed in visit order.
    pub components: Vec<Vec<usize>>,
    /// Faces whose winding was reversed.
    pub faces_reversed: usize,
    /// Authoritative edges still traversed in the same direction by both
    /// faces after propagation. Non-zero only for non-orientable input.
    pub conflicting_edges: usize,
}

/// Make winding consistent within each connected component.
///
/// Components are discovered from the lowest-index unvisited face and
/// walked breadth-first across authoritative edges. The face being walked
/// from is taken as correct: a neighbour that traverses the shared edge in
/// the same direction is reversed (indices 1 and 2 swapped) before the walk
/// continues from it.
///
/// Component order, and therefore the final winding, depends only on face
/// order.
///
/// # Example
///
/// ```
/// use mesh_repair::{propagate_winding, FaceAdjacency};
///
/// let mut faces = vec![[0, 1, 2], [0, 1, 3]];
/// let adjacency = FaceAdjacency::build(&faces);
/// let outcome = propagate_winding(&mut faces, &adjacency);
///
/// assert_eq!(outcome.faces_reversed, 1);
/// assert_eq!(faces[1], [0, 3, 1]);
/// ```
pub fn propagate_winding(faces: &mut [[u32; 3]], adjacency: &FaceAdjacency) -> WindingOutcome {
    let mut outcome = WindingOutcome::default();
    let mut visited = vec![false; faces.len()];
    let mut queue = VecDeque::new();

    for start in 0..faces.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        queue.push_back(start);
        let mut component = Vec::new();

        while let Some(face_idx) = queue.pop_front() {
            component.push(face_idx);
            let face = faces[face_idx];

            for neighbor in adjacency.neighbors(face_idx) {
                if visited[neighbor.face] {
                    continue;
                }
                visited[neighbor.face] = true;

                let (a, b) = neighbor.edge;
                let (from, to) = if traverses(face, a, b) { (a, b) } else { (b, a) };
                if traverses(faces[neighbor.face], from, to) {
                    faces[neighbor.face].swap(1, 2);
                    outcome.faces_reversed += 1;
                }
                queue.push_back(neighbor.face);
            }
        }

        outcome.components.push(component);
    }

    outcome.conflicting_edges = count_conflicts(faces, adjacency);

    debug!(
        components = outcome.components.len(),
        reversed = outcome.faces_reversed,
        conflicts = outcome.conflicting_edges,
        "propagated winding"
    );

    outcome
}

/// Count authoritative edges whose two faces agree on direction.
fn count_conflicts(faces: &[[u32; 3]], adjacency: &FaceAdjacency) -> usize {
    adjacency
        .edges()
        .filter_map(|(edge, _)| Some((edge, adjacency.authoritative_pair(edge)?)))
        .filter(|&((v0, v1), (a, b))| {
            traverses(faces[a], v0, v1) == traverses(faces[b], v0, v1)
        })
        .count()
}
