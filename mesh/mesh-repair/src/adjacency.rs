//! Edge adjacency between faces.
//!
//! Edges are keyed by their unordered vertex pair. Every face that uses an
//! edge is recorded, but only the first two (in face order) form the
//! authoritative pair that winding propagation walks across. Faces on an
//! edge with more than two users are unresolved: their orientation
//! relative to the extra faces is undefined.

use hashbrown::HashMap;

/// An edge as an unordered vertex pair, stored with the smaller index first.
pub type EdgeKey = (u32, u32);

/// A face reachable across an authoritative shared edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Index of the neighbouring face.
    pub face: usize,
    /// The shared edge.
    pub edge: EdgeKey,
}

/// Face adjacency for a triangle list.
#[derive(Debug, Clone)]
pub struct FaceAdjacency {
    edge_to_faces: HashMap<EdgeKey, Vec<usize>>,
    neighbors: Vec<Vec<Neighbor>>,
}

impl FaceAdjacency {
    /// Build adjacency from faces.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_repair::FaceAdjacency;
    ///
    /// let faces = vec![[0, 1, 2], [1, 3, 2]];
    /// let adj = FaceAdjacency::build(&faces);
    ///
    /// assert_eq!(adj.edge_count(), 5);
    /// assert_eq!(adj.neighbors(0)[0].face, 1);
    /// ```
    #[must_use]
    pub fn build(faces: &[[u32; 3]]) -> Self {
        let mut edge_to_faces: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
        for (face_idx, face) in faces.iter().enumerate() {
            for edge in face_edges(*face) {
                edge_to_faces.entry(edge).or_default().push(face_idx);
            }
        }

        let neighbors = faces
            .iter()
            .enumerate()
            .map(|(face_idx, face)| {
                face_edges(*face)
                    .into_iter()
                    .filter_map(|edge| {
                        let users = edge_to_faces.get(&edge)?;
                        let other = match users.as_slice() {
                            [a, b, ..] if *a == face_idx => *b,
                            [a, b, ..] if *b == face_idx => *a,
                            _ => return None,
                        };
                        Some(Neighbor { face: other, edge })
                    })
                    .collect()
            })
            .collect();

        Self {
            edge_to_faces,
            neighbors,
        }
    }

    /// Number of faces this adjacency was built from.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Faces reachable from `face` across authoritative edges, in the
    /// face's edge order. Empty for an unknown face.
    #[must_use]
    pub fn neighbors(&self, face: usize) -> &[Neighbor] {
        self.neighbors.get(face).map_or(&[], Vec::as_slice)
    }

    /// All faces using an edge, in face order.
    #[must_use]
    pub fn faces_for_edge(&self, v0: u32, v1: u32) -> Option<&[usize]> {
        self.edge_to_faces
            .get(&normalize_edge(v0, v1))
            .map(Vec::as_slice)
    }

    /// The authoritative face pair of an edge, if it has at least two faces.
    #[must_use]
    pub fn authoritative_pair(&self, edge: EdgeKey) -> Option<(usize, usize)> {
        match self.edge_to_faces.get(&edge)?.as_slice() {
            [a, b, ..] => Some((*a, *b)),
            _ => None,
        }
    }

    /// Iterate over every edge with its faces.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &[usize])> {
        self.edge_to_faces
            .iter()
            .map(|(&edge, faces)| (edge, faces.as_slice()))
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_to_faces.len()
    }

    /// Number of edges used by more than two faces.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edge_to_faces
            .values()
            .filter(|faces| faces.len() > 2)
            .count()
    }

    /// Faces touching a non-manifold edge, sorted and deduplicated.
    #[must_use]
    pub fn unresolved_faces(&self) -> Vec<usize> {
        let mut faces: Vec<usize> = self
            .edge_to_faces
            .values()
            .filter(|faces| faces.len() > 2)
            .flatten()
            .copied()
            .collect();
        faces.sort_unstable();
        faces.dedup();
        faces
    }

    /// Whether every edge is shared by exactly two faces.
    #[must_use]
    pub fn is_closed_manifold(&self) -> bool {
        self.edge_to_faces.values().all(|faces| faces.len() == 2)
    }
}

/// The three edges of a face, normalized.
#[inline]
#[must_use]
pub fn face_edges(face: [u32; 3]) -> [EdgeKey; 3] {
    [
        normalize_edge(face[0], face[1]),
        normalize_edge(face[1], face[2]),
        normalize_edge(face[2], face[0]),
    ]
}

/// Order an edge so the smaller index comes first.
#[inline]
#[must_use]
pub const fn normalize_edge(v0: u32, v1: u32) -> EdgeKey {
    if v0 < v1 { (v0, v1) } else { (v1, v0) }
}

/// Whether `face` traverses the edge `from -> to` in its winding order.
#[inline]
#[must_use]
pub fn traverses(face: [u32; 3], from: u32, to: u32) -> bool {
    (0..3).any(|i| face[i] == from && face[(i + 1) % 3] == to)
}
