//! Pre-repair normal snapshot and the before/after diff.

use hashbrown::HashMap;
use mesh_types::{FaceKey, IndexedMesh};
use nalgebra::Vector3;

/// Face normals recorded before repair, keyed by [`FaceKey`].
///
/// Keys ignore winding, so a face can be found again after propagation has
/// reversed it. Faces that share a key (duplicated triangles) keep their
/// normals in face order and are matched by occurrence.
#[derive(Debug, Clone, Default)]
pub struct NormalSnapshot {
    normals: HashMap<FaceKey, Vec<Vector3<f64>>>,
}

impl NormalSnapshot {
    /// Record the unit normal of every face.
    #[must_use]
    pub fn capture(mesh: &IndexedMesh) -> Self {
        let mut normals: HashMap<FaceKey, Vec<Vector3<f64>>> =
            HashMap::with_capacity(mesh.faces.len());
        for (face_idx, face) in mesh.faces.iter().enumerate() {
            normals
                .entry(FaceKey::from_face(*face))
                .or_default()
                .push(mesh.face_normal(face_idx));
        }
        Self { normals }
    }

    /// Number of distinct face keys recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.normals.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.normals.is_empty()
    }

    /// The recorded normals for a key, in face order.
    #[must_use]
    pub fn normals(&self, key: FaceKey) -> &[Vector3<f64>] {
        self.normals.get(&key).map_or(&[], Vec::as_slice)
    }

    /// Flag faces of `after` whose normal turned against the recorded one.
    ///
    /// Returns one flag per face of `after`. A face is flagged when the dot
    /// product of its current unit normal with the recorded normal is below
    /// `threshold`. Faces with no recorded counterpart are never flagged,
    /// and zero-area faces have a zero normal so they never pass a negative
    /// threshold.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_repair::NormalSnapshot;
    /// use mesh_types::unit_cube;
    ///
    /// let mut cube = unit_cube();
    /// let snapshot = NormalSnapshot::capture(&cube);
    /// cube.flip_face(4);
    ///
    /// let flags = snapshot.diff(&cube, -0.5);
    /// assert_eq!(flags.iter().filter(|&&f| f).count(), 1);
    /// assert!(flags[4]);
    /// ```
    #[must_use]
    pub fn diff(&self, after: &IndexedMesh, threshold: f64) -> Vec<bool> {
        let mut seen: HashMap<FaceKey, usize> = HashMap::new();
        after
            .faces
            .iter()
            .enumerate()
            .map(|(face_idx, face)| {
                let key = FaceKey::from_face(*face);
                let occurrence = seen.entry(key).or_insert(0);
                let before = self.normals(key).get(*occurrence);
                *occurrence += 1;
                before.is_some_and(|n| n.dot(&after.face_normal(face_idx)) < threshold)
            })
            .collect()
    }
}
