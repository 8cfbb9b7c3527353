//! Winding-independent face identity.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order-independent identifier of a face's vertex set.
///
/// The key is the three vertex indices sorted ascending. It depends only on
/// which vertices a face uses, never on their order, so reversing a face's
/// winding leaves its key unchanged. This is what lets a face be matched
/// across a before/after orientation repair.
///
/// # Example
///
/// ```
/// use mesh_types::FaceKey;
///
/// let key = FaceKey::from_face([7, 2, 5]);
/// assert_eq!(key.indices(), [2, 5, 7]);
///
/// // Reversed winding, same key
/// assert_eq!(FaceKey::from_face([7, 5, 2]), key);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceKey([u32; 3]);

impl FaceKey {
    /// Build the key for a face given as vertex indices.
    #[inline]
    #[must_use]
    pub fn from_face(face: [u32; 3]) -> Self {
        let mut sorted = face;
        sorted.sort_unstable();
        Self(sorted)
    }

    /// The sorted vertex indices.
    #[inline]
    #[must_use]
    pub const fn indices(self) -> [u32; 3] {
        self.0
    }

    /// Whether the face repeats a vertex index, so has no well-defined
    /// normal.
    #[inline]
    #[must_use]
    pub const fn is_degenerate(self) -> bool {
        self.0[0] == self.0[1] || self.0[1] == self.0[2]
    }
}

impl From<[u32; 3]> for FaceKey {
    fn from(face: [u32; 3]) -> Self {
        Self::from_face(face)
    }
}

impl fmt::Display for FaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0[0], self.0[1], self.0[2])
    }
}
