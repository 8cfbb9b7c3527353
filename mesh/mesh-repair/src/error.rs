//! Error types for orientation repair.

use thiserror::Error;

/// Result type for repair operations.
pub type RepairResult<T> = Result<T, RepairError>;

/// Errors that can occur during orientation repair.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepairError {
    /// The mesh topology is invalid and cannot be repaired.
    #[error("malformed mesh: {0}")]
    MalformedMesh(#[from] Malformation),

    /// Repair parameters are out of their valid range.
    #[error("invalid repair parameter: {reason}")]
    InvalidParams {
        /// What was wrong.
        reason: String,
    },
}

/// The specific way a mesh is malformed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Malformation {
    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} (mesh has {vertex_count} vertices)")]
    IndexOutOfRange {
        /// Face holding the bad index.
        face: usize,
        /// The invalid index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Flat index data does not divide into triangles.
    #[error("{index_count} indices do not form triangles")]
    NonTriangular {
        /// Number of indices supplied.
        index_count: usize,
    },

    /// Flat position data does not divide into xyz triples.
    #[error("{value_count} position values do not form xyz triples")]
    PositionCount {
        /// Number of values supplied.
        value_count: usize,
    },

    /// A face references a vertex with a NaN or infinite coordinate.
    #[error("vertex {vertex} has a non-finite coordinate")]
    NonFinitePosition {
        /// The offending vertex.
        vertex: u32,
    },
}

impl RepairError {
    /// Create an `InvalidParams` error.
    #[must_use]
    pub fn invalid_params(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }

    /// Whether this error reports malformed input topology.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedMesh(_))
    }
}
