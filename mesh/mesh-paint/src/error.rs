//! Error types for recoloring.

use thiserror::Error;

/// Result type for paint operations.
pub type PaintResult<T> = Result<T, PaintError>;

/// Errors that can occur while recoloring a mesh.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaintError {
    /// The inversion flags do not match the mesh's faces one to one.
    #[error("got {flags} inversion flags for {faces} faces")]
    FlagCountMismatch {
        /// Number of flags supplied.
        flags: usize,
        /// Number of faces in the mesh.
        faces: usize,
    },

    /// The per-face colours do not match the mesh's faces one to one.
    #[error("got {colors} face colours for {faces} faces")]
    ColorCountMismatch {
        /// Number of colours supplied.
        colors: usize,
        /// Number of faces in the mesh.
        faces: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("face {face} references missing vertex {index}")]
    IndexOutOfRange {
        /// Face holding the bad index.
        face: usize,
        /// The invalid index.
        index: u32,
    },
}
