//! Error types for scene flattening.

use thiserror::Error;

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur while flattening a loaded asset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The asset is a scene with no sub-geometries.
    #[error("scene contains no geometry")]
    EmptyScene,

    /// The asset holds nothing that can be turned into a triangle mesh.
    #[error("unsupported asset: {kind}")]
    UnsupportedFormat {
        /// What the asset turned out to be.
        kind: String,
    },

    /// A scene already holds a geometry under this name.
    #[error("duplicate geometry name: {name}")]
    DuplicateName {
        /// The conflicting name.
        name: String,
    },
}

impl SceneError {
    /// Create an `UnsupportedFormat` error describing the asset.
    #[must_use]
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::UnsupportedFormat { kind: kind.into() }
    }
}
