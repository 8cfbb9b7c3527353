//! Error types for the audit pipeline.

use mesh_budget::BudgetError;
use mesh_io::IoError;
use mesh_paint::PaintError;
use mesh_repair::RepairError;
use mesh_scene::SceneError;
use thiserror::Error;

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;

/// Errors that can stop an audit.
///
/// Every stage's error is wrapped unchanged, so callers can match on the
/// stage that failed.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The asset could not be read.
    #[error(transparent)]
    Io(#[from] IoError),

    /// The asset could not be flattened into one mesh.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// The tier or usage class is not in the budget table.
    #[error(transparent)]
    Budget(#[from] BudgetError),

    /// Orientation repair rejected the mesh or its parameters.
    #[error(transparent)]
    Repair(#[from] RepairError),

    /// The repaired mesh could not be painted.
    #[error(transparent)]
    Paint(#[from] PaintError),

    /// Audit parameters are out of their valid range.
    #[error("invalid audit parameter: {reason}")]
    InvalidParams {
        /// What was wrong.
        reason: String,
    },

    /// The mesh has more faces than the caller is willing to process.
    #[error("mesh has {faces} faces, above the ceiling of {ceiling}")]
    FaceCeilingExceeded {
        /// Faces in the flattened mesh.
        faces: usize,
        /// Configured ceiling.
        ceiling: usize,
    },
}

impl AuditError {
    /// Create an `InvalidParams` error.
    #[must_use]
    pub fn invalid_params(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}
