//! The audit result handed back to callers.

use std::fmt;

use mesh_budget::{Budget, BudgetVerdict, MeshMetrics, density_serde};
use serde::{Deserialize, Serialize};

/// Outcome of a budget audit with an inversion count.
///
/// Plain data: no references into the mesh, safe to store or send. Infinite
/// densities serialize as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Faces in the flattened asset.
    pub face_count: usize,
    /// Faces per unit surface area.
    #[serde(with = "density_serde")]
    pub density: f64,
    /// Face limit for the requested tier and usage class.
    pub max_faces: usize,
    /// Density limit for the requested tier and usage class.
    #[serde(with = "density_serde")]
    pub max_density: f64,
    /// `face_count <= max_faces`.
    pub faces_within_budget: bool,
    /// `density <= max_density`.
    pub density_within_budget: bool,
    /// Faces whose winding repair turned them around.
    pub inverted_face_count: usize,
}

impl AuditReport {
    /// Assemble a report from its parts.
    #[must_use]
    pub fn new(metrics: &MeshMetrics, budget: &Budget, inverted_face_count: usize) -> Self {
        let verdict = budget.evaluate(metrics);
        Self {
            face_count: metrics.face_count,
            density: metrics.density,
            max_faces: budget.max_faces,
            max_density: budget.max_density,
            faces_within_budget: verdict.faces_within_budget,
            density_within_budget: verdict.density_within_budget,
            inverted_face_count,
        }
    }

    /// The two budget checks.
    #[must_use]
    pub const fn verdict(&self) -> BudgetVerdict {
        BudgetVerdict {
            faces_within_budget: self.faces_within_budget,
            density_within_budget: self.density_within_budget,
        }
    }

    /// Whether both budget checks pass.
    #[must_use]
    pub const fn is_within_budget(&self) -> bool {
        self.faces_within_budget && self.density_within_budget
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} faces (max {}), density {:.3} (max {:.3}): {}; {} inverted",
            self.face_count,
            self.max_faces,
            self.density,
            self.max_density,
            self.verdict(),
            self.inverted_face_count
        )
    }
}
