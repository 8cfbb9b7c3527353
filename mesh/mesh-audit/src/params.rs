//! Audit configuration.

use mesh_budget::DEFAULT_AREA_EPSILON;
use mesh_repair::OrientParams;
use serde::{Deserialize, Serialize};

use crate::error::{AuditError, AuditResult};

/// Thresholds for one audit run.
///
/// Every field has a default, so a JSON file only needs the values it
/// changes.
///
/// # Example
///
/// ```
/// use mesh_audit::AuditParams;
///
/// let params: AuditParams = serde_json::from_str(r#"{"weld_epsilon": 1e-5}"#).unwrap();
/// assert_eq!(params.weld_epsilon, 1e-5);
/// assert_eq!(params.flip_dot_threshold, -0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditParams {
    /// Weld distance for orientation repair. Default: `1e-8`
    pub weld_epsilon: f64,

    /// Dot product below which a face counts as inverted. Default: `-0.5`
    pub flip_dot_threshold: f64,

    /// Surface area at or below which density is infinite. Default: `1e-12`
    pub area_epsilon: f64,

    /// Refuse meshes with more faces than this. Default: no limit
    pub max_faces_ceiling: Option<usize>,
}

impl Default for AuditParams {
    fn default() -> Self {
        let orient = OrientParams::default();
        Self {
            weld_epsilon: orient.weld_epsilon,
            flip_dot_threshold: orient.flip_dot_threshold,
            area_epsilon: DEFAULT_AREA_EPSILON,
            max_faces_ceiling: None,
        }
    }
}

impl AuditParams {
    /// Params for scanned or exported meshes with loose seams.
    #[must_use]
    pub fn for_scans() -> Self {
        Self::default().with_weld_epsilon(OrientParams::for_scans().weld_epsilon)
    }

    /// Params that never merge distinct positions.
    #[must_use]
    pub fn exact() -> Self {
        Self::default().with_weld_epsilon(0.0)
    }

    /// Set the weld distance.
    #[must_use]
    pub const fn with_weld_epsilon(mut self, epsilon: f64) -> Self {
        self.weld_epsilon = epsilon;
        self
    }

    /// Set the inversion threshold.
    #[must_use]
    pub const fn with_flip_dot_threshold(mut self, threshold: f64) -> Self {
        self.flip_dot_threshold = threshold;
        self
    }

    /// Set the zero-area cutoff for density.
    #[must_use]
    pub const fn with_area_epsilon(mut self, epsilon: f64) -> Self {
        self.area_epsilon = epsilon;
        self
    }

    /// Set the largest face count the audit will process.
    #[must_use]
    pub const fn with_max_faces_ceiling(mut self, ceiling: usize) -> Self {
        self.max_faces_ceiling = Some(ceiling);
        self
    }

    /// The orientation repair part of these params.
    #[must_use]
    pub const fn orient_params(&self) -> OrientParams {
        OrientParams {
            weld_epsilon: self.weld_epsilon,
            flip_dot_threshold: self.flip_dot_threshold,
        }
    }

    /// Check that the params are usable.
    ///
    /// # Errors
    ///
    /// - [`AuditError::Repair`] if the weld or flip settings are invalid.
    /// - [`AuditError::InvalidParams`] if `area_epsilon` is negative or not
    ///   finite.
    pub fn validate(&self) -> AuditResult<()> {
        self.orient_params().validate()?;
        if !self.area_epsilon.is_finite() || self.area_epsilon < 0.0 {
            return Err(AuditError::invalid_params(format!(
                "area_epsilon must be finite and non-negative, got {}",
                self.area_epsilon
            )));
        }
        Ok(())
    }
}
