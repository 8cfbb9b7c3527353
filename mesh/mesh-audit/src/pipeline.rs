//! Load, flatten, measure, repair and report.

use std::path::Path;

use mesh_budget::{Budget, BudgetTable, MeshMetrics, compute_metrics};
use mesh_io::load_asset;
use mesh_paint::{FacePalette, paint_area_heatmap, paint_inversions, paint_uniform};
use mesh_repair::{OrientationReport, repair_orientation};
use mesh_scene::{RawAsset, flatten};
use mesh_types::{IndexedMesh, MeshTopology};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AuditError, AuditResult};
use crate::params::AuditParams;
use crate::report::AuditReport;

/// Everything an audit produced.
///
/// `metrics` describe the mesh as loaded. `repaired` is the welded and
/// consistently wound mesh, and `inverted` flags its faces one to one.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    /// Caller-facing summary.
    pub report: AuditReport,
    /// Size metrics of the flattened input.
    pub metrics: MeshMetrics,
    /// Counters from orientation repair.
    pub orientation: OrientationReport,
    /// The repaired mesh.
    pub repaired: IndexedMesh,
    /// Per-face inversion flags for `repaired`.
    pub inverted: Vec<bool>,
}

/// Serializable view of an [`AuditOutcome`] without the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    /// Caller-facing summary.
    pub report: AuditReport,
    /// Size metrics of the flattened input.
    pub metrics: MeshMetrics,
    /// Counters from orientation repair.
    pub orientation: OrientationReport,
}

/// How to colour the audited mesh for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintMode {
    /// Inverted faces in the alert colour, the rest neutral.
    #[default]
    Inversions,
    /// Faces ramped by relative area.
    AreaHeatmap,
    /// Every face in the palette's alert colour.
    Uniform,
}

impl AuditOutcome {
    /// Counters and report, without the mesh.
    #[must_use]
    pub const fn summary(&self) -> AuditSummary {
        AuditSummary {
            report: self.report,
            metrics: self.metrics,
            orientation: self.orientation,
        }
    }

    /// Paint the repaired mesh.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Paint`] if painting fails, which only happens
    /// for a mesh that was modified after the audit.
    pub fn paint(&self, mode: PaintMode, palette: &FacePalette) -> AuditResult<IndexedMesh> {
        let painted = match mode {
            PaintMode::Inversions => paint_inversions(&self.repaired, &self.inverted, palette)?,
            PaintMode::AreaHeatmap => paint_area_heatmap(&self.repaired)?,
            PaintMode::Uniform => paint_uniform(&self.repaired, palette.alert),
        };
        Ok(painted)
    }
}

/// Audit a mesh against one budget.
///
/// Metrics are taken from `mesh` as given; inversion flags come from
/// repairing a copy of it.
///
/// # Errors
///
/// - [`AuditError::Repair`] or [`AuditError::InvalidParams`] for bad params.
/// - [`AuditError::FaceCeilingExceeded`] if the mesh is over
///   [`AuditParams::max_faces_ceiling`].
/// - [`AuditError::Repair`] if the mesh has out-of-range indices.
///
/// # Example
///
/// ```
/// use mesh_audit::{audit_mesh, AuditParams};
/// use mesh_budget::Budget;
/// use mesh_types::unit_cube;
///
/// let outcome = audit_mesh(&unit_cube(), &Budget::new(150, 250.0), &AuditParams::default()).unwrap();
/// assert!(outcome.report.is_within_budget());
/// assert_eq!(outcome.report.inverted_face_count, 0);
/// ```
pub fn audit_mesh(
    mesh: &IndexedMesh,
    budget: &Budget,
    params: &AuditParams,
) -> AuditResult<AuditOutcome> {
    params.validate()?;
    if let Some(ceiling) = params.max_faces_ceiling {
        let faces = mesh.face_count();
        if faces > ceiling {
            return Err(AuditError::FaceCeilingExceeded { faces, ceiling });
        }
    }

    let metrics = compute_metrics(mesh, params.area_epsilon);
    let repair = repair_orientation(mesh, &params.orient_params())?;
    let report = AuditReport::new(&metrics, budget, repair.inverted_count());

    info!(
        faces = report.face_count,
        density = report.density,
        within_budget = report.is_within_budget(),
        inverted = report.inverted_face_count,
        degenerate = metrics.degenerate_faces,
        "audit complete"
    );

    Ok(AuditOutcome {
        report,
        metrics,
        orientation: repair.report,
        repaired: repair.mesh,
        inverted: repair.inverted,
    })
}

/// Look up the budget, flatten the asset and audit it.
///
/// The budget is resolved before any geometry work, so an unknown tier or
/// usage class fails fast.
///
/// # Errors
///
/// - [`AuditError::Budget`] for an unknown tier or usage class.
/// - [`AuditError::Scene`] if the asset cannot be flattened.
/// - Anything [`audit_mesh`] returns.
pub fn audit_asset(
    asset: RawAsset,
    table: &BudgetTable,
    tier: &str,
    usage: &str,
    params: &AuditParams,
) -> AuditResult<AuditOutcome> {
    let budget = table.lookup(tier, usage)?;
    audit_flattened(asset, &budget, params)
}

/// Load a file and audit it.
///
/// # Errors
///
/// - [`AuditError::Budget`] for an unknown tier or usage class.
/// - [`AuditError::Io`] if the file cannot be loaded.
/// - Anything [`audit_asset`] returns.
pub fn audit_file<P: AsRef<Path>>(
    path: P,
    table: &BudgetTable,
    tier: &str,
    usage: &str,
    params: &AuditParams,
) -> AuditResult<AuditOutcome> {
    let budget = table.lookup(tier, usage)?;
    let asset = load_asset(path)?;
    audit_flattened(asset, &budget, params)
}

fn audit_flattened(
    asset: RawAsset,
    budget: &Budget,
    params: &AuditParams,
) -> AuditResult<AuditOutcome> {
    debug!(kind = asset.kind(), "flattening asset");
    let mesh = flatten(asset)?;
    audit_mesh(&mesh, budget, params)
}
