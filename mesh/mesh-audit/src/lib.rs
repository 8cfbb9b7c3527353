//! Polygon budget and orientation audit for game assets.
//!
//! An audit loads an asset, flattens it to one mesh, measures it against a
//! platform/usage budget and repairs face winding so inverted faces can be
//! counted and painted.
//!
//! # Example
//!
//! ```
//! use mesh_audit::{audit_asset, AuditParams};
//! use mesh_budget::BudgetTable;
//! use mesh_scene::RawAsset;
//! use mesh_types::unit_cube;
//!
//! let outcome = audit_asset(
//!     RawAsset::Mesh(unit_cube()),
//!     &BudgetTable::standard(),
//!     "Low-Poly",
//!     "background",
//!     &AuditParams::default(),
//! )
//! .unwrap();
//! println!("{}", outcome.report);
//! ```
//!
//! # Pipeline
//!
//! 1. Resolve the budget ([`mesh_budget::BudgetTable::lookup`])
//! 2. Load ([`mesh_io::load_asset`]) and flatten ([`mesh_scene::flatten`])
//! 3. Measure the flattened mesh ([`mesh_budget::compute_metrics`])
//! 4. Repair orientation ([`mesh_repair::repair_orientation`])
//! 5. Report, and optionally paint ([`AuditOutcome::paint`])

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod params;
mod pipeline;
mod report;

pub use error::{AuditError, AuditResult};
pub use params::AuditParams;
pub use pipeline::{AuditOutcome, AuditSummary, PaintMode, audit_asset, audit_file, audit_mesh};
pub use report::AuditReport;
