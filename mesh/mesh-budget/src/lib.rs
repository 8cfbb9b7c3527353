//! Mesh size metrics and production budgets.
//!
//! [`compute_metrics`] measures face count, surface area and face density.
//! A [`BudgetTable`] maps a production [`Tier`] and [`UsageClass`] to a
//! [`Budget`]; [`Budget::evaluate`] turns metrics into a [`BudgetVerdict`].
//!
//! Tables are plain data: use [`BudgetTable::standard`] or load one from
//! JSON with [`BudgetTable::from_json`].
//!
//! # Example
//!
//! ```
//! use mesh_budget::{BudgetTable, MeshMetrics};
//! use mesh_types::unit_cube;
//!
//! let metrics = MeshMetrics::of(&unit_cube());
//! let budget = BudgetTable::standard().lookup("low-poly", "background").unwrap();
//!
//! let verdict = budget.evaluate(&metrics);
//! assert!(verdict.is_within_budget());
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod metrics;
mod table;
mod verdict;

pub use error::{BudgetError, BudgetResult};
pub use metrics::{DEFAULT_AREA_EPSILON, MeshMetrics, compute_metrics, density_serde};
pub use table::{Budget, BudgetTable, Tier, UsageClass};
pub use verdict::BudgetVerdict;
