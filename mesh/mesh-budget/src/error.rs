//! Error types for budget lookup.

use thiserror::Error;

/// Result type for budget operations.
pub type BudgetResult<T> = Result<T, BudgetError>;

/// Errors that can occur when resolving or loading budgets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BudgetError {
    /// The tier name is not one of the known tiers.
    #[error("unknown tier: {tier:?} (expected one of low-poly, indie, aa, aaa, cinematic)")]
    UnknownTier {
        /// The name as given.
        tier: String,
    },

    /// The usage class is unknown, or the table has no entry for it under
    /// the requested tier.
    #[error("unknown usage class: {usage:?} for tier {tier}")]
    UnknownUsageClass {
        /// The resolved tier.
        tier: String,
        /// The usage class as given.
        usage: String,
    },

    /// A budget table could not be parsed or written.
    #[error("budget table serialization error: {0}")]
    Serialization(String),
}

impl BudgetError {
    /// Create an `UnknownTier` error.
    #[must_use]
    pub fn unknown_tier(tier: impl Into<String>) -> Self {
        Self::UnknownTier { tier: tier.into() }
    }

    /// Create an `UnknownUsageClass` error.
    #[must_use]
    pub fn unknown_usage(tier: impl Into<String>, usage: impl Into<String>) -> Self {
        Self::UnknownUsageClass {
            tier: tier.into(),
            usage: usage.into(),
        }
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
