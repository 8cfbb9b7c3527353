//! Outcome of checking metrics against a budget.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether each budget limit was met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetVerdict {
    /// Face count is at most the budget's maximum.
    pub faces_within_budget: bool,
    /// Density is at most the budget's maximum.
    pub density_within_budget: bool,
}

impl BudgetVerdict {
    /// Both limits met.
    #[must_use]
    pub const fn is_within_budget(&self) -> bool {
        self.faces_within_budget && self.density_within_budget
    }
}

impl fmt::Display for BudgetVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |ok: bool| if ok { "ok" } else { "over" };
        write!(
            f,
            "faces {}, density {}",
            mark(self.faces_within_budget),
            mark(self.density_within_budget)
        )
    }
}
