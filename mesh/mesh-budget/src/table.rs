//! Tier and usage-class budgets.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::metrics::MeshMetrics;
use crate::verdict::BudgetVerdict;

/// Production fidelity tier, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Stylized low-poly art.
    LowPoly,
    /// Small-team production.
    Indie,
    /// Mid-budget production.
    Aa,
    /// Large-budget production.
    Aaa,
    /// Offline or cutscene quality.
    Cinematic,
}

impl Tier {
    /// All tiers, lowest fidelity first.
    pub const ALL: [Self; 5] = [
        Self::LowPoly,
        Self::Indie,
        Self::Aa,
        Self::Aaa,
        Self::Cinematic,
    ];

    /// Canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LowPoly => "low-poly",
            Self::Indie => "indie",
            Self::Aa => "aa",
            Self::Aaa => "aaa",
            Self::Cinematic => "cinematic",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = BudgetError;

    /// Parse a tier name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str() == name)
            .ok_or_else(|| BudgetError::unknown_tier(s))
    }
}

/// How prominently an asset is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageClass {
    /// Distant scenery.
    Background,
    /// Ordinary scene object.
    Prop,
    /// Focal asset seen up close.
    Hero,
}

impl UsageClass {
    /// All usage classes, least prominent first.
    pub const ALL: [Self; 3] = [Self::Background, Self::Prop, Self::Hero];

    /// Canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Prop => "prop",
            Self::Hero => "hero",
        }
    }
}

impl fmt::Display for UsageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_usage(s: &str) -> Option<UsageClass> {
    let name = s.trim().to_lowercase();
    UsageClass::ALL
        .into_iter()
        .find(|usage| usage.as_str() == name)
}

impl FromStr for UsageClass {
    type Err = BudgetError;

    /// Parse a usage class, ignoring case and surrounding whitespace.
    ///
    /// Without a tier to report, the error's tier field is empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_usage(s).ok_or_else(|| BudgetError::unknown_usage("", s))
    }
}

/// Limits for one (tier, usage class) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Maximum face count, inclusive.
    pub max_faces: usize,
    /// Maximum faces per unit area, inclusive. `null` in JSON means no
    /// limit.
    #[serde(with = "crate::metrics::density_serde")]
    pub max_density: f64,
}

impl Budget {
    /// Create a budget.
    #[must_use]
    pub const fn new(max_faces: usize, max_density: f64) -> Self {
        Self {
            max_faces,
            max_density,
        }
    }

    /// Compare metrics against this budget. Both limits are inclusive.
    ///
    /// Infinite density only fits an infinite limit.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_budget::{Budget, MeshMetrics};
    /// use mesh_types::unit_cube;
    ///
    /// let metrics = MeshMetrics::of(&unit_cube()); // 12 faces, density 2
    /// let verdict = Budget::new(12, 1.5).evaluate(&metrics);
    /// assert!(verdict.faces_within_budget);
    /// assert!(!verdict.density_within_budget);
    /// ```
    #[must_use]
    pub fn evaluate(&self, metrics: &MeshMetrics) -> BudgetVerdict {
        BudgetVerdict {
            faces_within_budget: metrics.face_count <= self.max_faces,
            density_within_budget: metrics.density <= self.max_density,
        }
    }
}

/// Budgets for every (tier, usage class) pair.
///
/// Serializes as a nested map, tier name to usage name to budget:
///
/// ```json
/// { "indie": { "prop": { "max_faces": 800, "max_density": 900.0 } } }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetTable {
    entries: BTreeMap<Tier, BTreeMap<UsageClass, Budget>>,
}

impl BudgetTable {
    /// The standard budget table.
    ///
    /// | tier      | background   | prop         | hero           |
    /// |-----------|--------------|--------------|----------------|
    /// | low-poly  | 150 / 250    | 400 / 450    | 750 / 650      |
    /// | indie     | 300 / 500    | 800 / 900    | 1500 / 1300    |
    /// | aa        | 600 / 1000   | 1600 / 1800  | 3000 / 2600    |
    /// | aaa       | 1200 / 2000  | 3200 / 3600  | 6000 / 5200    |
    /// | cinematic | 2400 / 4000  | 6400 / 7200  | 12000 / 10400  |
    #[must_use]
    pub fn standard() -> Self {
        use Tier::{Aa, Aaa, Cinematic, Indie, LowPoly};
        use UsageClass::{Background, Hero, Prop};

        Self::from_entries([
            (LowPoly, Background, Budget::new(150, 250.0)),
            (LowPoly, Prop, Budget::new(400, 450.0)),
            (LowPoly, Hero, Budget::new(750, 650.0)),
            (Indie, Background, Budget::new(300, 500.0)),
            (Indie, Prop, Budget::new(800, 900.0)),
            (Indie, Hero, Budget::new(1500, 1300.0)),
            (Aa, Background, Budget::new(600, 1000.0)),
            (Aa, Prop, Budget::new(1600, 1800.0)),
            (Aa, Hero, Budget::new(3000, 2600.0)),
            (Aaa, Background, Budget::new(1200, 2000.0)),
            (Aaa, Prop, Budget::new(3200, 3600.0)),
            (Aaa, Hero, Budget::new(6000, 5200.0)),
            (Cinematic, Background, Budget::new(2400, 4000.0)),
            (Cinematic, Prop, Budget::new(6400, 7200.0)),
            (Cinematic, Hero, Budget::new(12000, 10400.0)),
        ])
    }

    /// Build a table from explicit entries. Later entries win.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (Tier, UsageClass, Budget)>) -> Self {
        let mut table = Self::default();
        for (tier, usage, budget) in entries {
            table.insert(tier, usage, budget);
        }
        table
    }

    /// Set the budget for a pair, replacing any previous one.
    pub fn insert(&mut self, tier: Tier, usage: UsageClass, budget: Budget) {
        self.entries.entry(tier).or_default().insert(usage, budget);
    }

    /// Number of (tier, usage class) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a budget by name.
    ///
    /// Names are matched case-insensitively after trimming. The tier is
    /// resolved first, so a bad tier is reported even when the usage class
    /// is also bad.
    ///
    /// # Errors
    ///
    /// - [`BudgetError::UnknownTier`] if the tier name is unknown, or the
    ///   table has no row for it.
    /// - [`BudgetError::UnknownUsageClass`] if the usage class is unknown,
    ///   or the table has no entry for it under that tier.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_budget::{BudgetError, BudgetTable};
    ///
    /// let table = BudgetTable::standard();
    /// let budget = table.lookup("Indie", "PROP").unwrap();
    /// assert_eq!(budget.max_faces, 800);
    ///
    /// assert!(matches!(
    ///     table.lookup("ultra", "prop"),
    ///     Err(BudgetError::UnknownTier { .. })
    /// ));
    /// ```
    pub fn lookup(&self, tier: &str, usage: &str) -> BudgetResult<Budget> {
        let tier_key: Tier = tier.parse()?;
        let row = self
            .entries
            .get(&tier_key)
            .ok_or_else(|| BudgetError::unknown_tier(tier))?;

        let usage_key = parse_usage(usage)
            .ok_or_else(|| BudgetError::unknown_usage(tier_key.as_str(), usage))?;
        let budget = row
            .get(&usage_key)
            .copied()
            .ok_or_else(|| BudgetError::unknown_usage(tier_key.as_str(), usage))?;

        debug!(tier = %tier_key, usage = %usage_key, ?budget, "resolved budget");
        Ok(budget)
    }

    /// Look up a budget by typed key.
    ///
    /// # Errors
    ///
    /// Same as [`lookup`](Self::lookup) for a table missing the entry.
    pub fn get(&self, tier: Tier, usage: UsageClass) -> BudgetResult<Budget> {
        self.entries
            .get(&tier)
            .ok_or_else(|| BudgetError::unknown_tier(tier.as_str()))?
            .get(&usage)
            .copied()
            .ok_or_else(|| BudgetError::unknown_usage(tier.as_str(), usage.as_str()))
    }

    /// Iterate over all entries, tier-major in fidelity order.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, UsageClass, Budget)> + '_ {
        self.entries.iter().flat_map(|(&tier, row)| {
            row.iter().map(move |(&usage, &budget)| (tier, usage, budget))
        })
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> BudgetResult<String> {
        serde_json::to_string_pretty(self).map_err(BudgetError::from)
    }

    /// Parse a table from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetError::Serialization`] for malformed JSON, unknown
    /// tier or usage names, or bad budget fields.
    pub fn from_json(json: &str) -> BudgetResult<Self> {
        serde_json::from_str(json).map_err(BudgetError::from)
    }
}
