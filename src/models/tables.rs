//! Score tables produced by the weighting passes

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::episode::RecordKey;
use super::score::{CheckName, Score, Tier};

/// A check after tier weighting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedCheck {
    /// Check name
    pub name: CheckName,
    /// Tier of the check
    pub tier: Tier,
    /// Raw score on the scale
    pub score: Score,
    /// Tier multiplier applied to the score
    pub multiplier: u32,
    /// Score multiplied by the tier multiplier
    pub weighted: u64,
}

/// Weighted scores of one record (pass 1 output)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecordScores {
    /// Record the scores belong to
    pub key: RecordKey,
    /// Weighted checks in registry order
    pub checks: Vec<WeightedCheck>,
    /// Sum of all weighted checks
    pub total_record_score: u64,
}

impl RawRecordScores {
    /// Weighted check by name
    #[must_use]
    pub fn check(&self, name: &str) -> Option<&WeightedCheck> {
        self.checks.iter().find(|check| check.name == name)
    }
}

/// A check after historical normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCheck {
    /// Check name
    pub name: CheckName,
    /// Tier of the check
    pub tier: Tier,
    /// Normalization factor applied
    pub factor: f64,
    /// Weighted score multiplied by the factor
    pub weighted: f64,
}

/// Normalized scores of one record (pass 3 output)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecordScores {
    /// Record the scores belong to
    pub key: RecordKey,
    /// Normalized checks in registry order
    pub checks: Vec<NormalizedCheck>,
    /// Sum of all normalized checks
    pub total_record_score: f64,
}

impl NormalizedRecordScores {
    /// Normalized check by name
    #[must_use]
    pub fn check(&self, name: &str) -> Option<&NormalizedCheck> {
        self.checks.iter().find(|check| check.name == name)
    }
}

/// Average of one check over one year (pass 2 output)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyCheckAverage {
    /// Data year
    pub year: Option<i32>,
    /// Check name
    pub check: CheckName,
    /// Tier of the check
    pub tier: Tier,
    /// Number of records averaged
    pub record_count: usize,
    /// Mean weighted score across the year
    pub mean_weighted: f64,
    /// Mean divided by the maximum weighted score, in (0, 1]
    pub factor: f64,
}

/// Per-year, per-check normalization factors
#[derive(Debug, Clone, Default, Serialize)]
pub struct YearlyAverageTable {
    /// Entries ordered by year, then by registry order
    pub entries: Vec<YearlyCheckAverage>,
    #[serde(skip)]
    index: FxHashMap<(Option<i32>, CheckName), usize>,
}

impl YearlyAverageTable {
    /// Build a table from its entries
    #[must_use]
    pub fn new(entries: Vec<YearlyCheckAverage>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| ((entry.year, entry.check.clone()), i))
            .collect();
        Self { entries, index }
    }

    /// Entry for a year and check
    #[must_use]
    pub fn get(&self, year: Option<i32>, check: &str) -> Option<&YearlyCheckAverage> {
        self.index
            .get(&(year, check.to_string()))
            .and_then(|&i| self.entries.get(i))
    }

    /// Normalization factor for a year and check
    #[must_use]
    pub fn factor(&self, year: Option<i32>, check: &str) -> Option<f64> {
        self.get(year, check).map(|entry| entry.factor)
    }

    /// Distinct years present in the table, ascending
    #[must_use]
    pub fn years(&self) -> Vec<Option<i32>> {
        let mut years: Vec<_> = self.entries.iter().map(|entry| entry.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
