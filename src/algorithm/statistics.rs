//! Run statistics and summaries
//!
//! This module condenses a scoring run into per-year counts and mean totals
//! and renders them as a plain-text report.

use std::collections::BTreeMap;
use std::fmt;

use super::engine::ScoringOutput;

/// Statistics for one data year
#[derive(Debug, Clone, PartialEq)]
pub struct YearStats {
    /// Data year
    pub year: Option<i32>,
    /// Number of records
    pub record_count: usize,
    /// Number of records flagged as duplicates
    pub duplicate_count: usize,
    /// Mean raw weighted total
    pub mean_raw_total: f64,
    /// Mean normalized total
    pub mean_normalized_total: f64,
}

/// Summary of a scoring run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Total number of records
    pub record_count: usize,
    /// Number of families
    pub family_count: usize,
    /// Number of records flagged as duplicates
    pub duplicate_count: usize,
    /// Per-year statistics, ascending by year
    pub years: Vec<YearStats>,
}

impl RunSummary {
    /// Calculate the summary of a run
    #[must_use]
    pub fn from_output(output: &ScoringOutput) -> Self {
        let mut by_year: BTreeMap<Option<i32>, (usize, usize, u64, f64)> = BTreeMap::new();

        for ((raw, normalized), family) in output
            .raw
            .iter()
            .zip(&output.normalized)
            .zip(&output.families.annotations)
        {
            let entry = by_year.entry(raw.key.year).or_default();
            entry.0 += 1;
            entry.1 += usize::from(family.is_duplicate);
            entry.2 += raw.total_record_score;
            entry.3 += normalized.total_record_score;
        }

        let years = by_year
            .into_iter()
            .map(|(year, (count, duplicates, raw_sum, normalized_sum))| YearStats {
                year,
                record_count: count,
                duplicate_count: duplicates,
                mean_raw_total: raw_sum as f64 / count as f64,
                mean_normalized_total: normalized_sum / count as f64,
            })
            .collect();

        Self {
            record_count: output.len(),
            family_count: output.families.family_count,
            duplicate_count: output.families.duplicate_count(),
            years,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Episode Quality Summary:")?;
        writeln!(f, "  Total Records: {}", self.record_count)?;
        writeln!(f, "  Total Families: {}", self.family_count)?;
        writeln!(f, "  Duplicate Records: {}", self.duplicate_count)?;

        if !self.years.is_empty() {
            writeln!(f, "\nBy Year:")?;
        }
        for stats in &self.years {
            let label = stats
                .year
                .map_or_else(|| "unknown".to_string(), |year| year.to_string());
            writeln!(
                f,
                "  {label}: {} records, {} duplicates, mean raw total {:.1}, mean normalized total {:.1}",
                stats.record_count,
                stats.duplicate_count,
                stats.mean_raw_total,
                stats.mean_normalized_total
            )?;
        }
        Ok(())
    }
}
