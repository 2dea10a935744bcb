//! Tier weighting and historical normalization
//!
//! Pass 1 multiplies every check by its tier multiplier and sums the record.
//! Pass 2 averages each check per year and turns the mean into a factor in
//! (0, 1]. Pass 3 rescales every weighted check by its year's factor, so a
//! check that is usually perfect keeps close to its full weight while a check
//! that is often poor contributes less.

use std::collections::BTreeMap;

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::config::WeightingConstants;
use crate::models::{
    CheckName, CheckScore, NormalizedCheck, NormalizedRecordScores, RawRecordScores, RecordKey,
    Score, Tier, WeightedCheck, YearlyAverageTable, YearlyCheckAverage,
};

/// Weight the checks of one record
#[must_use]
pub fn weight_record(
    key: RecordKey,
    scores: &[CheckScore],
    constants: &WeightingConstants,
) -> RawRecordScores {
    let checks: Vec<WeightedCheck> = scores
        .iter()
        .map(|check| WeightedCheck {
            name: check.name.clone(),
            tier: check.tier,
            score: check.score,
            multiplier: constants.multiplier(check.tier),
            weighted: u64::from(check.score.value()) * u64::from(constants.multiplier(check.tier)),
        })
        .collect();
    let total_record_score = checks.iter().map(|check| check.weighted).sum();
    RawRecordScores {
        key,
        checks,
        total_record_score,
    }
}

/// Pass 1: weight every record
#[must_use]
pub fn weight(
    scores: &[(RecordKey, Vec<CheckScore>)],
    constants: &WeightingConstants,
) -> Vec<RawRecordScores> {
    scores
        .par_iter()
        .map(|(key, checks)| weight_record(*key, checks, constants))
        .collect()
}

/// Running sum of one check within one year
struct CheckAccumulator {
    name: CheckName,
    tier: Tier,
    multiplier: u32,
    sum: u64,
    count: usize,
}

/// Pass 2: per-year, per-check averages and normalization factors
///
/// The ceiling of each check is read from the multiplier pass 1 applied to it.
#[must_use]
pub fn compute_yearly_averages(weighted: &[RawRecordScores]) -> YearlyAverageTable {
    let mut years: BTreeMap<Option<i32>, (Vec<CheckAccumulator>, FxHashMap<CheckName, usize>)> =
        BTreeMap::new();

    for record in weighted {
        let (accumulators, index) = years.entry(record.key.year).or_default();
        for check in &record.checks {
            let slot = *index.entry(check.name.clone()).or_insert_with(|| {
                accumulators.push(CheckAccumulator {
                    name: check.name.clone(),
                    tier: check.tier,
                    multiplier: check.multiplier,
                    sum: 0,
                    count: 0,
                });
                accumulators.len() - 1
            });
            accumulators[slot].sum += check.weighted;
            accumulators[slot].count += 1;
        }
    }

    let entries: Vec<YearlyCheckAverage> = years
        .into_iter()
        .flat_map(|(year, (accumulators, _))| {
            accumulators.into_iter().map(move |acc| {
                let mean_weighted = acc.sum as f64 / acc.count as f64;
                let ceiling = f64::from(Score::MAX) * f64::from(acc.multiplier);
                let factor = mean_weighted / ceiling;
                log::debug!("Year {year:?} check {}: factor {factor:.4}", acc.name);
                YearlyCheckAverage {
                    year,
                    check: acc.name,
                    tier: acc.tier,
                    record_count: acc.count,
                    mean_weighted,
                    factor,
                }
            })
        })
        .collect();

    YearlyAverageTable::new(entries)
}

/// Normalize the checks of one record
#[must_use]
pub fn normalize_record(
    record: &RawRecordScores,
    yearly: &YearlyAverageTable,
) -> NormalizedRecordScores {
    let checks: Vec<NormalizedCheck> = record
        .checks
        .iter()
        .map(|check| {
            // Every check of a record in the table's input has an entry.
            let factor = yearly.factor(record.key.year, &check.name).unwrap_or(1.0);
            NormalizedCheck {
                name: check.name.clone(),
                tier: check.tier,
                factor,
                weighted: check.weighted as f64 * factor,
            }
        })
        .collect();
    let total_record_score = checks.iter().map(|check| check.weighted).sum();
    NormalizedRecordScores {
        key: record.key,
        checks,
        total_record_score,
    }
}

/// Pass 3: rescale every record by its year's factors
#[must_use]
pub fn apply_normalization(
    weighted: &[RawRecordScores],
    yearly: &YearlyAverageTable,
) -> Vec<NormalizedRecordScores> {
    weighted
        .par_iter()
        .map(|record| normalize_record(record, yearly))
        .collect()
}
