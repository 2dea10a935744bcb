//! Scoring engine
//!
//! Runs a closed batch of episode records through the whole pipeline:
//! family detection, the three rule tiers, tier weighting, yearly averaging and
//! historical normalization. The steps are separated by barriers; each
//! intermediate table is written once and only read afterwards.

use std::time::Instant;

use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::algorithm::family::detect_families;
use crate::algorithm::rules::{score_inter_record_aligned, score_record};
use crate::algorithm::weighting::{apply_normalization, compute_yearly_averages, weight};
use crate::config::{ScoringConfig, WeightingConstants};
use crate::error::{Result, ScoringError};
use crate::models::{
    CheckScores, EpisodeRecord, FamilyAssignment, NormalizedRecordScores, RawRecordScores,
    RecordKey, YearlyAverageTable,
};
use crate::normalize::{RawEpisodeRecord, normalize_all};
use crate::utils::logging::{create_main_progress_bar, finish_progress_bar, log_operation_start};

/// Everything a scoring run produces
#[derive(Debug, Clone)]
pub struct ScoringOutput {
    /// The scored records, in input order
    pub records: Vec<EpisodeRecord>,
    /// Family annotations, aligned with `records`
    pub families: FamilyAssignment,
    /// Raw weighted scores, aligned with `records`
    pub raw: Vec<RawRecordScores>,
    /// Historically normalized scores, aligned with `records`
    pub normalized: Vec<NormalizedRecordScores>,
    /// Per-year, per-check normalization factors
    pub yearly: YearlyAverageTable,
    /// Weighting constants used for the run
    pub weights: WeightingConstants,
}

/// Batch scoring engine
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    /// Create an engine with the given configuration
    #[must_use]
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// The engine configuration
    #[must_use]
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Normalize raw records, then score them
    pub fn score_raw(&self, raw: &[RawEpisodeRecord]) -> Result<ScoringOutput> {
        self.run(normalize_all(raw))
    }

    /// Score a closed set of normalized records
    pub fn run(&self, records: Vec<EpisodeRecord>) -> Result<ScoringOutput> {
        let weights = self.config.weights.ok_or(ScoringError::MissingWeights)?;
        let start = Instant::now();
        let total_steps = 4;
        log_operation_start("Scoring episode records", records.len());

        log::info!(
            "[Step 1/{total_steps}] Detecting record families across {} records",
            records.len()
        );
        let families = detect_families(&records);
        let distinct_keys: FxHashSet<RecordKey> = records.iter().map(|r| r.key).collect();
        if distinct_keys.len() < records.len() {
            log::warn!(
                "{} records share a (year, row) key; keyed lookups will see only one of each",
                records.len() - distinct_keys.len()
            );
        }

        log::info!("[Step 2/{total_steps}] Evaluating field, intra-record and inter-record rules");
        let step = Instant::now();
        let record_scores = self.score_records(&records);
        let inter_scores = score_inter_record_aligned(&records, &families, self.config.parallel);
        let scores: Vec<(RecordKey, CheckScores)> = records
            .iter()
            .zip(record_scores)
            .zip(inter_scores)
            .map(|((record, mut checks), inter)| {
                checks.extend(inter);
                (record.key, checks)
            })
            .collect();
        log::info!("Evaluated rules for {} records in {:?}", scores.len(), step.elapsed());

        log::info!("[Step 3/{total_steps}] Applying tier weights ({weights})");
        let raw = weight(&scores, &weights);

        log::info!("[Step 4/{total_steps}] Computing yearly averages and normalizing");
        let yearly = compute_yearly_averages(&raw);
        let normalized = apply_normalization(&raw, &yearly);
        log::info!(
            "Computed {} yearly factors over {} years",
            yearly.len(),
            yearly.years().len()
        );

        log::info!("Scored {} records in {:?}", records.len(), start.elapsed());

        Ok(ScoringOutput {
            records,
            families,
            raw,
            normalized,
            yearly,
            weights,
        })
    }

    /// Field-level and intra-record checks, aligned with `records`
    fn score_records(&self, records: &[EpisodeRecord]) -> Vec<CheckScores> {
        let pb = create_main_progress_bar(
            records.len() as u64,
            Some("Scoring records"),
            self.config.show_progress,
        );

        let scores = if self.config.parallel {
            records
                .par_iter()
                .map(|record| {
                    let checks = score_record(record);
                    pb.inc(1);
                    checks
                })
                .collect()
        } else {
            records
                .iter()
                .map(|record| {
                    let checks = score_record(record);
                    pb.inc(1);
                    checks
                })
                .collect()
        };

        finish_progress_bar(&pb, Some("Scoring complete"));
        scores
    }
}

impl ScoringOutput {
    /// Number of scored records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the run was empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of a record by key
    #[must_use]
    pub fn position(&self, key: RecordKey) -> Option<usize> {
        self.records.iter().position(|record| record.key == key)
    }
}
