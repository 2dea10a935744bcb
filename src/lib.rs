//! A Rust library for scoring the data quality of maternity episode records.
//!
//! Records are scored by three rule tiers (field-level, intra-record and
//! inter-record), weighted per tier and normalized against yearly averages.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{ScoringConfig, WeightingConstants};
pub use error::{Result, ScoringError};
pub use models::{
    CheckScore, CheckScores, EpisodeRecord, FamilyAnnotation, FamilyAssignment, FieldValue,
    NormalizedRecordScores, RawRecordScores, RecordKey, Score, Tier, YearlyAverageTable,
};

// Pipeline
pub use algorithm::engine::{ScoringEngine, ScoringOutput};
pub use algorithm::family::detect_families;
pub use algorithm::rules::{check_catalog, score_inter_record, score_record};
pub use algorithm::statistics::RunSummary;
pub use algorithm::weighting::{apply_normalization, compute_yearly_averages, weight};

// Input
pub use normalize::{RawEpisodeRecord, normalize, normalize_all};
