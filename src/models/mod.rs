//! Data models for maternity episode scoring
//!
//! This module contains the records being scored, the scoring scale, family
//! annotations and the score tables produced by the weighting passes.

pub mod episode;
pub mod family;
pub mod score;
pub mod tables;

pub use episode::{BabySlot, EpisodeRecord, FieldValue, MAX_BABY_SLOTS, RecordKey};
pub use family::{FamilyAnnotation, FamilyAssignment, FamilyKey};
pub use score::{CheckName, CheckScore, CheckScores, Score, Tier, find_score};
pub use tables::{
    NormalizedCheck, NormalizedRecordScores, RawRecordScores, WeightedCheck, YearlyAverageTable,
    YearlyCheckAverage,
};
