//! Error handling for the episode scoring engine.
//!
//! Record-level anomalies are never errors: an unclassifiable value, a missing
//! linkage field or an inapplicable comparison all resolve to a score. The
//! variants here cover configuration problems and the I/O collaborators.

use std::io;

use crate::models::Tier;

/// Specialized error type for the scoring engine
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    /// No weighting constants were configured before weighting started
    #[error("Weighting constants are not configured")]
    MissingWeights,

    /// A tier multiplier was zero
    #[error("Invalid {tier} weight: {value} (multipliers must be positive)")]
    InvalidWeight {
        /// Tier the multiplier belongs to
        tier: Tier,
        /// Offending value
        value: u32,
    },

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or writing delimited data
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error serializing JSON output
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input data that cannot be turned into episode records at all
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for scoring operations
pub type Result<T> = std::result::Result<T, ScoringError>;
