//! Configuration for the scoring engine.

use std::fmt;

use crate::error::{Result, ScoringError};
use crate::models::Tier;

/// Environment variable overriding the field-tier multiplier
pub const FIELD_WEIGHT_ENV: &str = "EPISODE_QUALITY_FIELD_WEIGHT";
/// Environment variable overriding the intra-tier multiplier
pub const INTRA_WEIGHT_ENV: &str = "EPISODE_QUALITY_INTRA_WEIGHT";
/// Environment variable overriding the inter-tier multiplier
pub const INTER_WEIGHT_ENV: &str = "EPISODE_QUALITY_INTER_WEIGHT";

/// Tier multipliers applied in the weighting pass
///
/// Set once per run and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightingConstants {
    field: u32,
    intra: u32,
    inter: u32,
}

impl Default for WeightingConstants {
    fn default() -> Self {
        Self {
            field: 1,
            intra: 10,
            inter: 100,
        }
    }
}

impl WeightingConstants {
    /// Create weighting constants, rejecting zero multipliers
    pub fn new(field: u32, intra: u32, inter: u32) -> Result<Self> {
        for (tier, value) in [(Tier::Field, field), (Tier::Intra, intra), (Tier::Inter, inter)] {
            if value == 0 {
                return Err(ScoringError::InvalidWeight { tier, value });
            }
        }
        Ok(Self {
            field,
            intra,
            inter,
        })
    }

    /// Read the multipliers from the environment, falling back to the defaults
    ///
    /// Unparseable values are ignored with a warning; a zero value is an error.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Self::new(
            weight_from_env(FIELD_WEIGHT_ENV).unwrap_or(defaults.field),
            weight_from_env(INTRA_WEIGHT_ENV).unwrap_or(defaults.intra),
            weight_from_env(INTER_WEIGHT_ENV).unwrap_or(defaults.inter),
        )
    }

    /// Multiplier for the field tier
    #[must_use]
    pub const fn field(&self) -> u32 {
        self.field
    }

    /// Multiplier for the intra-record tier
    #[must_use]
    pub const fn intra(&self) -> u32 {
        self.intra
    }

    /// Multiplier for the inter-record tier
    #[must_use]
    pub const fn inter(&self) -> u32 {
        self.inter
    }

    /// Multiplier for a tier
    #[must_use]
    pub const fn multiplier(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Field => self.field,
            Tier::Intra => self.intra,
            Tier::Inter => self.inter,
        }
    }
}

impl fmt::Display for WeightingConstants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field={} intra={} inter={}",
            self.field, self.intra, self.inter
        )
    }
}

fn weight_from_env(name: &str) -> Option<u32> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<u32>() {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring {name}={raw}: {e}");
            None
        }
    }
}

/// Configuration for a scoring run
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Tier multipliers; a run without them fails before weighting
    pub weights: Option<WeightingConstants>,
    /// Whether to evaluate records on the rayon thread pool
    pub parallel: bool,
    /// Whether to draw progress bars while scoring
    pub show_progress: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: Some(WeightingConstants::default()),
            parallel: true,
            show_progress: false,
        }
    }
}

impl ScoringConfig {
    /// Create a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with no weighting constants
    #[must_use]
    pub fn unweighted() -> Self {
        Self {
            weights: None,
            ..Self::default()
        }
    }

    /// Set the weighting constants
    #[must_use]
    pub fn with_weights(mut self, weights: WeightingConstants) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Enable or disable parallel evaluation
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enable or disable progress bars
    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

impl fmt::Display for ScoringConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scoring Configuration:")?;
        match self.weights {
            Some(weights) => writeln!(f, "  Weights: {weights}")?,
            None => writeln!(f, "  Weights: <unset>")?,
        }
        writeln!(f, "  Parallel: {}", self.parallel)?;
        writeln!(f, "  Show Progress: {}", self.show_progress)?;
        Ok(())
    }
}
