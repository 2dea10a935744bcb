//! Birth-weight plausibility given gestation and sex
//!
//! Plausible weight bands come from population centile charts and are held in
//! an ordered lookup table keyed by (sex, gestation weeks). The reference table
//! is sparse: only the extremes of the gestation range carry bands, and weeks
//! without an entry are left unchecked.

use std::sync::LazyLock;

use super::intra::LIVE_BIRTH;
use crate::models::{FieldValue, Score};

/// Highest gestation, in weeks, treated as a valid combination
pub const MAX_GESTATION_WEEKS: i64 = 49;
/// Weight in grams above which a live birth is doubtful
pub const DOUBTFUL_WEIGHT_GRAMS: i64 = 7000;

/// Plausible weight band for one sex and gestation week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightBand {
    /// Baby sex code (1 male, 2 female)
    pub sex: i64,
    /// Completed weeks of gestation
    pub gestation_weeks: i64,
    /// Lowest plausible weight in grams
    pub min_grams: i64,
    /// Highest plausible weight in grams
    pub max_grams: i64,
}

impl WeightBand {
    /// Create a band
    #[must_use]
    pub const fn new(sex: i64, gestation_weeks: i64, min_grams: i64, max_grams: i64) -> Self {
        Self {
            sex,
            gestation_weeks,
            min_grams,
            max_grams,
        }
    }

    /// Whether a weight lies inside the band, bounds included
    #[must_use]
    pub fn contains(&self, grams: i64) -> bool {
        (self.min_grams..=self.max_grams).contains(&grams)
    }
}

/// Reference centile bands
const REFERENCE_BANDS: [WeightBand; 10] = [
    WeightBand::new(1, 24, 290, 980),
    WeightBand::new(1, 25, 340, 1120),
    WeightBand::new(1, 26, 390, 1280),
    WeightBand::new(1, 42, 2380, 4990),
    WeightBand::new(1, 43, 2450, 5100),
    WeightBand::new(2, 24, 270, 916),
    WeightBand::new(2, 25, 310, 1050),
    WeightBand::new(2, 26, 360, 1200),
    WeightBand::new(2, 42, 2280, 4800),
    WeightBand::new(2, 43, 2350, 4900),
];

static REFERENCE_TABLE: LazyLock<WeightBandTable> =
    LazyLock::new(|| WeightBandTable::new(REFERENCE_BANDS.to_vec()));

/// Ordered table of weight bands
#[derive(Debug, Clone, Default)]
pub struct WeightBandTable {
    bands: Vec<WeightBand>,
}

impl WeightBandTable {
    /// Build a table; bands are sorted by (sex, gestation weeks) and a later
    /// band for the same pair replaces an earlier one
    #[must_use]
    pub fn new(mut bands: Vec<WeightBand>) -> Self {
        bands.reverse();
        bands.sort_by_key(|band| (band.sex, band.gestation_weeks));
        bands.dedup_by_key(|band| (band.sex, band.gestation_weeks));
        Self { bands }
    }

    /// The built-in reference table
    #[must_use]
    pub fn reference() -> &'static Self {
        &REFERENCE_TABLE
    }

    /// Band for a sex and gestation week
    #[must_use]
    pub fn lookup(&self, sex: i64, gestation_weeks: i64) -> Option<&WeightBand> {
        self.bands
            .binary_search_by_key(&(sex, gestation_weeks), |band| {
                (band.sex, band.gestation_weeks)
            })
            .ok()
            .map(|i| &self.bands[i])
    }

    /// Bands in table order
    #[must_use]
    pub fn bands(&self) -> &[WeightBand] {
        &self.bands
    }
}

/// Score a birth weight against the reference table
#[must_use]
pub fn weight_plausibility(
    birth_status: Option<&FieldValue>,
    gestation_weeks: Option<&FieldValue>,
    baby_sex: Option<&FieldValue>,
    birth_weight: Option<&FieldValue>,
) -> Score {
    weight_plausibility_with(
        WeightBandTable::reference(),
        birth_status,
        gestation_weeks,
        baby_sex,
        birth_weight,
    )
}

/// Score a birth weight against a given table
#[must_use]
pub fn weight_plausibility_with(
    table: &WeightBandTable,
    birth_status: Option<&FieldValue>,
    gestation_weeks: Option<&FieldValue>,
    baby_sex: Option<&FieldValue>,
    birth_weight: Option<&FieldValue>,
) -> Score {
    let (Some(status), Some(weeks), Some(sex), Some(grams)) =
        (birth_status, gestation_weeks, baby_sex, birth_weight)
    else {
        return Score::Blank;
    };
    let (Some(status), Some(weeks), Some(sex), Some(grams)) =
        (status.as_int(), weeks.as_int(), sex.as_int(), grams.as_int())
    else {
        return Score::Blank;
    };

    if !(1..=4).contains(&status) || !matches!(sex, 1 | 2) || weeks > MAX_GESTATION_WEEKS {
        return Score::Blank;
    }
    if status != LIVE_BIRTH {
        return Score::Valid;
    }
    if grams > DOUBTFUL_WEIGHT_GRAMS {
        return Score::Doubtful;
    }

    match table.lookup(sex, weeks) {
        Some(band) if !band.contains(grams) => Score::Infeasible,
        _ => Score::Valid,
    }
}
