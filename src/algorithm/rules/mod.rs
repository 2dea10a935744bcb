//! Rule registry
//!
//! Every check is an entry with a name, a tier and a classification function.
//! Field and intra-record checks depend on one record only; inter-record checks
//! need the whole run and are evaluated separately.

pub mod field;
pub mod inter;
pub mod intra;
pub mod plausibility;

use crate::models::{CheckScores, EpisodeRecord, FieldValue, MAX_BABY_SLOTS, Score, Tier};

pub use field::score_fields;
pub use inter::{score_inter_record, score_inter_record_aligned};
pub use intra::score_intra_record;
pub use plausibility::{WeightBand, WeightBandTable, weight_plausibility};

/// Name and tier of a check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckDefinition {
    /// Check name
    pub name: String,
    /// Tier of the check
    pub tier: Tier,
}

/// Every check the engine evaluates, in registry order
#[must_use]
pub fn check_catalog() -> Vec<CheckDefinition> {
    let field = field::FIELD_RULES.iter().map(|rule| CheckDefinition {
        name: rule.name.to_string(),
        tier: Tier::Field,
    });
    let record = intra::RECORD_RULES.iter().map(|rule| CheckDefinition {
        name: rule.name.to_string(),
        tier: Tier::Intra,
    });
    let slots = (1..=MAX_BABY_SLOTS).flat_map(|slot| {
        intra::slot_check_names(slot).map(|name| CheckDefinition {
            name,
            tier: Tier::Intra,
        })
    });
    let inter = inter::INTER_CHECKS.iter().map(|name| CheckDefinition {
        name: (*name).to_string(),
        tier: Tier::Inter,
    });
    field.chain(record).chain(slots).chain(inter).collect()
}

/// Field-level and intra-record checks of one record
#[must_use]
pub fn score_record(record: &EpisodeRecord) -> CheckScores {
    let mut scores = score_fields(record);
    scores.extend(score_intra_record(record));
    scores
}

/// Blank scores 3, anything present scores 8
pub(crate) fn presence(value: Option<&FieldValue>) -> Score {
    match value {
        None => Score::Blank,
        Some(_) => Score::Valid,
    }
}

/// Classify an integer code: blank scores 3 and non-integers fall through to 1
pub(crate) fn classify_int(value: Option<&FieldValue>, classify: impl Fn(i64) -> Score) -> Score {
    match value {
        None => Score::Blank,
        Some(value) => value.as_int().map_or(Score::Illegal, classify),
    }
}
