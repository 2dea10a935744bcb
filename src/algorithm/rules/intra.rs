//! Intra-record rules
//!
//! Baby-slot fields are gated by the number of babies on the episode: slot `k`
//! must be blank when fewer than `k` babies were delivered and populated
//! otherwise. Each slot rule is written once and evaluated for slots 1 to 3.

use super::plausibility::weight_plausibility;
use crate::models::{
    BabySlot, CheckScore, CheckScores, EpisodeRecord, FieldValue, MAX_BABY_SLOTS, Score, Tier,
};

/// Whether a slot is expected to carry values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    /// Fewer babies than the slot number: every field must be blank
    Forbidden,
    /// The slot describes a delivered baby: every field must be populated
    Required,
    /// The number of babies is blank, "not known" or unclassifiable
    Undetermined,
}

/// Applicability of a 1-based slot on a record
#[must_use]
pub fn applicability(record: &EpisodeRecord, slot: usize) -> Applicability {
    let slot = i64::try_from(slot).unwrap_or(i64::MAX);
    match record.baby_count() {
        Some(count) if count < slot => Applicability::Forbidden,
        Some(_) => Applicability::Required,
        None => Applicability::Undetermined,
    }
}

/// What a slot rule can see besides the value itself
pub struct SlotContext<'a> {
    /// Record the slot belongs to
    pub record: &'a EpisodeRecord,
    /// 1-based slot number
    pub slot: usize,
}

/// A rule applied to one field of every baby slot
pub struct SlotRule {
    /// Check name stem; the slot number is appended
    pub stem: &'static str,
    /// Field accessor
    pub field: fn(&BabySlot) -> Option<&FieldValue>,
    /// Domain rule for a populated field in an applicable slot
    pub classify: fn(&FieldValue, &SlotContext<'_>) -> Score,
}

/// A rule over several fields of the same record
pub struct RecordRule {
    /// Check name
    pub name: &'static str,
    /// Classification function
    pub classify: fn(&EpisodeRecord) -> Score,
}

/// Check name stem of the per-slot birth-weight plausibility check
pub const WEIGHT_PLAUSIBILITY: &str = "weight_plausibility";

/// Record-level intra rules
pub static RECORD_RULES: [RecordRule; 1] = [RecordRule {
    name: "episode_dates",
    classify: episode_dates,
}];

/// Per-slot field rules, in slot field order
pub static SLOT_RULES: [SlotRule; 10] = [
    SlotRule {
        stem: "birth_date",
        field: |s| s.birth_date.as_ref(),
        classify: birth_date,
    },
    SlotRule {
        stem: "resuscitation_method",
        field: |s| s.resuscitation_method.as_ref(),
        classify: |v, _| int_rule(v, resuscitation_method),
    },
    SlotRule {
        stem: "delivery_status",
        field: |s| s.delivery_status.as_ref(),
        classify: |v, _| int_rule(v, delivery_status),
    },
    SlotRule {
        stem: "birth_order",
        field: |s| s.birth_order.as_ref(),
        classify: birth_order,
    },
    SlotRule {
        stem: "birth_status",
        field: |s| s.birth_status.as_ref(),
        classify: |v, _| int_rule(v, birth_status),
    },
    SlotRule {
        stem: "birth_weight",
        field: |s| s.birth_weight.as_ref(),
        classify: |v, _| int_rule(v, birth_weight),
    },
    SlotRule {
        stem: "delivery_method",
        field: |s| s.delivery_method.as_ref(),
        classify: |v, _| int_rule(v, delivery_method),
    },
    SlotRule {
        stem: "delivery_place",
        field: |s| s.delivery_place.as_ref(),
        classify: |v, _| int_rule(v, delivery_place),
    },
    SlotRule {
        stem: "gestation_weeks",
        field: |s| s.gestation_weeks.as_ref(),
        classify: |v, _| int_rule(v, gestation_weeks),
    },
    SlotRule {
        stem: "baby_sex",
        field: |s| s.baby_sex.as_ref(),
        classify: |v, _| int_rule(v, baby_sex),
    },
];

/// Names of all checks evaluated for a slot, in evaluation order
pub fn slot_check_names(slot: usize) -> impl Iterator<Item = String> {
    SLOT_RULES
        .iter()
        .map(|rule| rule.stem)
        .chain(std::iter::once(WEIGHT_PLAUSIBILITY))
        .map(move |stem| format!("{stem}_{slot}"))
}

/// Score every intra-record check of a record
#[must_use]
pub fn score_intra_record(record: &EpisodeRecord) -> CheckScores {
    let mut scores: CheckScores = RECORD_RULES
        .iter()
        .map(|rule| CheckScore::new(rule.name, Tier::Intra, (rule.classify)(record)))
        .collect();

    for (index, baby) in record.babies.iter().enumerate() {
        let slot = index + 1;
        let gate = applicability(record, slot);
        let context = SlotContext { record, slot };

        for rule in &SLOT_RULES {
            let score = evaluate_slot_field(gate, (rule.field)(baby), |value| {
                (rule.classify)(value, &context)
            });
            scores.push(CheckScore::new(
                format!("{}_{slot}", rule.stem),
                Tier::Intra,
                score,
            ));
        }

        let plausibility = match gate {
            Applicability::Forbidden => Score::Valid,
            Applicability::Required | Applicability::Undetermined => weight_plausibility(
                baby.birth_status.as_ref(),
                baby.gestation_weeks.as_ref(),
                baby.baby_sex.as_ref(),
                baby.birth_weight.as_ref(),
            ),
        };
        scores.push(CheckScore::new(
            format!("{WEIGHT_PLAUSIBILITY}_{slot}"),
            Tier::Intra,
            plausibility,
        ));
    }

    debug_assert_eq!(scores.len(), RECORD_RULES.len() + MAX_BABY_SLOTS * 11);
    scores
}

/// Apply the slot gate, then the domain rule
fn evaluate_slot_field(
    gate: Applicability,
    value: Option<&FieldValue>,
    classify: impl FnOnce(&FieldValue) -> Score,
) -> Score {
    match (gate, value) {
        (Applicability::Forbidden, Some(_)) => Score::Illegal,
        (Applicability::Required, None) => Score::Blank,
        (_, None) => Score::Valid,
        (_, Some(value)) => classify(value),
    }
}

fn int_rule(value: &FieldValue, classify: fn(i64) -> Score) -> Score {
    value.as_int().map_or(Score::Illegal, classify)
}

fn episode_dates(record: &EpisodeRecord) -> Score {
    let (Some(start), Some(end)) = (record.episode_start.as_ref(), record.episode_end.as_ref())
    else {
        return Score::Blank;
    };
    match (start.as_date(), end.as_date()) {
        (Some(start), Some(end)) if end < start => Score::Infeasible,
        (Some(_), Some(_)) => Score::Valid,
        _ => Score::Illegal,
    }
}

fn birth_date(value: &FieldValue, context: &SlotContext<'_>) -> Score {
    let Some(born) = value.as_date() else {
        return Score::Illegal;
    };
    match context.record.admission() {
        Some(admitted) if born < admitted => Score::Illegal,
        _ => Score::Valid,
    }
}

fn birth_order(value: &FieldValue, context: &SlotContext<'_>) -> Score {
    let Some(order) = value.as_int() else {
        return Score::Illegal;
    };
    match (order, context.record.baby_count()) {
        (9, _) => Score::Unknown,
        (1..=8, Some(count)) if order > count => Score::Infeasible,
        (1..=8, _) => Score::Valid,
        _ => Score::Illegal,
    }
}

fn resuscitation_method(code: i64) -> Score {
    match code {
        1..=6 => Score::Valid,
        8 => Score::NotSpecified,
        9 => Score::Unknown,
        _ => Score::Illegal,
    }
}

fn delivery_status(code: i64) -> Score {
    match code {
        1..=3 => Score::Valid,
        8 => Score::Other,
        9 => Score::Unknown,
        _ => Score::Illegal,
    }
}

/// Birth status code of a live birth
pub const LIVE_BIRTH: i64 = 1;

fn birth_status(code: i64) -> Score {
    match code {
        LIVE_BIRTH | 2..=4 => Score::Valid,
        9 => Score::Unknown,
        _ => Score::Illegal,
    }
}

fn birth_weight(grams: i64) -> Score {
    match grams {
        i64::MIN..=-1 => Score::Illegal,
        0..=200 | 5000..=7000 => Score::Infeasible,
        9999 => Score::Unknown,
        7001..=9998 => Score::Illegal,
        _ => Score::Valid,
    }
}

fn delivery_method(code: i64) -> Score {
    match code {
        0..=7 => Score::Valid,
        8 => Score::Other,
        9 => Score::Unknown,
        _ => Score::Illegal,
    }
}

fn delivery_place(code: i64) -> Score {
    match code {
        1..=6 => Score::Valid,
        7 => Score::Other,
        8 => Score::NotSpecified,
        9 => Score::Unknown,
        _ => Score::Illegal,
    }
}

fn gestation_weeks(weeks: i64) -> Score {
    match weeks {
        10..=49 => Score::Valid,
        99 => Score::Unknown,
        0..=9 => Score::Infeasible,
        _ => Score::Illegal,
    }
}

fn baby_sex(code: i64) -> Score {
    match code {
        1 | 2 => Score::Valid,
        0 => Score::Unknown,
        9 => Score::NotSpecified,
        _ => Score::Illegal,
    }
}
