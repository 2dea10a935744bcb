//! Field-level rules
//!
//! Each rule looks at one administrative field in isolation, using the record
//! year where a date has to be placed in time.

use chrono::Datelike;

use super::{classify_int, presence};
use crate::models::{CheckScore, CheckScores, EpisodeRecord, FieldValue, Score, Tier};

/// Ethnic category tokens meaning "not known"
const ETHNICITY_NOT_KNOWN: &[&str] = &["X", "99"];
/// Ethnic category tokens meaning "not stated"
const ETHNICITY_NOT_STATED: &[&str] = &["Z", "9"];
/// Ethnic category tokens meaning "any other ethnic group"
const ETHNICITY_OTHER: &[&str] = &["S", "8"];
/// Substantive ethnic category tokens
const ETHNICITY_SUBSTANTIVE: &[&str] = &[
    "A", "B", "C", "D", "E", "F", "G", "H", "J", "K", "L", "M", "N", "P", "R", "0", "1", "2", "3",
    "4", "5", "6", "7",
];

/// Maternal ages used as invalid placeholders
const MATERNAL_AGE_SENTINELS: [i64; 2] = [0, 110];

/// Age difference at or above which the mother's date of birth is implausible
const IMPLAUSIBLE_MATERNAL_AGE: i32 = 60;

/// A field-level rule
pub struct FieldRule {
    /// Check name
    pub name: &'static str,
    /// Classification function
    pub classify: fn(&EpisodeRecord) -> Score,
}

/// Field-level rules in registry order, one per administrative field
pub static FIELD_RULES: [FieldRule; 13] = [
    FieldRule {
        name: "year",
        classify: |r| presence(r.year.as_ref()),
    },
    FieldRule {
        name: "subject_id",
        classify: |r| presence(r.subject_id.as_ref()),
    },
    FieldRule {
        name: "site_code",
        classify: |r| presence(r.site_code.as_ref()),
    },
    FieldRule {
        name: "episode_start",
        classify: |r| classify_date(r.episode_start.as_ref()),
    },
    FieldRule {
        name: "episode_end",
        classify: |r| classify_date(r.episode_end.as_ref()),
    },
    FieldRule {
        name: "episode_order",
        classify: |r| classify_int(r.episode_order.as_ref(), episode_order),
    },
    FieldRule {
        name: "admission_date",
        classify: admission_date,
    },
    FieldRule {
        name: "date_of_birth",
        classify: date_of_birth,
    },
    FieldRule {
        name: "ethnicity",
        classify: |r| ethnicity(r.ethnicity.as_ref()),
    },
    FieldRule {
        name: "sex",
        classify: |r| classify_int(r.sex.as_ref(), mother_sex),
    },
    FieldRule {
        name: "episode_type",
        classify: |r| classify_int(r.episode_type.as_ref(), episode_type),
    },
    FieldRule {
        name: "maternal_age",
        classify: |r| classify_int(r.maternal_age.as_ref(), maternal_age),
    },
    FieldRule {
        name: "number_of_babies",
        classify: |r| classify_int(r.number_of_babies.as_ref(), number_of_babies),
    },
];

/// Score every administrative field of a record
#[must_use]
pub fn score_fields(record: &EpisodeRecord) -> CheckScores {
    FIELD_RULES
        .iter()
        .map(|rule| CheckScore::new(rule.name, Tier::Field, (rule.classify)(record)))
        .collect()
}

fn classify_date(value: Option<&FieldValue>) -> Score {
    match value {
        None => Score::Blank,
        Some(value) if value.as_date().is_none() => Score::Illegal,
        Some(_) => Score::Valid,
    }
}

fn admission_date(record: &EpisodeRecord) -> Score {
    let Some(value) = record.admission_date.as_ref() else {
        return Score::Blank;
    };
    let Some(date) = value.as_date() else {
        return Score::Illegal;
    };
    match record.record_year() {
        Some(year) if date.year() != year => Score::Infeasible,
        _ => Score::Valid,
    }
}

fn date_of_birth(record: &EpisodeRecord) -> Score {
    let Some(value) = record.date_of_birth.as_ref() else {
        return Score::Blank;
    };
    let Some(date) = value.as_date() else {
        return Score::Illegal;
    };
    // Widened so extreme years cannot overflow.
    match record.record_year() {
        Some(year)
            if i64::from(year) - i64::from(date.year()) >= i64::from(IMPLAUSIBLE_MATERNAL_AGE) =>
        {
            Score::Infeasible
        }
        _ => Score::Valid,
    }
}

fn ethnicity(value: Option<&FieldValue>) -> Score {
    let Some(value) = value else {
        return Score::Blank;
    };
    let token = value.token();
    let token = token.as_str();
    if ETHNICITY_NOT_KNOWN.contains(&token) {
        Score::Unknown
    } else if ETHNICITY_NOT_STATED.contains(&token) {
        Score::NotSpecified
    } else if ETHNICITY_OTHER.contains(&token) {
        Score::Other
    } else if ETHNICITY_SUBSTANTIVE.contains(&token) {
        Score::Valid
    } else {
        Score::Illegal
    }
}

fn mother_sex(code: i64) -> Score {
    match code {
        1 => Score::Infeasible,
        0 => Score::Unknown,
        9 => Score::NotSpecified,
        2 => Score::Valid,
        _ => Score::Illegal,
    }
}

fn episode_type(code: i64) -> Score {
    match code {
        1..=6 => Score::Valid,
        _ => Score::Illegal,
    }
}

fn episode_order(code: i64) -> Score {
    match code {
        99 => Score::Unknown,
        98 => Score::NotSpecified,
        1..=87 => Score::Valid,
        _ => Score::Illegal,
    }
}

fn maternal_age(age: i64) -> Score {
    if age < 0 || MATERNAL_AGE_SENTINELS.contains(&age) {
        Score::Illegal
    } else {
        Score::Valid
    }
}

fn number_of_babies(count: i64) -> Score {
    match count {
        9 => Score::Unknown,
        6 => Score::Infeasible,
        1..=5 => Score::Valid,
        _ => Score::Illegal,
    }
}
