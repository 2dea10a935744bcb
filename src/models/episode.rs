//! Maternity episode records
//!
//! This module contains the in-memory representation of one maternity episode
//! after field normalization, together with its baby slots and the key that
//! identifies it within a run.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum number of baby slots carried on an episode
pub const MAX_BABY_SLOTS: usize = 3;

/// Number-of-babies code for "not known"
pub const BABY_COUNT_NOT_KNOWN: i64 = 9;

/// A normalized field value
///
/// Values are classified, not cast: a `Text` value in a numeric field is kept so
/// the rule evaluators can score it as illegal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldValue {
    /// Integer code or measurement
    Int(i64),
    /// Calendar date
    Date(NaiveDate),
    /// Anything else, passed through verbatim
    Text(String),
}

impl FieldValue {
    /// Integer view of the value, if it is one
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Date view of the value, if it is one
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// Token view used for code lists that mix letters and digits
    #[must_use]
    pub fn token(&self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::Date(date) => date.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Date(date) => write!(f, "{date}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Unique key of an episode: the data year plus the row index within that year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    /// Data year (`None` when the year field was blank or not a valid year)
    pub year: Option<i32>,
    /// Row index within the year
    pub row: usize,
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{year}/{}", self.row),
            None => write!(f, "-/{}", self.row),
        }
    }
}

/// Fields of one delivered baby
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BabySlot {
    /// Baby's date of birth
    pub birth_date: Option<FieldValue>,
    /// Resuscitation method code
    pub resuscitation_method: Option<FieldValue>,
    /// Status of the person conducting the delivery
    pub delivery_status: Option<FieldValue>,
    /// Birth order within the maternity
    pub birth_order: Option<FieldValue>,
    /// Birth status (live or still birth)
    pub birth_status: Option<FieldValue>,
    /// Birth weight in grams
    pub birth_weight: Option<FieldValue>,
    /// Delivery method code
    pub delivery_method: Option<FieldValue>,
    /// Delivery place code
    pub delivery_place: Option<FieldValue>,
    /// Gestational age in completed weeks
    pub gestation_weeks: Option<FieldValue>,
    /// Sex of the baby
    pub baby_sex: Option<FieldValue>,
}

impl BabySlot {
    /// Number of fields in a slot
    pub const FIELD_COUNT: usize = 10;

    /// All slot fields in declaration order
    #[must_use]
    pub fn fields(&self) -> [&Option<FieldValue>; Self::FIELD_COUNT] {
        [
            &self.birth_date,
            &self.resuscitation_method,
            &self.delivery_status,
            &self.birth_order,
            &self.birth_status,
            &self.birth_weight,
            &self.delivery_method,
            &self.delivery_place,
            &self.gestation_weeks,
            &self.baby_sex,
        ]
    }

    /// Number of populated fields
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.fields().iter().filter(|value| value.is_some()).count()
    }
}

/// A normalized maternity episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Year and row index identifying this record
    pub key: RecordKey,
    /// Data year as recorded
    pub year: Option<FieldValue>,
    /// Pseudonymised subject (mother) identifier
    pub subject_id: Option<FieldValue>,
    /// Provider site code
    pub site_code: Option<FieldValue>,
    /// Episode start date
    pub episode_start: Option<FieldValue>,
    /// Episode end date
    pub episode_end: Option<FieldValue>,
    /// Episode order within the spell
    pub episode_order: Option<FieldValue>,
    /// Admission date
    pub admission_date: Option<FieldValue>,
    /// Mother's date of birth
    pub date_of_birth: Option<FieldValue>,
    /// Ethnic category code
    pub ethnicity: Option<FieldValue>,
    /// Mother's sex code
    pub sex: Option<FieldValue>,
    /// Episode type code
    pub episode_type: Option<FieldValue>,
    /// Mother's age at delivery
    pub maternal_age: Option<FieldValue>,
    /// Number of babies delivered
    pub number_of_babies: Option<FieldValue>,
    /// Baby slots 1 to 3
    pub babies: [BabySlot; MAX_BABY_SLOTS],
}

impl EpisodeRecord {
    /// Number of administrative fields
    pub const ADMIN_FIELD_COUNT: usize = 13;

    /// Total number of fields counted for completeness
    pub const TOTAL_FIELD_COUNT: usize =
        Self::ADMIN_FIELD_COUNT + MAX_BABY_SLOTS * BabySlot::FIELD_COUNT;

    /// Create an empty record for the given key
    #[must_use]
    pub fn new(key: RecordKey) -> Self {
        Self {
            key,
            year: key.year.map(|year| FieldValue::Int(i64::from(year))),
            subject_id: None,
            site_code: None,
            episode_start: None,
            episode_end: None,
            episode_order: None,
            admission_date: None,
            date_of_birth: None,
            ethnicity: None,
            sex: None,
            episode_type: None,
            maternal_age: None,
            number_of_babies: None,
            babies: Default::default(),
        }
    }

    /// Administrative fields in declaration order
    #[must_use]
    pub fn admin_fields(&self) -> [&Option<FieldValue>; Self::ADMIN_FIELD_COUNT] {
        [
            &self.year,
            &self.subject_id,
            &self.site_code,
            &self.episode_start,
            &self.episode_end,
            &self.episode_order,
            &self.admission_date,
            &self.date_of_birth,
            &self.ethnicity,
            &self.sex,
            &self.episode_type,
            &self.maternal_age,
            &self.number_of_babies,
        ]
    }

    /// Count of non-null fields across the full field set, baby slots included
    #[must_use]
    pub fn completeness(&self) -> usize {
        let admin = self
            .admin_fields()
            .iter()
            .filter(|value| value.is_some())
            .count();
        let slots: usize = self.babies.iter().map(BabySlot::filled_count).sum();
        admin + slots
    }

    /// Calendar year the record belongs to, used for date comparisons
    #[must_use]
    pub fn record_year(&self) -> Option<i32> {
        self.key.year
    }

    /// Admission date, if it parsed as a date
    #[must_use]
    pub fn admission(&self) -> Option<NaiveDate> {
        self.admission_date.as_ref().and_then(FieldValue::as_date)
    }

    /// Number of babies as a usable count
    ///
    /// Returns `None` for blanks, non-integers and the "not known" code.
    #[must_use]
    pub fn baby_count(&self) -> Option<i64> {
        match self.number_of_babies.as_ref().and_then(FieldValue::as_int) {
            Some(BABY_COUNT_NOT_KNOWN) | None => None,
            Some(n) => Some(n),
        }
    }
}
