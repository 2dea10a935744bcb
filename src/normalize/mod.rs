//! Field normalization
//!
//! Turns raw, string-valued records into [`EpisodeRecord`]s. Normalization never
//! fails: blanks become `None`, a handful of tokens are remapped and everything
//! else is passed through for the rule evaluators to classify.

pub mod columns;

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use crate::models::{BabySlot, EpisodeRecord, FieldValue, MAX_BABY_SLOTS, RecordKey};

/// Episode order sentinel for "not applicable"
pub const EPISODE_ORDER_NOT_APPLICABLE: i64 = 98;
/// Birth order sentinel for "not known"
pub const BIRTH_ORDER_NOT_KNOWN: i64 = 9;

/// Date formats accepted for date columns, tried in order
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y%m%d"];

/// A raw record as delivered by an ingestion collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEpisodeRecord {
    /// Row index within the record's year
    pub row: usize,
    /// Raw values keyed by column name
    pub values: FxHashMap<String, String>,
}

impl RawEpisodeRecord {
    /// Create an empty raw record
    #[must_use]
    pub fn new(row: usize) -> Self {
        Self {
            row,
            values: FxHashMap::default(),
        }
    }

    /// Set a column value
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Set a baby-slot column value
    #[must_use]
    pub fn with_slot(self, column: &str, slot: usize, value: impl Into<String>) -> Self {
        self.with(columns::slot_column(column, slot), value)
    }

    /// Raw value of a column
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Year the record will be keyed under once normalized
    ///
    /// Blank, non-numeric and out-of-range years all key as `None`.
    #[must_use]
    pub fn key_year(&self) -> Option<i32> {
        code_value(self.get(columns::YEAR))
            .as_ref()
            .and_then(FieldValue::as_int)
            .and_then(|value| i32::try_from(value).ok())
    }
}

/// Trim a raw value, mapping blanks to `None`
fn clean(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

/// Keep an identifier as trimmed text, without numeric coercion
fn text_value(raw: Option<&str>) -> Option<FieldValue> {
    clean(raw).map(|value| FieldValue::Text(value.to_string()))
}

/// Parse a code or measurement: integers become `Int`, anything else `Text`
fn code_value(raw: Option<&str>) -> Option<FieldValue> {
    let value = clean(raw)?;
    Some(match value.parse::<i64>() {
        Ok(number) => FieldValue::Int(number),
        Err(_) => FieldValue::Text(value.to_string()),
    })
}

/// Parse a date: recognised formats become `Date`, anything else `Text`
fn date_value(raw: Option<&str>) -> Option<FieldValue> {
    let value = clean(raw)?;
    let parsed = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok());
    Some(match parsed {
        Some(date) => FieldValue::Date(date),
        None => FieldValue::Text(value.to_string()),
    })
}

/// Map the sex tokens M/F/U onto their numeric codes
fn sex_value(raw: Option<&str>) -> Option<FieldValue> {
    match clean(raw) {
        Some("M") => Some(FieldValue::Int(1)),
        Some("F") => Some(FieldValue::Int(2)),
        Some("U") => Some(FieldValue::Int(0)),
        other => code_value(other),
    }
}

fn episode_order_value(raw: Option<&str>) -> FieldValue {
    code_value(raw).unwrap_or(FieldValue::Int(EPISODE_ORDER_NOT_APPLICABLE))
}

fn birth_order_value(raw: Option<&str>) -> Option<FieldValue> {
    match clean(raw) {
        Some("X") => Some(FieldValue::Int(BIRTH_ORDER_NOT_KNOWN)),
        other => code_value(other),
    }
}

fn normalize_slot(raw: &RawEpisodeRecord, slot: usize) -> BabySlot {
    let get = |column: &str| raw.get(&columns::slot_column(column, slot));
    BabySlot {
        birth_date: date_value(get(columns::BIRTH_DATE)),
        resuscitation_method: code_value(get(columns::RESUSCITATION_METHOD)),
        delivery_status: code_value(get(columns::DELIVERY_STATUS)),
        birth_order: birth_order_value(get(columns::BIRTH_ORDER)),
        birth_status: code_value(get(columns::BIRTH_STATUS)),
        birth_weight: code_value(get(columns::BIRTH_WEIGHT)),
        delivery_method: code_value(get(columns::DELIVERY_METHOD)),
        delivery_place: code_value(get(columns::DELIVERY_PLACE)),
        gestation_weeks: code_value(get(columns::GESTATION_WEEKS)),
        baby_sex: sex_value(get(columns::BABY_SEX)),
    }
}

/// Normalize one raw record
#[must_use]
pub fn normalize(raw: &RawEpisodeRecord) -> EpisodeRecord {
    let year = code_value(raw.get(columns::YEAR));
    let key = RecordKey {
        year: raw.key_year(),
        row: raw.row,
    };

    let babies: [BabySlot; MAX_BABY_SLOTS] = std::array::from_fn(|i| normalize_slot(raw, i + 1));

    EpisodeRecord {
        key,
        year,
        subject_id: text_value(raw.get(columns::SUBJECT_ID)),
        site_code: text_value(raw.get(columns::SITE_CODE)),
        episode_start: date_value(raw.get(columns::EPISODE_START)),
        episode_end: date_value(raw.get(columns::EPISODE_END)),
        episode_order: Some(episode_order_value(raw.get(columns::EPISODE_ORDER))),
        admission_date: date_value(raw.get(columns::ADMISSION_DATE)),
        date_of_birth: date_value(raw.get(columns::DATE_OF_BIRTH)),
        ethnicity: code_value(raw.get(columns::ETHNICITY)),
        sex: sex_value(raw.get(columns::SEX)),
        episode_type: code_value(raw.get(columns::EPISODE_TYPE)),
        maternal_age: code_value(raw.get(columns::MATERNAL_AGE)),
        number_of_babies: code_value(raw.get(columns::NUMBER_OF_BABIES)),
        babies,
    }
}

/// Normalize a batch of raw records, preserving order
#[must_use]
pub fn normalize_all(raw: &[RawEpisodeRecord]) -> Vec<EpisodeRecord> {
    raw.iter().map(normalize).collect()
}
