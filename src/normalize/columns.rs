//! Column names of the raw episode layout
//!
//! Baby-slot columns carry a `_<slot>` suffix, e.g. `birth_weight_2`.

use crate::models::MAX_BABY_SLOTS;

pub const YEAR: &str = "year";
pub const SUBJECT_ID: &str = "subject_id";
pub const SITE_CODE: &str = "site_code";
pub const EPISODE_START: &str = "episode_start";
pub const EPISODE_END: &str = "episode_end";
pub const EPISODE_ORDER: &str = "episode_order";
pub const ADMISSION_DATE: &str = "admission_date";
pub const DATE_OF_BIRTH: &str = "date_of_birth";
pub const ETHNICITY: &str = "ethnicity";
pub const SEX: &str = "sex";
pub const EPISODE_TYPE: &str = "episode_type";
pub const MATERNAL_AGE: &str = "maternal_age";
pub const NUMBER_OF_BABIES: &str = "number_of_babies";

pub const BIRTH_DATE: &str = "birth_date";
pub const RESUSCITATION_METHOD: &str = "resuscitation_method";
pub const DELIVERY_STATUS: &str = "delivery_status";
pub const BIRTH_ORDER: &str = "birth_order";
pub const BIRTH_STATUS: &str = "birth_status";
pub const BIRTH_WEIGHT: &str = "birth_weight";
pub const DELIVERY_METHOD: &str = "delivery_method";
pub const DELIVERY_PLACE: &str = "delivery_place";
pub const GESTATION_WEEKS: &str = "gestation_weeks";
pub const BABY_SEX: &str = "baby_sex";

/// Administrative columns in record order
pub const ADMIN_COLUMNS: [&str; 13] = [
    YEAR,
    SUBJECT_ID,
    SITE_CODE,
    EPISODE_START,
    EPISODE_END,
    EPISODE_ORDER,
    ADMISSION_DATE,
    DATE_OF_BIRTH,
    ETHNICITY,
    SEX,
    EPISODE_TYPE,
    MATERNAL_AGE,
    NUMBER_OF_BABIES,
];

/// Baby-slot column stems in slot order
pub const SLOT_COLUMNS: [&str; 10] = [
    BIRTH_DATE,
    RESUSCITATION_METHOD,
    DELIVERY_STATUS,
    BIRTH_ORDER,
    BIRTH_STATUS,
    BIRTH_WEIGHT,
    DELIVERY_METHOD,
    DELIVERY_PLACE,
    GESTATION_WEEKS,
    BABY_SEX,
];

/// Column name of a slot field
#[must_use]
pub fn slot_column(stem: &str, slot: usize) -> String {
    format!("{stem}_{slot}")
}

/// Whether a column belongs to the episode layout
#[must_use]
pub fn is_known_column(name: &str) -> bool {
    ADMIN_COLUMNS.contains(&name)
        || (1..=MAX_BABY_SLOTS)
            .any(|slot| SLOT_COLUMNS.iter().any(|stem| slot_column(stem, slot) == name))
}
