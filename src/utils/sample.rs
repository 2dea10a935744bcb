//! Sample episodes
//!
//! Used by the command line when no input file is given, and by tests. A clean
//! single live birth that scores the maximum on every check, plus a small
//! sample run covering the scenarios the engine is expected to catch.

use crate::models::EpisodeRecord;
use crate::normalize::columns::*;
use crate::normalize::{RawEpisodeRecord, normalize_all};

/// A clean singleton episode for one subject admitted on `admission_date`
///
/// The admission date is used for the episode start, end and baby birth date
/// as well, so every field-level and intra-record check scores 8.
#[must_use]
pub fn raw_episode(row: usize, subject: &str, admission_date: &str) -> RawEpisodeRecord {
    RawEpisodeRecord::new(row)
        .with(YEAR, &admission_date[..4])
        .with(SUBJECT_ID, subject)
        .with(SITE_CODE, "RX1")
        .with(EPISODE_START, admission_date)
        .with(EPISODE_END, admission_date)
        .with(EPISODE_ORDER, "1")
        .with(ADMISSION_DATE, admission_date)
        .with(DATE_OF_BIRTH, "1990-05-17")
        .with(ETHNICITY, "A")
        .with(SEX, "F")
        .with(EPISODE_TYPE, "1")
        .with(MATERNAL_AGE, "29")
        .with(NUMBER_OF_BABIES, "1")
        .with_slot(BIRTH_DATE, 1, admission_date)
        .with_slot(RESUSCITATION_METHOD, 1, "1")
        .with_slot(DELIVERY_STATUS, 1, "1")
        .with_slot(BIRTH_ORDER, 1, "1")
        .with_slot(BIRTH_STATUS, 1, "1")
        .with_slot(BIRTH_WEIGHT, 1, "3400")
        .with_slot(DELIVERY_METHOD, 1, "0")
        .with_slot(DELIVERY_PLACE, 1, "2")
        .with_slot(GESTATION_WEEKS, 1, "39")
        .with_slot(BABY_SEX, 1, "2")
}

/// A small run exercising duplicates, short birth intervals, implausible
/// weights, an infeasible maternal sex and a stray second baby slot
#[must_use]
pub fn sample_raw_records() -> Vec<RawEpisodeRecord> {
    vec![
        // Triplicate admission: one family of three
        raw_episode(0, "S001", "2020-02-03"),
        raw_episode(1, "S001", "2020-02-03"),
        raw_episode(2, "S001", "2020-02-03").with(ETHNICITY, ""),
        // Two admissions five days apart, both live births
        raw_episode(3, "S002", "2020-04-01"),
        raw_episode(4, "S002", "2020-04-06"),
        // Female baby at 24 weeks weighing more than the band allows
        raw_episode(5, "S003", "2020-06-15")
            .with_slot(GESTATION_WEEKS, 1, "24")
            .with_slot(BIRTH_WEIGHT, 1, "950"),
        // Mother coded male
        raw_episode(6, "S004", "2020-07-20").with(SEX, "M"),
        // One baby, but the second slot is populated
        raw_episode(7, "S005", "2020-09-09")
            .with_slot(BIRTH_WEIGHT, 2, "3100")
            .with_slot(BABY_SEX, 2, "1"),
        // A clean record in the previous year
        raw_episode(0, "S006", "2019-11-11"),
        raw_episode(1, "S007", "2019-12-01").with(EPISODE_TYPE, "7"),
    ]
}

/// The sample run after normalization
#[must_use]
pub fn sample_records() -> Vec<EpisodeRecord> {
    normalize_all(&sample_raw_records())
}
