//! Inter-record rules
//!
//! The duplicate check reads the family assignment. The birth-interval check
//! orders each subject's episodes by admission date and compares every episode
//! with its predecessor; subjects are independent and are scanned in parallel.

use chrono::NaiveDate;
use itertools::Itertools;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::intra::LIVE_BIRTH;
use crate::models::{
    CheckScore, CheckScores, EpisodeRecord, FamilyAssignment, FieldValue, MAX_BABY_SLOTS,
    RecordKey, Score, Tier,
};

/// Name of the duplicate check
pub const DUPLICATE: &str = "duplicate";
/// Name of the birth-interval check
pub const BIRTH_INTERVAL: &str = "birth_interval";

/// Inter-record checks in registry order
pub static INTER_CHECKS: [&str; 2] = [DUPLICATE, BIRTH_INTERVAL];

/// Intervals shorter than this many weeks are infeasible
const INFEASIBLE_INTERVAL_WEEKS: i64 = 23;
/// Intervals up to and including this many weeks are doubtful
const DOUBTFUL_INTERVAL_WEEKS: i64 = 25;

/// Whether every populated baby slot up to the number of babies is a live birth
#[must_use]
pub fn yielded_all_live_births(record: &EpisodeRecord) -> bool {
    match record.baby_count() {
        Some(count) if count >= 1 => record
            .babies
            .iter()
            .take(usize::try_from(count).map_or(MAX_BABY_SLOTS, |n| n.min(MAX_BABY_SLOTS)))
            .all(|baby| {
                baby.birth_status.as_ref().and_then(FieldValue::as_int) == Some(LIVE_BIRTH)
            }),
        _ => false,
    }
}

/// Whole weeks between two admissions
#[must_use]
pub fn weeks_between(previous: NaiveDate, current: NaiveDate) -> i64 {
    (current - previous).num_days().div_euclid(7)
}

/// Score an interval in whole weeks
#[must_use]
pub fn classify_interval(weeks: i64) -> Score {
    if weeks < INFEASIBLE_INTERVAL_WEEKS {
        Score::Infeasible
    } else if weeks <= DOUBTFUL_INTERVAL_WEEKS {
        Score::Doubtful
    } else {
        Score::Valid
    }
}

/// Birth-interval score for every record, aligned with `records`
///
/// Records without a subject identifier or a parseable admission date take no
/// part in the ordering and score as inapplicable.
#[must_use]
pub fn birth_interval_scores(records: &[EpisodeRecord], parallel: bool) -> Vec<Score> {
    let by_subject: Vec<Vec<(NaiveDate, usize)>> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let subject = record.subject_id.as_ref()?;
            let admitted = record.admission()?;
            Some((subject, (admitted, index)))
        })
        .into_group_map()
        .into_values()
        .collect();

    let scan = |episodes: &Vec<(NaiveDate, usize)>| -> Vec<(usize, Score)> {
        let ordered: Vec<_> = episodes.iter().copied().sorted().collect();
        ordered
            .iter()
            .enumerate()
            .map(|(position, &(admitted, index))| {
                let score = match position.checked_sub(1).map(|p| ordered[p]) {
                    Some((previous, _)) if yielded_all_live_births(&records[index]) => {
                        classify_interval(weeks_between(previous, admitted))
                    }
                    _ => Score::Valid,
                };
                (index, score)
            })
            .collect()
    };

    let scored: Vec<(usize, Score)> = if parallel {
        by_subject.par_iter().flat_map(scan).collect()
    } else {
        by_subject.iter().flat_map(scan).collect()
    };

    let mut scores = vec![Score::Valid; records.len()];
    for (index, score) in scored {
        scores[index] = score;
    }
    scores
}

/// Inter-record checks for every record, aligned with `records`
///
/// `families` must come from [`detect_families`](crate::algorithm::family::detect_families)
/// over the same records.
#[must_use]
pub fn score_inter_record_aligned(
    records: &[EpisodeRecord],
    families: &FamilyAssignment,
    parallel: bool,
) -> Vec<CheckScores> {
    let intervals = birth_interval_scores(records, parallel);
    intervals
        .into_iter()
        .enumerate()
        .map(|(index, interval)| {
            let duplicate = match families.get(index) {
                Some(annotation) if annotation.is_duplicate => Score::Illegal,
                _ => Score::Valid,
            };
            vec![
                CheckScore::new(DUPLICATE, Tier::Inter, duplicate),
                CheckScore::new(BIRTH_INTERVAL, Tier::Inter, interval),
            ]
        })
        .collect()
}

/// Inter-record checks keyed by record
#[must_use]
pub fn score_inter_record(
    records: &[EpisodeRecord],
    families: &FamilyAssignment,
) -> FxHashMap<RecordKey, CheckScores> {
    records
        .iter()
        .map(|record| record.key)
        .zip(score_inter_record_aligned(records, families, true))
        .collect()
}
