//! Record family detection
//!
//! Groups episode records into duplicate-candidate families and derives the
//! completeness and keep flags for every member. This is a blocking step: all
//! records must be present before any family can be closed.

use std::time::Instant;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::models::{EpisodeRecord, FamilyAnnotation, FamilyAssignment, FamilyKey};

/// Member indices of one family, in input order
type Members = SmallVec<[usize; 4]>;

/// Assign every record to a family and annotate it
///
/// Members are ordered by their position in `records`. A record with a blank
/// family-key field is placed in its own family.
#[must_use]
pub fn detect_families(records: &[EpisodeRecord]) -> FamilyAssignment {
    let start = Instant::now();

    let mut family_of_key: FxHashMap<FamilyKey, usize> = FxHashMap::default();
    let mut families: Vec<Members> = Vec::new();
    let mut unlinked = 0usize;

    for (index, record) in records.iter().enumerate() {
        match FamilyKey::from_record(record) {
            Some(key) => {
                let family_id = *family_of_key.entry(key).or_insert_with(|| {
                    families.push(Members::new());
                    families.len() - 1
                });
                families[family_id].push(index);
            }
            None => {
                unlinked += 1;
                families.push(SmallVec::from_elem(index, 1));
            }
        }
    }

    if unlinked > 0 {
        log::warn!("{unlinked} records have a blank family-key field and were left unlinked");
    }

    let completeness: Vec<usize> = records.iter().map(EpisodeRecord::completeness).collect();
    let mut annotations: Vec<Option<FamilyAnnotation>> = vec![None; records.len()];

    for (family_id, members) in families.iter().enumerate() {
        let family_size = members.len();
        let max_filled = members
            .iter()
            .map(|&i| completeness[i])
            .max()
            .unwrap_or_default();

        for (position, &index) in members.iter().enumerate() {
            annotations[index] = Some(FamilyAnnotation {
                key: records[index].key,
                family_id,
                family_size,
                completeness: completeness[index],
                is_duplicate: family_size > 1,
                keep_first: position == 0,
                keep_max_filled: completeness[index] == max_filled,
            });
        }
    }

    let assignment = FamilyAssignment {
        annotations: annotations.into_iter().flatten().collect(),
        family_count: families.len(),
    };

    log::info!(
        "Grouped {} records into {} families ({} duplicates) in {:?}",
        records.len(),
        assignment.family_count,
        assignment.duplicate_count(),
        start.elapsed()
    );

    assignment
}
