//! Record family representation
//!
//! A family is a cluster of episode records believed to describe the same
//! underlying episode. Families are keyed on the subject, site, episode dates and
//! episode order; every record belongs to exactly one family.

use serde::{Deserialize, Serialize};

use super::episode::{EpisodeRecord, FieldValue, RecordKey};

/// Grouping key shared by all members of a family
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FamilyKey {
    /// Subject identifier
    pub subject_id: FieldValue,
    /// Site code
    pub site_code: FieldValue,
    /// Episode start
    pub episode_start: FieldValue,
    /// Episode end
    pub episode_end: FieldValue,
    /// Episode order
    pub episode_order: FieldValue,
}

impl FamilyKey {
    /// Build the key for a record
    ///
    /// Returns `None` when any key field is blank; such a record cannot be linked
    /// reliably and forms its own family.
    #[must_use]
    pub fn from_record(record: &EpisodeRecord) -> Option<Self> {
        Some(Self {
            subject_id: record.subject_id.clone()?,
            site_code: record.site_code.clone()?,
            episode_start: record.episode_start.clone()?,
            episode_end: record.episode_end.clone()?,
            episode_order: record.episode_order.clone()?,
        })
    }
}

/// Derived family attributes attached to one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyAnnotation {
    /// Record the annotation belongs to
    pub key: RecordKey,
    /// Family identifier, assigned in order of first appearance
    pub family_id: usize,
    /// Number of records in the family
    pub family_size: usize,
    /// Count of non-null fields on the record
    pub completeness: usize,
    /// Whether the family has more than one member
    pub is_duplicate: bool,
    /// Set on the first member of the family only
    pub keep_first: bool,
    /// Set on every member whose completeness equals the family maximum
    pub keep_max_filled: bool,
}

/// Family annotations for a whole run, aligned with the input record order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FamilyAssignment {
    /// One annotation per input record, in input order
    pub annotations: Vec<FamilyAnnotation>,
    /// Number of distinct families
    pub family_count: usize,
}

impl FamilyAssignment {
    /// Annotation for the record at `index` in the input order
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FamilyAnnotation> {
        self.annotations.get(index)
    }

    /// Number of records flagged as duplicates
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.annotations.iter().filter(|a| a.is_duplicate).count()
    }

    /// Members of a family in family order
    pub fn members(&self, family_id: usize) -> impl Iterator<Item = &FamilyAnnotation> {
        self.annotations
            .iter()
            .filter(move |annotation| annotation.family_id == family_id)
    }
}
