//! Check scores and the scoring scale
//!
//! Every check resolves to one value of the eight-step scoring scale. Lower
//! values are worse; 8 is either a valid value or a correctly blank field.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The eight-step scoring scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Score {
    /// Illegal value, or a populated field that must be blank
    Illegal = 1,
    /// Medically infeasible value
    Infeasible = 2,
    /// Blank where a value is expected
    Blank = 3,
    /// Recorded as "not known"
    Unknown = 4,
    /// Not specified or not applicable
    NotSpecified = 5,
    /// Recorded as "other"
    Other = 6,
    /// Valid but doubtful
    Doubtful = 7,
    /// Any other valid value, or correctly blank
    Valid = 8,
}

impl Score {
    /// Highest value on the scale
    pub const MAX: u32 = 8;

    /// Numeric value in 1..=8
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Parse a numeric scale value
    #[must_use]
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Illegal),
            2 => Some(Self::Infeasible),
            3 => Some(Self::Blank),
            4 => Some(Self::Unknown),
            5 => Some(Self::NotSpecified),
            6 => Some(Self::Other),
            7 => Some(Self::Doubtful),
            8 => Some(Self::Valid),
            _ => None,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Rule tier a check belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Looks at one field in isolation
    Field,
    /// Looks at several fields of the same record
    Intra,
    /// Looks at other records
    Inter,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Field => "field",
            Self::Intra => "intra",
            Self::Inter => "inter",
        };
        f.write_str(label)
    }
}

/// Name of a check, e.g. `ethnicity` or `birth_weight_2`
pub type CheckName = String;

/// One evaluated check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckScore {
    /// Check name
    pub name: CheckName,
    /// Tier of the check
    pub tier: Tier,
    /// Score on the scale
    pub score: Score,
}

impl CheckScore {
    /// Create a check score
    #[must_use]
    pub fn new(name: impl Into<CheckName>, tier: Tier, score: Score) -> Self {
        Self {
            name: name.into(),
            tier,
            score,
        }
    }
}

/// All checks evaluated for one record, in registry order
pub type CheckScores = Vec<CheckScore>;

/// Look up a check by name
#[must_use]
pub fn find_score(scores: &[CheckScore], name: &str) -> Option<Score> {
    scores
        .iter()
        .find(|check| check.name == name)
        .map(|check| check.score)
}
