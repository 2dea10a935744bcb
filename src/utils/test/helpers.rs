//! Test helper functions
//!
//! This module provides utilities for testing and benchmarking.

use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

use crate::models::{CheckScore, Score};

/// Timed execution of a function
pub fn timed_execution<T, F>(func: F) -> (Duration, T)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = func();
    (start.elapsed(), result)
}

/// Index a record's check scores by name
#[must_use]
pub fn scores_by_name(scores: &[CheckScore]) -> FxHashMap<&str, Score> {
    scores
        .iter()
        .map(|check| (check.name.as_str(), check.score))
        .collect()
}
