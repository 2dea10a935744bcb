//! Test utilities for testing and benchmarking
//!
//! Episode fixtures live in [`crate::utils::sample`].

pub mod helpers;

// Re-export commonly used functions for convenience
pub use helpers::{scores_by_name, timed_execution};
