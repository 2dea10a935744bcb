//! Utility functions for logging, progress reporting, sample episodes and test helpers

pub mod logging;
pub mod sample;
pub mod test;

pub use logging::{log_operation_complete, log_operation_start, log_warning};
