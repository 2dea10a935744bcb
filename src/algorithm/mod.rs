//! Scoring algorithm implementations
//!
//! This module contains the stages of the episode quality pipeline: family
//! detection, the rule tiers, weighting and normalization, and the engine that
//! runs them in order.

pub mod engine;
pub mod family;
pub mod rules;
pub mod statistics;
pub mod weighting;
