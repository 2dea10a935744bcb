//! Export of scoring results
//!
//! Score tables and family annotations are written as CSV, one row per record;
//! the yearly factor table is written as JSON.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::algorithm::engine::ScoringOutput;
use crate::error::Result;
use crate::models::RecordKey;
use crate::utils::logging::log_operation_complete;

/// File names written by [`write_all`]
pub const RAW_SCORES_FILE: &str = "raw_scores.csv";
pub const NORMALIZED_SCORES_FILE: &str = "normalized_scores.csv";
pub const FAMILIES_FILE: &str = "families.csv";
pub const YEARLY_FACTORS_FILE: &str = "yearly_factors.json";

fn key_fields(key: RecordKey) -> [String; 2] {
    [
        key.year.map(|year| year.to_string()).unwrap_or_default(),
        key.row.to_string(),
    ]
}

fn header<'a>(check_names: impl Iterator<Item = &'a str>) -> Vec<String> {
    ["year", "row"]
        .into_iter()
        .chain(check_names)
        .chain(std::iter::once("total_record_score"))
        .map(str::to_string)
        .collect()
}

/// Write the raw weighted score table
pub fn write_raw_scores<W: Write>(output: &ScoringOutput, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let names = output
        .raw
        .first()
        .map(|record| record.checks.iter().map(|c| c.name.as_str()).collect::<Vec<_>>())
        .unwrap_or_default();
    csv_writer.write_record(header(names.into_iter()))?;

    for record in &output.raw {
        let row = key_fields(record.key)
            .into_iter()
            .chain(record.checks.iter().map(|check| check.weighted.to_string()))
            .chain(std::iter::once(record.total_record_score.to_string()));
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the historically normalized score table
pub fn write_normalized_scores<W: Write>(output: &ScoringOutput, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let names = output
        .normalized
        .first()
        .map(|record| record.checks.iter().map(|c| c.name.as_str()).collect::<Vec<_>>())
        .unwrap_or_default();
    csv_writer.write_record(header(names.into_iter()))?;

    for record in &output.normalized {
        let row = key_fields(record.key)
            .into_iter()
            .chain(record.checks.iter().map(|check| format!("{:.4}", check.weighted)))
            .chain(std::iter::once(format!("{:.4}", record.total_record_score)));
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the family annotations
pub fn write_families<W: Write>(output: &ScoringOutput, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "year",
        "row",
        "family_id",
        "family_size",
        "completeness",
        "is_duplicate",
        "keep_first",
        "keep_max_filled",
    ])?;

    for annotation in &output.families.annotations {
        let row = key_fields(annotation.key).into_iter().chain([
            annotation.family_id.to_string(),
            annotation.family_size.to_string(),
            annotation.completeness.to_string(),
            annotation.is_duplicate.to_string(),
            annotation.keep_first.to_string(),
            annotation.keep_max_filled.to_string(),
        ]);
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the yearly factor table
pub fn write_yearly_factors<W: Write>(output: &ScoringOutput, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &output.yearly)?;
    Ok(())
}

/// Write every output artifact into `dir`, creating it if needed
pub fn write_all(output: &ScoringOutput, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let raw_path = dir.join(RAW_SCORES_FILE);
    write_raw_scores(output, File::create(&raw_path)?)?;
    let normalized_path = dir.join(NORMALIZED_SCORES_FILE);
    write_normalized_scores(output, File::create(&normalized_path)?)?;
    let families_path = dir.join(FAMILIES_FILE);
    write_families(output, File::create(&families_path)?)?;
    let yearly_path = dir.join(YEARLY_FACTORS_FILE);
    write_yearly_factors(output, File::create(&yearly_path)?)?;

    log_operation_complete("exported", output.len(), None);
    Ok(vec![raw_path, normalized_path, families_path, yearly_path])
}
