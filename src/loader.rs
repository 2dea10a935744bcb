//! Delimited-file loading utilities
//!
//! Reads headered CSV files into raw episode records. Column names follow
//! [`crate::normalize::columns`]; unknown columns are carried along and ignored
//! by normalization. Row indices are assigned per year in file order.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use rustc_hash::FxHashMap;

use crate::error::{Result, ScoringError};
use crate::normalize::RawEpisodeRecord;
use crate::normalize::columns::{ADMIN_COLUMNS, YEAR, is_known_column};
use crate::utils::logging::{log_operation_complete, log_warning};

/// Administrative columns absent from a header row, in record order
#[must_use]
pub fn missing_admin_columns(headers: &[String]) -> Vec<&'static str> {
    ADMIN_COLUMNS
        .into_iter()
        .filter(|column| !headers.iter().any(|header| header == column))
        .collect()
}

fn check_headers(headers: &[String]) -> Result<()> {
    let missing = missing_admin_columns(headers);
    if missing.contains(&YEAR) {
        return Err(ScoringError::InvalidInput(format!("missing '{YEAR}' column")));
    }
    if !missing.is_empty() {
        log::warn!(
            "Input lacks columns {}; those fields will score as blank",
            missing.join(", ")
        );
    }

    let unknown: Vec<&str> = headers
        .iter()
        .map(String::as_str)
        .filter(|header| !is_known_column(header))
        .collect();
    if !unknown.is_empty() {
        log::debug!("Ignoring unrecognised columns: {}", unknown.join(", "));
    }
    Ok(())
}

/// Read raw episode records from any CSV source
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawEpisodeRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();
    check_headers(&headers)?;

    let mut rows_per_year: FxHashMap<Option<i32>, usize> = FxHashMap::default();
    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        let mut record = RawEpisodeRecord::new(0);
        for (header, value) in headers.iter().zip(row.iter()) {
            record.values.insert(header.clone(), value.to_string());
        }

        // Rows are counted under the year the record is keyed by, not the raw text.
        let index = rows_per_year.entry(record.key_year()).or_insert(0);
        record.row = *index;
        *index += 1;
        records.push(record);
    }

    Ok(records)
}

/// Read raw episode records from a CSV file
pub fn load_csv(path: &Path) -> Result<Vec<RawEpisodeRecord>> {
    let start = Instant::now();
    log::info!("Reading episode records from {}", path.display());

    let file = File::open(path).map_err(|e| {
        log_warning("Failed to open episode file", Some(path));
        ScoringError::Io(e)
    })?;
    let records = read_csv(file)?;

    if records.is_empty() {
        log_warning("No episode records found", Some(path));
    }
    log_operation_complete("read", records.len(), Some(start.elapsed()));
    Ok(records)
}
