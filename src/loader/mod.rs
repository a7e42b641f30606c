//! CSV record loader.
//!
//! This module turns a delimited survey file into typed [`Record`]s,
//! coercing the numeric and year columns and normalizing blank and `NA`
//! cells to the missing marker.

use crate::models::Record;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Token that marks a missing cell (compared case-insensitively).
pub const MISSING_TOKEN: &str = "NA";

/// Errors that abort a load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input exists but could not be opened.
    #[error("Failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not well-formed CSV.
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A numeric column holds non-numeric text.
    #[error("Line {line}, column '{column}': invalid number '{value}'")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },

    /// The year column holds something that is not an integer.
    #[error("Line {line}, column '{column}': invalid year '{value}'")]
    InvalidYear {
        line: u64,
        column: String,
        value: String,
    },
}

/// Which record slot a header column feeds.
#[derive(Debug, Clone, PartialEq)]
enum Column {
    /// Unnamed column (e.g. a spreadsheet index), ignored.
    Skip,
    Species,
    Island,
    Sex,
    BillLength,
    BillDepth,
    FlipperLength,
    BodyMass,
    Year,
    Extra(String),
}

impl Column {
    fn from_header(name: &str) -> Self {
        match name {
            "" => Column::Skip,
            "species" => Column::Species,
            "island" => Column::Island,
            "sex" => Column::Sex,
            "bill_length_mm" => Column::BillLength,
            "bill_depth_mm" => Column::BillDepth,
            "flipper_length_mm" => Column::FlipperLength,
            "body_mass_g" => Column::BodyMass,
            "year" => Column::Year,
            other => Column::Extra(other.to_string()),
        }
    }
}

/// Load all records from a CSV file.
///
/// A path that does not resolve to a file is logged and yields an empty
/// vector. Callers must treat an empty result as "no data loaded".
pub fn load_records(path: &Path) -> Result<Vec<Record>, LoadError> {
    if !path.is_file() {
        warn!("Input file not found: {}", path.display());
        return Ok(Vec::new());
    }

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_records(file)?;
    debug!("Loaded {} records from {}", records.len(), path.display());

    Ok(records)
}

/// Parse records from any CSV source with a header row.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<Record>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns: Vec<(Column, &str)> = headers
        .iter()
        .map(|name| (Column::from_header(name), name))
        .collect();

    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        let mut record = Record::default();

        for (index, (column, name)) in columns.iter().enumerate() {
            // Short rows: absent trailing cells count as blank
            let cell = row.get(index).unwrap_or("");

            match column {
                Column::Skip => {}
                Column::Species => record.species = categorical(cell),
                Column::Island => record.island = categorical(cell),
                Column::Sex => record.sex = categorical(cell),
                Column::BillLength => record.bill_length_mm = numeric(cell, line, name)?,
                Column::BillDepth => record.bill_depth_mm = numeric(cell, line, name)?,
                Column::FlipperLength => {
                    record.flipper_length_mm = numeric(cell, line, name)?
                }
                Column::BodyMass => record.body_mass_g = numeric(cell, line, name)?,
                Column::Year => record.year = year(cell, line, name)?,
                Column::Extra(key) => {
                    record.extra.insert(key.clone(), categorical(cell));
                }
            }
        }

        records.push(record);
    }

    Ok(records)
}

/// Whether a cell is blank or the missing-value token.
pub fn is_missing(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(MISSING_TOKEN)
}

fn categorical(cell: &str) -> String {
    if is_missing(cell) {
        String::new()
    } else {
        cell.to_string()
    }
}

fn numeric(cell: &str, line: u64, column: &str) -> Result<Option<f64>, LoadError> {
    if is_missing(cell) {
        return Ok(None);
    }

    cell.trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|_| LoadError::InvalidNumber {
            line,
            column: column.to_string(),
            value: cell.to_string(),
        })
}

fn year(cell: &str, line: u64, column: &str) -> Result<Option<i32>, LoadError> {
    if is_missing(cell) {
        return Ok(None);
    }

    cell.trim()
        .parse::<i32>()
        .map(Some)
        .map_err(|_| LoadError::InvalidYear {
            line,
            column: column.to_string(),
            value: cell.to_string(),
        })
}
