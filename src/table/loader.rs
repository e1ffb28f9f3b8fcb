//! Load factor tables from CSV
//!
//! The header row must contain `interest_rate` and `n`; every other column is
//! taken as a factor column. Headers and cells are whitespace-trimmed, and all
//! cells are parsed up front so a bad table fails at load rather than at query time.

use super::data::{FactorRow, FactorTable, PERIOD_COLUMN, RATE_COLUMN};
use crate::error::DataSourceError;
use csv::{ReaderBuilder, Trim};
use log::{info, warn};
use std::collections::HashSet;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

/// Anything that can produce a factor table
pub trait FactorSource: Send + Sync {
    fn read_table(&self) -> Result<FactorTable, DataSourceError>;
}

/// CSV file on disk
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FactorSource for CsvFileSource {
    fn read_table(&self) -> Result<FactorTable, DataSourceError> {
        info!("Loading factor table from {}", self.path.display());
        load_table(&self.path)
    }
}

/// CSV text held in memory
#[derive(Debug, Clone)]
pub struct CsvTextSource {
    text: String,
}

impl CsvTextSource {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}

impl FactorSource for CsvTextSource {
    fn read_table(&self) -> Result<FactorTable, DataSourceError> {
        load_table_from_reader(self.text.as_bytes())
    }
}

/// A prebuilt table serves itself
impl FactorSource for FactorTable {
    fn read_table(&self) -> Result<FactorTable, DataSourceError> {
        Ok(self.clone())
    }
}

/// Load a factor table from a CSV file
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<FactorTable, DataSourceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataSourceError::NotFound {
            path: path.display().to_string(),
        },
        _ => DataSourceError::Read(format!("{}: {}", path.display(), e)),
    })?;
    load_table_from_reader(file)
}

/// Load a factor table from any reader (e.g., string buffer, network stream)
pub fn load_table_from_reader<R: Read>(reader: R) -> Result<FactorTable, DataSourceError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut seen = HashSet::new();
    for name in headers.iter() {
        if !seen.insert(name) {
            return Err(DataSourceError::DuplicateColumn(name.to_string()));
        }
    }

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataSourceError::MissingColumn(name.to_string()))
    };
    let rate_idx = column(RATE_COLUMN)?;
    let period_idx = column(PERIOD_COLUMN)?;

    let factor_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != rate_idx && *idx != period_idx)
        .map(|(idx, name)| (idx, name.to_string()))
        .collect();

    let mut rows = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result?;
        let row_number = row_idx + 1;

        let interest_rate = parse_value(&record[rate_idx], row_number, RATE_COLUMN)?;
        let n = parse_period(&record[period_idx], row_number)?;
        let values = factor_columns
            .iter()
            .map(|(idx, name)| parse_value(&record[*idx], row_number, name))
            .collect::<Result<Vec<_>, _>>()?;

        rows.push(FactorRow { interest_rate, n, values });
    }

    let table = FactorTable::new(
        factor_columns.into_iter().map(|(_, name)| name).collect(),
        rows,
    )?;

    let duplicates = table.duplicate_count();
    if duplicates > 0 {
        warn!(
            "Factor table has {} duplicate (interest_rate, n) rows; the first occurrence of each is used",
            duplicates
        );
    }
    info!(
        "Loaded {} factor rows ({} rates, {} factor columns)",
        table.len(),
        table.distinct_rates().len(),
        table.factor_columns().len()
    );

    Ok(table)
}

fn invalid(row: usize, column: &str, value: &str) -> DataSourceError {
    DataSourceError::InvalidCell {
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn parse_value(value: &str, row: usize, column: &str) -> Result<f64, DataSourceError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(row, column, value))
}

/// Periods are positive integers; spreadsheet exports sometimes write them as `3.0`
fn parse_period(value: &str, row: usize) -> Result<u32, DataSourceError> {
    let n = match value.parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => value
            .parse::<f64>()
            .ok()
            .filter(|v| v.fract() == 0.0 && *v >= 1.0 && *v <= f64::from(u32::MAX))
            .map(|v| v as u32),
    };
    n.filter(|n| *n >= 1)
        .ok_or_else(|| invalid(row, PERIOD_COLUMN, value))
}
