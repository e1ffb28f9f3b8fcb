//! Load-once lookup service over a factor table
//!
//! The table is read from its source on first use and kept for the lifetime of
//! the service. A failed load is kept too: every later call gets the same error
//! and the source is never re-read.

use crate::error::{DataSourceError, LookupError};
use crate::factors::{describe, FactorInfo};
use crate::table::{FactorSource, FactorTable};
use log::{debug, warn};
use serde::Serialize;
use std::sync::OnceLock;

/// A resolved factor lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorLookupResult {
    pub rate: f64,
    pub factor_type: String,
    pub period: i64,
    pub factor_value: f64,
    pub factor_info: FactorInfo,
}

/// Factor table lookups backed by a lazily loaded source
///
/// # Example
/// ```ignore
/// let lookup = FactorLookup::new(CsvFileSource::new("factors_table.xlsx.csv"));
/// let rates = lookup.list_available_rates()?;
/// let result = lookup.lookup(0.25, "F/P", 1)?;
/// ```
#[derive(Debug)]
pub struct FactorLookup<S> {
    source: S,
    table: OnceLock<Result<FactorTable, DataSourceError>>,
}

impl<S: FactorSource> FactorLookup<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            table: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Whether the first load has happened (successfully or not)
    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// The loaded table, reading the source on first call
    pub fn table(&self) -> Result<&FactorTable, DataSourceError> {
        self.table
            .get_or_init(|| {
                let loaded = self.source.read_table();
                if let Err(e) = &loaded {
                    warn!("Factor table load failed, lookups will fail until restart: {}", e);
                }
                loaded
            })
            .as_ref()
            .map_err(|e| e.clone())
    }

    /// Distinct interest rates in the table, ascending
    pub fn list_available_rates(&self) -> Result<Vec<f64>, DataSourceError> {
        Ok(self.table()?.distinct_rates())
    }

    /// Factor column names in the table, in source order
    pub fn available_factor_types(&self) -> Result<Vec<String>, DataSourceError> {
        Ok(self.table()?.factor_columns().to_vec())
    }

    /// Look up one tabulated factor value.
    ///
    /// `rate` must equal a table rate exactly. The (rate, period) row is
    /// resolved before the factor column, so a query that misses on both
    /// reports `NoData`.
    pub fn lookup(
        &self,
        rate: f64,
        factor_type: &str,
        period: i64,
    ) -> Result<FactorLookupResult, LookupError> {
        let table = self.table()?;

        let row = table
            .find_row(rate, period)
            .ok_or(LookupError::NoData { rate, period })?;

        let factor_value = table
            .column_index(factor_type)
            .and_then(|column| row.values.get(column).copied())
            .ok_or_else(|| LookupError::UnknownFactorType(factor_type.to_string()))?;
        debug!("{} at {}% n={} -> {}", factor_type, rate, period, factor_value);

        Ok(FactorLookupResult {
            rate,
            factor_type: factor_type.to_string(),
            period,
            factor_value,
            factor_info: describe(factor_type),
        })
    }
}
