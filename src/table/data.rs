//! In-memory factor table

use crate::error::DataSourceError;
use std::collections::HashSet;

/// Column holding the interest rate (percent)
pub const RATE_COLUMN: &str = "interest_rate";

/// Column holding the period count
pub const PERIOD_COLUMN: &str = "n";

/// One tabulated row: a rate, a period, and one value per factor column
#[derive(Debug, Clone, PartialEq)]
pub struct FactorRow {
    /// Interest rate in percent (0.25 means 0.25%)
    pub interest_rate: f64,
    /// Number of compounding periods, always >= 1
    pub n: u32,
    /// Factor values, aligned with `FactorTable::factor_columns`
    pub values: Vec<f64>,
}

/// Factor table, immutable once built
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FactorTable {
    factor_columns: Vec<String>,
    rows: Vec<FactorRow>,
}

impl FactorTable {
    /// Build a table from factor column names and rows in source order.
    ///
    /// Every row must carry exactly one value per column; a row that doesn't
    /// is rejected with `RowWidth` (rows numbered from 1).
    pub fn new(factor_columns: Vec<String>, rows: Vec<FactorRow>) -> Result<Self, DataSourceError> {
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.values.len() != factor_columns.len())
        {
            return Err(DataSourceError::RowWidth {
                row: idx + 1,
                expected: factor_columns.len(),
                found: row.values.len(),
            });
        }
        Ok(Self { factor_columns, rows })
    }

    /// Factor column names in source order
    pub fn factor_columns(&self) -> &[String] {
        &self.factor_columns
    }

    pub fn rows(&self) -> &[FactorRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a factor column, if the table has it
    pub fn column_index(&self, factor_type: &str) -> Option<usize> {
        self.factor_columns.iter().position(|c| c == factor_type)
    }

    /// First row (in load order) matching the rate and period exactly
    pub fn find_row(&self, rate: f64, period: i64) -> Option<&FactorRow> {
        self.rows
            .iter()
            .find(|row| row.interest_rate == rate && i64::from(row.n) == period)
    }

    /// Distinct interest rates, ascending
    pub fn distinct_rates(&self) -> Vec<f64> {
        let mut rates: Vec<f64> = self.rows.iter().map(|r| r.interest_rate).collect();
        rates.sort_by(f64::total_cmp);
        rates.dedup();
        rates
    }

    /// Number of rows shadowed by an earlier row with the same (rate, n)
    pub fn duplicate_count(&self) -> usize {
        let mut seen = HashSet::with_capacity(self.rows.len());
        self.rows
            .iter()
            // -0.0 and 0.0 compare equal, so they must share a key
            .filter(|row| !seen.insert((rate_key(row.interest_rate), row.n)))
            .count()
    }
}

/// Bit pattern of a rate, with both zeros mapped to the same key
fn rate_key(rate: f64) -> u64 {
    if rate == 0.0 {
        0.0f64.to_bits()
    } else {
        rate.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(rate: f64, n: u32, fp: f64) -> FactorRow {
        FactorRow { interest_rate: rate, n, values: vec![fp] }
    }

    fn sample() -> FactorTable {
        FactorTable::new(
            vec!["F/P".to_string()],
            vec![
                row(1.0, 1, 1.01),
                row(0.25, 1, 1.0025),
                row(0.25, 2, 1.0050),
                row(1.0, 1, 9.99),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_distinct_rates_sorted() {
        assert_eq!(sample().distinct_rates(), vec![0.25, 1.0]);
        assert!(FactorTable::default().distinct_rates().is_empty());
    }

    #[test]
    fn test_find_row_first_match_wins() {
        let table = sample();
        let found = table.find_row(1.0, 1).unwrap();
        assert_eq!(found.values, vec![1.01]);
        assert_eq!(table.duplicate_count(), 1);
    }

    #[test]
    fn test_find_row_is_exact() {
        let table = sample();
        assert!(table.find_row(0.25, 2).is_some());
        assert!(table.find_row(0.2500001, 2).is_none());
        assert!(table.find_row(0.25, 3).is_none());
        assert!(table.find_row(0.25, -1).is_none());
    }

    #[test]
    fn test_column_index() {
        let table = sample();
        assert_eq!(table.column_index("F/P"), Some(0));
        assert_eq!(table.column_index("P/F"), None);
    }

    #[test]
    fn test_short_row_rejected() {
        let columns = vec!["F/P".to_string(), "P/F".to_string()];
        let rows = vec![
            FactorRow { interest_rate: 0.25, n: 1, values: vec![1.0025, 0.9975] },
            FactorRow { interest_rate: 0.25, n: 2, values: vec![1.0050] },
        ];
        let err = FactorTable::new(columns, rows).unwrap_err();
        assert_eq!(err, DataSourceError::RowWidth { row: 2, expected: 2, found: 1 });
    }

    #[test]
    fn test_long_row_rejected() {
        let rows = vec![FactorRow { interest_rate: 0.25, n: 1, values: vec![1.0025, 0.9975] }];
        assert!(FactorTable::new(vec!["F/P".to_string()], rows).is_err());
    }

    #[test]
    fn test_duplicate_count_treats_signed_zero_as_equal() {
        let table = FactorTable::new(
            vec!["F/P".to_string()],
            vec![row(0.0, 1, 1.0), row(-0.0, 1, 2.0), row(0.0, 2, 1.0), row(0.0, 1, 3.0)],
        )
        .unwrap();
        assert_eq!(table.duplicate_count(), 2);
        assert_eq!(table.find_row(-0.0, 1).unwrap().values, vec![1.0]);
    }
}
