//! Factor table data structures and CSV loading

mod data;
pub mod loader;

pub use data::{FactorRow, FactorTable, PERIOD_COLUMN, RATE_COLUMN};
pub use loader::{load_table, load_table_from_reader, CsvFileSource, CsvTextSource, FactorSource};
