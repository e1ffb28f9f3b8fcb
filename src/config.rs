//! Service configuration

use crate::table::CsvFileSource;
use std::path::PathBuf;

/// Default location of the factor table, relative to the working directory
pub const DEFAULT_TABLE_PATH: &str = "factors_table.xlsx.csv";

/// Environment variable overriding the table location
pub const TABLE_PATH_ENV: &str = "FACTOR_TABLE_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// CSV file holding the factor table
    pub table_path: PathBuf,
}

impl ServiceConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let table_path = var(TABLE_PATH_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TABLE_PATH));
        Self { table_path }
    }

    pub fn with_table_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.table_path = path.into();
        self
    }

    /// Table source described by this configuration
    pub fn source(&self) -> CsvFileSource {
        CsvFileSource::new(self.table_path.clone())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from(DEFAULT_TABLE_PATH),
        }
    }
}
