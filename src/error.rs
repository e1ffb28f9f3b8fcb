//! Error types for table loading and factor lookups

use thiserror::Error;

/// Failure to read or parse the factor table source.
///
/// Cloneable so a single failed load can be handed to every later caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataSourceError {
    /// Source file does not exist
    #[error("factor table not found at {path}")]
    NotFound { path: String },

    /// I/O or CSV framing error while reading the source
    #[error("failed to read factor table: {0}")]
    Read(String),

    /// A required column is absent from the header row
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Two header cells normalise to the same name
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    /// A row does not carry one value per factor column
    #[error("row {row} has {found} factor values, expected {expected}")]
    RowWidth {
        /// 1-based data row
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A cell could not be parsed into its typed field
    #[error("invalid value {value:?} in column {column} at row {row}")]
    InvalidCell {
        /// 1-based data row (header excluded)
        row: usize,
        column: String,
        value: String,
    },
}

impl From<csv::Error> for DataSourceError {
    fn from(err: csv::Error) -> Self {
        DataSourceError::Read(err.to_string())
    }
}

impl From<std::io::Error> for DataSourceError {
    fn from(err: std::io::Error) -> Self {
        DataSourceError::Read(err.to_string())
    }
}

/// Broad classification of a lookup failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The table could not be loaded; nothing can be served
    DataSource,
    /// Caller input was malformed
    Validation,
    /// Well-formed query with nothing to return
    NotFound,
}

/// Failure of a single lookup request.
///
/// The display strings are the messages returned to API callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid input format. Please enter numeric values.")]
    InvalidInput,

    #[error("No data found for rate {rate:?}% and period {period}")]
    NoData { rate: f64, period: i64 },

    #[error("Factor type {0} not found in table")]
    UnknownFactorType(String),

    #[error("Lookup error: {0}")]
    DataSource(#[from] DataSourceError),
}

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::InvalidJson(_)
            | LookupError::MissingField(_)
            | LookupError::InvalidInput => ErrorKind::Validation,
            LookupError::NoData { .. } | LookupError::UnknownFactorType(_) => ErrorKind::NotFound,
            LookupError::DataSource(_) => ErrorKind::DataSource,
        }
    }

    /// HTTP status used when this error crosses the API boundary
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::NotFound => 400,
            ErrorKind::DataSource => 500,
        }
    }
}
