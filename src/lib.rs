//! Factor Tables - engineering-economics interest factor lookups
//!
//! This library provides:
//! - The eight standard factor types (F/P, P/F, A/F, A/P, F/A, P/A, A/G, P/G) with display metadata
//! - CSV loading of precomputed factor tables into a typed, immutable table
//! - A load-once lookup service keyed by (rate, factor type, period)
//! - A transport-independent JSON API used by the Lambda handler and CLI

pub mod api;
pub mod config;
pub mod error;
pub mod factors;
pub mod lookup;
pub mod table;

// Re-export commonly used types
pub use config::ServiceConfig;
pub use error::{DataSourceError, ErrorKind, LookupError};
pub use factors::{describe, FactorInfo, FactorType};
pub use lookup::{FactorLookup, FactorLookupResult};
pub use table::{CsvFileSource, CsvTextSource, FactorSource, FactorTable};
