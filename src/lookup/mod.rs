//! Factor lookup service

mod service;

pub use service::{FactorLookup, FactorLookupResult};
