//! Standard interest factor types and their descriptors

mod descriptor;

pub use descriptor::{describe, FactorInfo, FactorType};
