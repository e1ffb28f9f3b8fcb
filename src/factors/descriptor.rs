//! Factor type codes and their display metadata

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// The eight standard interest factor types found in engineering-economics tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorType {
    /// Single payment compound amount
    FutureGivenPresent,
    /// Single payment present worth
    PresentGivenFuture,
    /// Sinking fund
    AnnuityGivenFuture,
    /// Capital recovery
    AnnuityGivenPresent,
    /// Uniform series compound amount
    FutureGivenAnnuity,
    /// Uniform series present worth
    PresentGivenAnnuity,
    /// Arithmetic gradient uniform series
    AnnuityGivenGradient,
    /// Arithmetic gradient present worth
    PresentGivenGradient,
}

/// Display name and usage formula for a factor type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorInfo {
    pub name: Cow<'static, str>,
    pub formula: Cow<'static, str>,
}

impl FactorType {
    /// All factor types, in the column order of a standard table
    pub const ALL: [FactorType; 8] = [
        FactorType::FutureGivenPresent,
        FactorType::PresentGivenFuture,
        FactorType::AnnuityGivenFuture,
        FactorType::AnnuityGivenPresent,
        FactorType::FutureGivenAnnuity,
        FactorType::PresentGivenAnnuity,
        FactorType::AnnuityGivenGradient,
        FactorType::PresentGivenGradient,
    ];

    /// Table column code, e.g. `"F/P"`
    pub fn code(self) -> &'static str {
        match self {
            FactorType::FutureGivenPresent => "F/P",
            FactorType::PresentGivenFuture => "P/F",
            FactorType::AnnuityGivenFuture => "A/F",
            FactorType::AnnuityGivenPresent => "A/P",
            FactorType::FutureGivenAnnuity => "F/A",
            FactorType::PresentGivenAnnuity => "P/A",
            FactorType::AnnuityGivenGradient => "A/G",
            FactorType::PresentGivenGradient => "P/G",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|factor| factor.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            FactorType::FutureGivenPresent => "(F/P) - Future Worth of Present Sum",
            FactorType::PresentGivenFuture => "(P/F) - Present Worth of Future Sum",
            FactorType::AnnuityGivenFuture => "(A/F) - Sinking Fund Factor",
            FactorType::AnnuityGivenPresent => "(A/P) - Capital Recovery Factor",
            FactorType::FutureGivenAnnuity => "(F/A) - Future Worth of Uniform Series",
            FactorType::PresentGivenAnnuity => "(P/A) - Present Worth of Uniform Series",
            FactorType::AnnuityGivenGradient => "(A/G) - Arithmetic Gradient Uniform Series Factor",
            FactorType::PresentGivenGradient => "(P/G) - Arithmetic Gradient Present Worth Factor",
        }
    }

    pub fn formula(self) -> &'static str {
        match self {
            FactorType::FutureGivenPresent => "F = P × (F/P,i%,n)",
            FactorType::PresentGivenFuture => "P = F × (P/F,i%,n)",
            FactorType::AnnuityGivenFuture => "A = F × (A/F,i%,n)",
            FactorType::AnnuityGivenPresent => "A = P × (A/P,i%,n)",
            FactorType::FutureGivenAnnuity => "F = A × (F/A,i%,n)",
            FactorType::PresentGivenAnnuity => "P = A × (P/A,i%,n)",
            FactorType::AnnuityGivenGradient => "A = G × (A/G,i%,n)",
            FactorType::PresentGivenGradient => "P = G × (P/G,i%,n)",
        }
    }

    pub fn info(self) -> FactorInfo {
        FactorInfo {
            name: Cow::Borrowed(self.name()),
            formula: Cow::Borrowed(self.formula()),
        }
    }
}

impl fmt::Display for FactorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Descriptor for any code, falling back to the raw code and `"N/A"` when unrecognised
pub fn describe(code: &str) -> FactorInfo {
    match FactorType::from_code(code) {
        Some(factor) => factor.info(),
        None => FactorInfo {
            name: Cow::Owned(code.to_string()),
            formula: Cow::Borrowed("N/A"),
        },
    }
}
