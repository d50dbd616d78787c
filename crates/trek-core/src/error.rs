//! Probability validation errors shared by transition and seed configuration.

use std::error::Error;
use std::fmt;

/// A probability parameter failed validation.
#[derive(Clone, Debug, PartialEq)]
pub enum ProbabilityError {
    /// The value is NaN or infinite.
    NotFinite {
        /// Parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// The value is outside `[0, 1]`.
    OutOfRange {
        /// Parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// A set of per-state probabilities sums to more than one.
    SumExceedsOne {
        /// The computed sum.
        sum: f64,
    },
}

impl ProbabilityError {
    /// Check that `value` is a finite probability in `[0, 1]`.
    pub fn check(name: &'static str, value: f64) -> Result<f64, ProbabilityError> {
        if !value.is_finite() {
            return Err(Self::NotFinite { name, value });
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(Self::OutOfRange { name, value });
        }
        Ok(value)
    }
}

impl fmt::Display for ProbabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFinite { name, value } => {
                write!(f, "{name} must be finite, got {value}")
            }
            Self::OutOfRange { name, value } => {
                write!(f, "{name} must be in [0, 1], got {value}")
            }
            Self::SumExceedsOne { sum } => {
                write!(f, "probabilities sum to {sum}, which exceeds 1")
            }
        }
    }
}

impl Error for ProbabilityError {}
