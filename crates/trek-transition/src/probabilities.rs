//! Validated transition probabilities.

use trek_core::{ProbabilityError, MASS_EPSILON};

/// The three per-tick transition probabilities.
///
/// Each is finite and in `[0, 1]`, and together they sum to at most 1.
/// A sum below 1 models walkers leaving the trail entirely.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionProbabilities {
    forward: f64,
    backward: f64,
    stay: f64,
}

impl Default for TransitionProbabilities {
    /// `0.9` forward, `0.05` backward, `0.05` stay.
    fn default() -> Self {
        Self {
            forward: 0.9,
            backward: 0.05,
            stay: 0.05,
        }
    }
}

impl TransitionProbabilities {
    /// Validate and construct.
    ///
    /// # Errors
    ///
    /// [`ProbabilityError::NotFinite`] or [`ProbabilityError::OutOfRange`]
    /// for a bad component, [`ProbabilityError::SumExceedsOne`] if the
    /// three sum past 1.
    pub fn new(forward: f64, backward: f64, stay: f64) -> Result<Self, ProbabilityError> {
        let forward = ProbabilityError::check("p_forward", forward)?;
        let backward = ProbabilityError::check("p_backward", backward)?;
        let stay = ProbabilityError::check("p_stay", stay)?;
        let sum = forward + backward + stay;
        if sum > 1.0 + MASS_EPSILON {
            return Err(ProbabilityError::SumExceedsOne { sum });
        }
        Ok(Self {
            forward,
            backward,
            stay,
        })
    }

    /// Hikers who rarely linger: `0.89` forward, `0.10` back, `0.01` stay.
    pub fn hiker() -> Self {
        Self {
            forward: 0.89,
            backward: 0.10,
            stay: 0.01,
        }
    }

    /// Probability of continuing in the current direction.
    pub fn forward(&self) -> f64 {
        self.forward
    }

    /// Probability of turning around.
    pub fn backward(&self) -> f64 {
        self.backward
    }

    /// Probability of staying put.
    pub fn stay(&self) -> f64 {
        self.stay
    }

    /// `forward + backward + stay`.
    pub fn total(&self) -> f64 {
        self.forward + self.backward + self.stay
    }
}
