//! Mock transition models for engine tests.
//!
//! - [`FailingModel`]: delegates to the stock rules, then fails after N calls.
//! - [`FailAtCell`]: fails whenever it expands a walker on one cell.
//! - [`ConservingModel`]: keeps every walker where it is with its full mass.

use std::sync::atomic::{AtomicUsize, Ordering};

use trek_core::{CellId, Walker};
use trek_trail::{TrailError, TrailGraph};
use trek_transition::{Expansion, Transition, TrailTransitions, TransitionModel};

/// Stock trail rules that start failing after `succeed_count` expansions.
///
/// The failure reports the walker's cell as not found, the same error a
/// walker on a stale graph would produce.
pub struct FailingModel {
    inner: TrailTransitions,
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingModel {
    /// Succeed `succeed_count` times, then fail.
    pub fn new(succeed_count: usize) -> Self {
        Self {
            inner: TrailTransitions::default(),
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `expand()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl TransitionModel for FailingModel {
    fn name(&self) -> &str {
        "failing"
    }

    fn expand(&self, walker: &Walker, graph: &TrailGraph) -> Result<Expansion, TrailError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(TrailError::CellNotFound { cell: walker.cell });
        }
        self.inner.expand(walker, graph)
    }
}

/// Stock trail rules, except expanding a walker on `cell` fails.
pub struct FailAtCell {
    pub cell: CellId,
    inner: TrailTransitions,
}

impl FailAtCell {
    pub fn new(cell: CellId) -> Self {
        Self {
            cell,
            inner: TrailTransitions::default(),
        }
    }
}

impl TransitionModel for FailAtCell {
    fn name(&self) -> &str {
        "fail_at_cell"
    }

    fn expand(&self, walker: &Walker, graph: &TrailGraph) -> Result<Expansion, TrailError> {
        if walker.cell == self.cell {
            return Err(TrailError::CellNotFound { cell: walker.cell });
        }
        self.inner.expand(walker, graph)
    }
}

/// Every walker stays put in its own direction with probability 1.
pub struct ConservingModel;

impl TransitionModel for ConservingModel {
    fn name(&self) -> &str {
        "conserving"
    }

    fn expand(&self, walker: &Walker, graph: &TrailGraph) -> Result<Expansion, TrailError> {
        graph.cell(walker.cell)?;
        let mut out = Expansion::default();
        out.transitions
            .push(Transition::new(walker.cell, walker.direction, 1.0));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{straight_trail, total_mass};
    use trek_core::Direction;

    #[test]
    fn failing_model_counts_every_call() {
        let graph = straight_trail(3);
        let model = FailingModel::new(2);
        let walker = Walker::new(CellId(0), Direction::Forward, 1.0);
        assert!(model.expand(&walker, &graph).is_ok());
        assert!(model.expand(&walker, &graph).is_ok());
        assert!(model.expand(&walker, &graph).is_err());
        assert!(model.expand(&walker, &graph).is_err());
        assert_eq!(model.calls(), 4);
    }

    #[test]
    fn conserving_model_returns_the_walker_unchanged() {
        let graph = straight_trail(3);
        let walker = Walker::new(CellId(1), Direction::Backward, 0.25);
        let children: Vec<Walker> = ConservingModel
            .expand(&walker, &graph)
            .unwrap()
            .transitions
            .iter()
            .map(|t| t.apply(walker.mass))
            .collect();
        assert_eq!(children, vec![walker]);
        assert_eq!(total_mass(&children), 0.25);
    }
}
