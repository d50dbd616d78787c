//! The stock trail-following transition rules.
//!
//! | walker     | continue (`p_forward`)          | turn (`p_backward`)              | stay (`p_stay`) |
//! |------------|---------------------------------|----------------------------------|-----------------|
//! | `forward`  | forward, split over successors  | backward, at predecessor         | stay, same cell |
//! | `backward` | backward, at predecessor        | forward, split over successors   | stay, same cell |
//! | `stay`     | as `forward`                    | as `forward`                     | as `forward`    |
//!
//! Shares with no destination are dropped: forward moves at a trail end,
//! backward moves at the origin, and the stay share when the echo is
//! suppressed.

use crate::model::{Expansion, TransitionModel};
use crate::probabilities::TransitionProbabilities;
use trek_core::{Direction, Walker};
use trek_trail::{TrailError, TrailGraph};

/// Whether walkers leave a `stay` child behind each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StayEcho {
    /// Emit the stay child with `p_stay`.
    #[default]
    Enabled,
    /// Omit it; the share is reported as dropped.
    Suppressed,
}

/// Trail-following transitions with fixed probabilities.
///
/// # Examples
///
/// ```
/// use trek_core::{CellId, Direction, Walker};
/// use trek_trail::TrailLayout;
/// use trek_transition::{TrailTransitions, TransitionModel};
///
/// let graph = TrailLayout::straight(5).build().unwrap();
/// let model = TrailTransitions::default();
/// let out = model
///     .expand(&Walker::new(CellId(0), Direction::Forward, 1.0), &graph)
///     .unwrap();
/// // The backward share has nowhere to go at the origin.
/// assert_eq!(out.transitions.len(), 2);
/// assert_eq!(out.dropped, 0.05);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrailTransitions {
    probabilities: TransitionProbabilities,
    stay_echo: StayEcho,
}

impl TrailTransitions {
    /// Rules with the given probabilities and stay echo.
    pub fn new(probabilities: TransitionProbabilities, stay_echo: StayEcho) -> Self {
        Self {
            probabilities,
            stay_echo,
        }
    }

    /// The configured probabilities.
    pub fn probabilities(&self) -> TransitionProbabilities {
        self.probabilities
    }

    /// The configured stay echo.
    pub fn stay_echo(&self) -> StayEcho {
        self.stay_echo
    }
}

impl TransitionModel for TrailTransitions {
    fn name(&self) -> &str {
        "trail_transitions"
    }

    fn expand(&self, walker: &Walker, graph: &TrailGraph) -> Result<Expansion, TrailError> {
        let cell = graph.cell(walker.cell)?;
        let p = &self.probabilities;
        let mut out = Expansion::default();

        let (p_ahead, p_behind) = match walker.direction {
            Direction::Forward | Direction::Stay => (p.forward(), p.backward()),
            Direction::Backward => (p.backward(), p.forward()),
        };
        out.split_or_drop(cell.successors(), Direction::Forward, p_ahead);
        out.push_or_drop(cell.predecessor(), Direction::Backward, p_behind);

        match self.stay_echo {
            StayEcho::Enabled => out.push_or_drop(Some(cell.id()), Direction::Stay, p.stay()),
            StayEcho::Suppressed => out.dropped += p.stay(),
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use trek_core::{CellId, MASS_EPSILON};
    use trek_trail::TrailLayout;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < MASS_EPSILON
    }

    fn find(out: &Expansion, cell: u32, dir: Direction) -> Option<f64> {
        out.transitions
            .iter()
            .find(|t| t.cell == CellId(cell) && t.direction == dir)
            .map(|t| t.probability)
    }

    // ── Plain-cell tests ────────────────────────────────────────

    #[test]
    fn forward_in_the_middle() {
        let g = TrailLayout::straight(5).build().unwrap();
        let out = TrailTransitions::default()
            .expand(&Walker::new(CellId(2), Direction::Forward, 1.0), &g)
            .unwrap();
        assert_eq!(out.transitions.len(), 3);
        assert_eq!(find(&out, 3, Direction::Forward), Some(0.9));
        assert_eq!(find(&out, 1, Direction::Backward), Some(0.05));
        assert_eq!(find(&out, 2, Direction::Stay), Some(0.05));
        assert_eq!(out.dropped, 0.0);
    }

    #[test]
    fn backward_mirrors_forward() {
        let g = TrailLayout::straight(5).build().unwrap();
        let out = TrailTransitions::default()
            .expand(&Walker::new(CellId(2), Direction::Backward, 1.0), &g)
            .unwrap();
        assert_eq!(find(&out, 1, Direction::Backward), Some(0.9));
        assert_eq!(find(&out, 3, Direction::Forward), Some(0.05));
        assert_eq!(find(&out, 2, Direction::Stay), Some(0.05));
    }

    #[test]
    fn stay_expands_like_forward() {
        let g = TrailLayout::straight(5).build().unwrap();
        let model = TrailTransitions::default();
        let fwd = model
            .expand(&Walker::new(CellId(2), Direction::Forward, 1.0), &g)
            .unwrap();
        let stay = model
            .expand(&Walker::new(CellId(2), Direction::Stay, 1.0), &g)
            .unwrap();
        assert_eq!(fwd, stay);
    }

    // ── Boundary tests ──────────────────────────────────────────

    #[test]
    fn origin_drops_backward_share() {
        let g = TrailLayout::straight(5).build().unwrap();
        let out = TrailTransitions::default()
            .expand(&Walker::new(CellId(0), Direction::Forward, 1.0), &g)
            .unwrap();
        assert_eq!(find(&out, 1, Direction::Forward), Some(0.9));
        assert_eq!(find(&out, 0, Direction::Stay), Some(0.05));
        assert_eq!(out.dropped, 0.05);
    }

    #[test]
    fn last_cell_drops_forward_share() {
        let g = TrailLayout::straight(10).build().unwrap();
        let out = TrailTransitions::default()
            .expand(&Walker::new(CellId(9), Direction::Forward, 1.0), &g)
            .unwrap();
        assert_eq!(out.transitions.len(), 2);
        assert_eq!(find(&out, 8, Direction::Backward), Some(0.05));
        assert_eq!(find(&out, 9, Direction::Stay), Some(0.05));
        assert_eq!(out.dropped, 0.9);
    }

    #[test]
    fn backward_at_origin_drops_its_main_share() {
        let g = TrailLayout::straight(3).build().unwrap();
        let out = TrailTransitions::default()
            .expand(&Walker::new(CellId(0), Direction::Backward, 1.0), &g)
            .unwrap();
        assert_eq!(out.dropped, 0.9);
        assert_eq!(find(&out, 1, Direction::Forward), Some(0.05));
    }

    #[test]
    fn isolated_cell_keeps_only_stay() {
        let g = TrailLayout::straight(1).build().unwrap();
        let out = TrailTransitions::default()
            .expand(&Walker::new(CellId(0), Direction::Forward, 1.0), &g)
            .unwrap();
        assert_eq!(out.transitions.len(), 1);
        assert_eq!(find(&out, 0, Direction::Stay), Some(0.05));
        assert!(close(out.dropped, 0.95));
    }

    #[test]
    fn unknown_cell_is_an_error() {
        let g = TrailLayout::straight(3).build().unwrap();
        let err = TrailTransitions::default()
            .expand(&Walker::new(CellId(7), Direction::Forward, 1.0), &g)
            .unwrap_err();
        assert_eq!(err, TrailError::CellNotFound { cell: CellId(7) });
    }

    // ── Fork tests ──────────────────────────────────────────────

    #[test]
    fn forward_into_fork_splits_three_ways() {
        let g = TrailLayout::single_fork(2, 2).build().unwrap();
        let fork = CellId(1);
        assert!(g.cell(fork).unwrap().is_fork());
        let out = TrailTransitions::default()
            .expand(&Walker::new(fork, Direction::Forward, 1.0), &g)
            .unwrap();
        let forwards: Vec<_> = out
            .transitions
            .iter()
            .filter(|t| t.direction == Direction::Forward)
            .collect();
        assert_eq!(forwards.len(), 3);
        for (t, succ) in forwards.iter().zip(g.successors(fork).unwrap()) {
            assert_eq!(t.cell, *succ);
            assert!(close(t.probability, 0.9 / 3.0));
        }
    }

    #[test]
    fn backward_turning_at_fork_splits_its_turn_share() {
        let g = TrailLayout::single_fork(2, 2).build().unwrap();
        let out = TrailTransitions::default()
            .expand(&Walker::new(CellId(1), Direction::Backward, 1.0), &g)
            .unwrap();
        let forwards: Vec<_> = out
            .transitions
            .iter()
            .filter(|t| t.direction == Direction::Forward)
            .map(|t| t.probability)
            .collect();
        assert_eq!(forwards.len(), 3);
        assert!(forwards.iter().all(|p| close(*p, 0.05 / 3.0)));
        assert_eq!(find(&out, 0, Direction::Backward), Some(0.9));
    }

    // ── Stay echo tests ─────────────────────────────────────────

    #[test]
    fn suppressed_echo_reports_stay_as_dropped() {
        let g = TrailLayout::straight(5).build().unwrap();
        let model = TrailTransitions::new(TransitionProbabilities::default(), StayEcho::Suppressed);
        let out = model
            .expand(&Walker::new(CellId(2), Direction::Forward, 1.0), &g)
            .unwrap();
        assert_eq!(find(&out, 2, Direction::Stay), None);
        assert_eq!(out.dropped, 0.05);
        assert!(close(out.total_probability() + out.dropped, 1.0));
    }

    #[test]
    fn name_is_stable() {
        assert_eq!(TrailTransitions::default().name(), "trail_transitions");
    }

    proptest! {
        #[test]
        fn children_plus_dropped_equals_total(
            forward in 0.0f64..=0.5,
            backward in 0.0f64..=0.25,
            stay in 0.0f64..=0.25,
            cell in 0u32..21,
            dir in 0usize..3,
            suppress in any::<bool>(),
        ) {
            let g = TrailLayout::double_fork().build().unwrap();
            let p = TransitionProbabilities::new(forward, backward, stay).unwrap();
            let echo = if suppress { StayEcho::Suppressed } else { StayEcho::Enabled };
            let model = TrailTransitions::new(p, echo);
            let walker = Walker::new(CellId(cell), Direction::ALL[dir], 1.0);
            let out = model.expand(&walker, &g).unwrap();
            prop_assert!(close(out.total_probability() + out.dropped, p.total()));
            for t in &out.transitions {
                prop_assert!(t.probability > 0.0);
                prop_assert!(g.cell(t.cell).is_ok());
            }
        }
    }
}
