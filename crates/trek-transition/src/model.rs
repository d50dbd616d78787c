//! The [`TransitionModel`] trait and its output types.

use smallvec::SmallVec;
use trek_core::{CellId, Direction, Walker};
use trek_trail::{TrailError, TrailGraph};

/// One weighted child of a walker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Destination cell.
    pub cell: CellId,
    /// Direction the child travels in.
    pub direction: Direction,
    /// Multiplier applied to the parent's mass.
    pub probability: f64,
}

impl Transition {
    /// Construct a transition.
    pub fn new(cell: CellId, direction: Direction, probability: f64) -> Self {
        Self {
            cell,
            direction,
            probability,
        }
    }

    /// The child walker produced from a parent of mass `parent_mass`.
    pub fn apply(&self, parent_mass: f64) -> Walker {
        Walker::new(self.cell, self.direction, parent_mass * self.probability)
    }
}

/// The result of expanding one walker.
///
/// `dropped` is the probability share that had nowhere to go (an open
/// boundary or a suppressed stay echo). For any walker,
/// `total_probability() + dropped` equals the model's configured sum.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Expansion {
    /// Children, in a deterministic order.
    pub transitions: SmallVec<[Transition; 6]>,
    /// Share lost at boundaries.
    pub dropped: f64,
}

impl Expansion {
    /// Sum of all child probabilities.
    pub fn total_probability(&self) -> f64 {
        self.transitions.iter().map(|t| t.probability).sum()
    }

    /// Add `probability` to a child, or to `dropped` when `cell` is `None`.
    ///
    /// Zero-probability children are never emitted.
    pub(crate) fn push_or_drop(
        &mut self,
        cell: Option<CellId>,
        direction: Direction,
        probability: f64,
    ) {
        match cell {
            Some(cell) if probability > 0.0 => {
                self.transitions
                    .push(Transition::new(cell, direction, probability));
            }
            Some(_) => {}
            None => self.dropped += probability,
        }
    }

    /// Split `probability` equally across `cells`; all of it is dropped
    /// when `cells` is empty.
    pub(crate) fn split_or_drop(
        &mut self,
        cells: &[CellId],
        direction: Direction,
        probability: f64,
    ) {
        if cells.is_empty() {
            self.dropped += probability;
            return;
        }
        let share = probability / cells.len() as f64;
        for cell in cells {
            self.push_or_drop(Some(*cell), direction, share);
        }
    }
}

/// Maps a walker and the trail topology to the walker's children.
///
/// # Contract
///
/// - `expand()` MUST be deterministic and side-effect free.
/// - Children must reference cells that exist in `graph`.
/// - Probabilities are multipliers on the parent mass; the engine does
///   the multiplication.
///
/// Implementations are shared across rayon workers, hence `Send + Sync`.
///
/// # Examples
///
/// A model that parks every walker where it stands:
///
/// ```
/// use trek_core::{Direction, Walker, CellId};
/// use trek_trail::{TrailError, TrailGraph, TrailLayout};
/// use trek_transition::{Expansion, Transition, TransitionModel};
///
/// struct Park;
///
/// impl TransitionModel for Park {
///     fn name(&self) -> &str { "park" }
///
///     fn expand(&self, walker: &Walker, graph: &TrailGraph) -> Result<Expansion, TrailError> {
///         graph.cell(walker.cell)?;
///         let mut out = Expansion::default();
///         out.transitions.push(Transition::new(walker.cell, Direction::Stay, 1.0));
///         Ok(out)
///     }
/// }
///
/// let graph = TrailLayout::straight(3).build().unwrap();
/// let out = Park.expand(&Walker::new(CellId(1), Direction::Forward, 1.0), &graph).unwrap();
/// assert_eq!(out.total_probability(), 1.0);
/// ```
pub trait TransitionModel: Send + Sync + 'static {
    /// Human-readable name for logs and errors.
    fn name(&self) -> &str;

    /// Expand `walker` into weighted children.
    ///
    /// # Errors
    ///
    /// Returns [`TrailError::CellNotFound`] if the walker's cell is not
    /// in `graph`.
    fn expand(&self, walker: &Walker, graph: &TrailGraph) -> Result<Expansion, TrailError>;
}
