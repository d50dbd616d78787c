//! Probability-carrying walkers.

use crate::id::CellId;
use std::fmt;

/// Absolute tolerance used when comparing probability mass sums.
pub const MASS_EPSILON: f64 = 1e-9;

/// Direction a walker is travelling along the trail.
///
/// "Forward" means towards higher sequence positions, away from the
/// trail head.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Moving away from the trail start.
    Forward,
    /// Moving back towards the trail start.
    Backward,
    /// Lingering at the current cell.
    Stay,
}

impl Direction {
    /// All three directions in canonical order.
    pub const ALL: [Direction; 3] = [Direction::Forward, Direction::Backward, Direction::Stay];

    /// Dense index in `0..3`, matching [`Direction::ALL`].
    pub fn index(self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Backward => 1,
            Direction::Stay => 2,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::Stay => "stay",
        };
        f.write_str(s)
    }
}

/// The merge key of a walker: where it is and which way it faces.
///
/// A published population holds at most one walker per key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WalkerKey {
    /// Occupied cell.
    pub cell: CellId,
    /// Travel direction.
    pub direction: Direction,
}

impl WalkerKey {
    /// Construct a key.
    pub fn new(cell: CellId, direction: Direction) -> Self {
        Self { cell, direction }
    }
}

impl fmt::Display for WalkerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.cell, self.direction)
    }
}

/// A packet of probability mass occupying one trail cell.
///
/// Walkers are immutable values. Each tick the engine replaces every
/// walker with its children; nothing is updated in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Walker {
    /// Occupied cell.
    pub cell: CellId,
    /// Travel direction.
    pub direction: Direction,
    /// Fraction of the initial unit population this walker represents.
    pub mass: f64,
}

impl Walker {
    /// Construct a walker.
    pub fn new(cell: CellId, direction: Direction, mass: f64) -> Self {
        Self {
            cell,
            direction,
            mass,
        }
    }

    /// The walker's merge key.
    pub fn key(&self) -> WalkerKey {
        WalkerKey::new(self.cell, self.direction)
    }
}
