//! Error types for trail construction and lookups.

use crate::bounds::GridBounds;
use std::fmt;
use trek_core::{CellId, GridPos, Heading};

/// Errors arising from trail construction or graph queries.
#[derive(Debug, Clone, PartialEq)]
pub enum TrailError {
    /// No cell with this arena id exists.
    CellNotFound {
        /// The requested id.
        cell: CellId,
    },
    /// No cell occupies this grid position.
    PositionNotFound {
        /// The requested position.
        pos: GridPos,
    },
    /// No cell has this sequence position.
    SequenceNotFound {
        /// The requested sequence position.
        sequence: u32,
    },
    /// Two cells would occupy the same grid position.
    CellCollision {
        /// The contested position.
        pos: GridPos,
    },
    /// A cell would be placed outside the grid.
    OutOfBounds {
        /// The offending position.
        pos: GridPos,
        /// The grid it had to fit in.
        bounds: GridBounds,
    },
    /// A step would leave the `i32` coordinate range.
    OffGrid {
        /// Position the step starts from.
        from: GridPos,
        /// Direction of the step.
        heading: Heading,
    },
    /// A cell already has successors and cannot be extended again.
    AlreadyExtended {
        /// The cell that was extended twice.
        cell: CellId,
    },
    /// A fork branch in a layout has no cells.
    EmptyBranch {
        /// The cell the fork hangs off.
        cell: CellId,
    },
    /// Grid bounds with a zero dimension.
    EmptyBounds,
    /// Procedural growth parameters are invalid.
    InvalidGrowth {
        /// What went wrong.
        reason: String,
    },
    /// A structural graph invariant does not hold.
    BrokenInvariant {
        /// Which invariant, and where.
        reason: String,
    },
}

impl fmt::Display for TrailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellNotFound { cell } => write!(f, "cell {cell} not found"),
            Self::PositionNotFound { pos } => write!(f, "no cell at {pos}"),
            Self::SequenceNotFound { sequence } => {
                write!(f, "no cell at sequence position {sequence}")
            }
            Self::CellCollision { pos } => write!(f, "cell collision at {pos}"),
            Self::OutOfBounds { pos, bounds } => {
                write!(f, "position {pos} outside {bounds}")
            }
            Self::OffGrid { from, heading } => {
                write!(f, "step {heading:?} from {from} leaves the coordinate range")
            }
            Self::AlreadyExtended { cell } => {
                write!(f, "cell {cell} already has successors")
            }
            Self::EmptyBranch { cell } => {
                write!(f, "fork after cell {cell} has a zero-length branch")
            }
            Self::EmptyBounds => write!(f, "grid bounds must have at least one cell"),
            Self::InvalidGrowth { reason } => write!(f, "invalid growth config: {reason}"),
            Self::BrokenInvariant { reason } => write!(f, "broken trail invariant: {reason}"),
        }
    }
}

impl std::error::Error for TrailError {}
