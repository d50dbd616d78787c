//! Trail cells and their roles.

use smallvec::SmallVec;
use std::fmt;
use trek_core::{CellId, GridPos};

/// Structural role of a cell in the trail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellRole {
    /// An ordinary cell with at most one backward and one forward neighbour.
    Plain,
    /// Left cell of a branch triple.
    BranchLeft,
    /// Middle cell of a branch triple.
    BranchMiddle,
    /// Right cell of a branch triple.
    BranchRight,
}

impl CellRole {
    /// Roles of a branch triple, in left-middle-right order.
    pub const BRANCHES: [CellRole; 3] = [
        CellRole::BranchLeft,
        CellRole::BranchMiddle,
        CellRole::BranchRight,
    ];

    /// Whether this role belongs to a branch triple.
    pub fn is_branch(self) -> bool {
        !matches!(self, CellRole::Plain)
    }
}

impl fmt::Display for CellRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CellRole::Plain => "plain",
            CellRole::BranchLeft => "branch-left",
            CellRole::BranchMiddle => "branch-middle",
            CellRole::BranchRight => "branch-right",
        };
        f.write_str(s)
    }
}

/// One node of a trail graph.
///
/// Cells are created by the graph builders and never change afterwards.
/// Links to neighbouring cells are arena indices into the owning
/// [`TrailGraph`](crate::TrailGraph).
#[derive(Clone, Debug, PartialEq)]
pub struct TrailCell {
    pub(crate) id: CellId,
    pub(crate) pos: GridPos,
    pub(crate) sequence: u32,
    pub(crate) role: CellRole,
    pub(crate) predecessor: Option<CellId>,
    pub(crate) successors: SmallVec<[CellId; 3]>,
}

impl TrailCell {
    /// Arena index of this cell.
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Grid coordinate.
    pub fn pos(&self) -> GridPos {
        self.pos
    }

    /// Distance from the trail origin along the forward direction.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Structural role.
    pub fn role(&self) -> CellRole {
        self.role
    }

    /// The backward neighbour; `None` only for the origin.
    pub fn predecessor(&self) -> Option<CellId> {
        self.predecessor
    }

    /// Forward neighbours: empty at a trail end, one on a plain run,
    /// three at a fork (left, middle, right).
    pub fn successors(&self) -> &[CellId] {
        &self.successors
    }

    /// Whether this cell is the trail origin.
    pub fn is_start(&self) -> bool {
        self.predecessor.is_none()
    }

    /// Whether this cell ends a forward path.
    pub fn is_end(&self) -> bool {
        self.successors.is_empty()
    }

    /// Whether this cell's successors form a branch triple.
    pub fn is_fork(&self) -> bool {
        self.successors.len() == 3
    }
}
