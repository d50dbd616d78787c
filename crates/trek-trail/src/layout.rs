//! Deterministic, hand-authored trail layouts.
//!
//! A layout is a trunk [`Segment`] leaving the origin, optionally ending
//! in a [`Fork`] whose three branches are segments themselves. Branches
//! may fork again, so arbitrary trees can be described.
//!
//! ```
//! use trek_core::Heading;
//! use trek_trail::{Fork, Segment, TrailLayout};
//! use trek_core::GridPos;
//!
//! // Three cells east, then a fork into two-cell branches.
//! let layout = TrailLayout::new(
//!     GridPos::new(0, 2),
//!     Segment::run(Heading::East, 2).then_fork(Fork {
//!         left: Segment::run(Heading::NorthEast, 2),
//!         middle: Segment::run(Heading::East, 2),
//!         right: Segment::run(Heading::SouthEast, 2),
//!     }),
//! );
//! let graph = layout.build().unwrap();
//! assert_eq!(graph.cell_count(), 9);
//! assert_eq!(graph.fork_count(), 1);
//! ```

use crate::bounds::GridBounds;
use crate::error::TrailError;
use crate::graph::{GraphBuilder, TrailGraph};
use trek_core::{CellId, GridPos, Heading};

/// A straight run of cells, optionally followed by a fork.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// Direction every cell of the run steps in.
    pub heading: Heading,
    /// Number of cells in the run.
    ///
    /// For a trunk this excludes the origin. For a branch it includes
    /// the branch cell itself, so branches need a length of at least 1.
    pub length: u32,
    /// Fork placed after the last cell of the run.
    pub fork: Option<Box<Fork>>,
}

impl Segment {
    /// A run with no fork at its end.
    pub fn run(heading: Heading, length: u32) -> Self {
        Self {
            heading,
            length,
            fork: None,
        }
    }

    /// End this run in `fork`.
    pub fn then_fork(mut self, fork: Fork) -> Self {
        self.fork = Some(Box::new(fork));
        self
    }

    fn cell_count(&self) -> usize {
        self.length as usize
            + self.fork.as_ref().map_or(0, |f| {
                f.left.cell_count() + f.middle.cell_count() + f.right.cell_count()
            })
    }
}

/// A three-way split. The first cell of each branch forms the triple.
#[derive(Clone, Debug, PartialEq)]
pub struct Fork {
    /// Left branch.
    pub left: Segment,
    /// Middle branch.
    pub middle: Segment,
    /// Right branch.
    pub right: Segment,
}

/// A complete hand-authored trail.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailLayout {
    /// Grid position of the origin cell.
    pub origin: GridPos,
    /// Run leaving the origin.
    pub trunk: Segment,
    /// Optional grid every cell must fit inside.
    pub bounds: Option<GridBounds>,
}

impl TrailLayout {
    /// A layout with no bounds.
    pub fn new(origin: GridPos, trunk: Segment) -> Self {
        Self {
            origin,
            trunk,
            bounds: None,
        }
    }

    /// Require every cell to lie inside `bounds`.
    pub fn with_bounds(mut self, bounds: GridBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// `cells` cells in a row heading east from `(0, 0)`.
    ///
    /// `straight(0)` still yields the origin cell.
    pub fn straight(cells: u32) -> Self {
        Self::new(
            GridPos::new(0, 0),
            Segment::run(Heading::East, cells.saturating_sub(1)),
        )
    }

    /// A trunk of `trunk_cells` cells (origin included) splitting into
    /// north-east, east, and south-east branches of `branch_cells` each.
    ///
    /// The origin sits at `(0, branch_cells)` so every cell has
    /// non-negative coordinates.
    pub fn single_fork(trunk_cells: u32, branch_cells: u32) -> Self {
        let origin_row = i32::try_from(branch_cells).unwrap_or(i32::MAX);
        Self::new(
            GridPos::new(0, origin_row),
            Segment::run(Heading::East, trunk_cells.saturating_sub(1)).then_fork(Fork {
                left: Segment::run(Heading::NorthEast, branch_cells),
                middle: Segment::run(Heading::East, branch_cells),
                right: Segment::run(Heading::SouthEast, branch_cells),
            }),
        )
    }

    /// A 21-cell demo trail whose middle branch forks a second time.
    pub fn double_fork() -> Self {
        let inner = Fork {
            left: Segment::run(Heading::NorthEast, 2),
            middle: Segment::run(Heading::East, 2),
            right: Segment::run(Heading::SouthEast, 2),
        };
        Self::new(
            GridPos::new(0, 4),
            Segment::run(Heading::East, 3).then_fork(Fork {
                left: Segment::run(Heading::NorthEast, 4),
                middle: Segment::run(Heading::East, 3).then_fork(inner),
                right: Segment::run(Heading::SouthEast, 4),
            }),
        )
    }

    /// Number of cells the layout describes, origin included.
    pub fn cell_count(&self) -> usize {
        1 + self.trunk.cell_count()
    }

    /// Place every cell and return the finished graph.
    ///
    /// # Errors
    ///
    /// - [`TrailError::CellCollision`] if two cells share a position.
    /// - [`TrailError::OutOfBounds`] if a cell falls outside `bounds`.
    /// - [`TrailError::OffGrid`] if a cell would leave the `i32`
    ///   coordinate range.
    /// - [`TrailError::EmptyBranch`] if a fork branch has length 0.
    pub fn build(&self) -> Result<TrailGraph, TrailError> {
        let mut builder = GraphBuilder::new(self.origin, self.bounds)?;
        let head = run(&mut builder, CellId(0), self.trunk.heading, self.trunk.length)?;
        if let Some(fork) = &self.trunk.fork {
            place_fork(&mut builder, head, fork)?;
        }
        builder.finish()
    }
}

fn run(
    builder: &mut GraphBuilder,
    mut head: CellId,
    heading: Heading,
    cells: u32,
) -> Result<CellId, TrailError> {
    for _ in 0..cells {
        let next = step(builder.pos_of(head)?, heading)?;
        head = builder.extend(head, next)?;
    }
    Ok(head)
}

fn place_fork(builder: &mut GraphBuilder, head: CellId, fork: &Fork) -> Result<(), TrailError> {
    let branches = [&fork.left, &fork.middle, &fork.right];
    if branches.iter().any(|b| b.length == 0) {
        return Err(TrailError::EmptyBranch { cell: head });
    }
    let at = builder.pos_of(head)?;
    let positions = [
        step(at, fork.left.heading)?,
        step(at, fork.middle.heading)?,
        step(at, fork.right.heading)?,
    ];
    let ids = builder.fork(head, positions)?;
    for (id, branch) in ids.into_iter().zip(branches) {
        let tail = run(builder, id, branch.heading, branch.length - 1)?;
        if let Some(next) = &branch.fork {
            place_fork(builder, tail, next)?;
        }
    }
    Ok(())
}

fn step(from: GridPos, heading: Heading) -> Result<GridPos, TrailError> {
    from.step(heading).ok_or(TrailError::OffGrid { from, heading })
}
