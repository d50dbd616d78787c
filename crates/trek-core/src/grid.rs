//! Grid coordinates and the eight compass headings.

use std::fmt;

/// A cell coordinate on the 2D grid the trail is laid out on.
///
/// `x` grows eastwards and `y` grows southwards, matching row-major
/// screen coordinates used by heatmap renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl GridPos {
    /// Construct a position from column and row.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent position one step along `heading`.
    ///
    /// Returns `None` when the step would leave the `i32` coordinate range.
    pub fn step(self, heading: Heading) -> Option<Self> {
        let (dx, dy) = heading.offset();
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// The 8-connected neighbourhood of this position, in [`Heading::ALL`]
    /// order. Neighbours outside the coordinate range are skipped.
    pub fn moore_neighbours(self) -> impl Iterator<Item = GridPos> {
        Heading::ALL.into_iter().filter_map(move |h| self.step(h))
    }

    /// Chebyshev (L-inf) distance, the geodesic on an 8-connected grid.
    pub fn chebyshev(self, other: GridPos) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx.max(dy)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight compass headings on the grid.
///
/// Declared in clockwise order starting from east, so rotating by 45°
/// is an index step in [`Heading::ALL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// +x.
    East,
    /// +x, +y.
    SouthEast,
    /// +y.
    South,
    /// -x, +y.
    SouthWest,
    /// -x.
    West,
    /// -x, -y.
    NorthWest,
    /// -y.
    North,
    /// +x, -y.
    NorthEast,
}

impl Heading {
    /// All headings, clockwise from east.
    pub const ALL: [Heading; 8] = [
        Heading::East,
        Heading::SouthEast,
        Heading::South,
        Heading::SouthWest,
        Heading::West,
        Heading::NorthWest,
        Heading::North,
        Heading::NorthEast,
    ];

    /// Returns the `(dx, dy)` grid offset for this heading.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Heading::East => (1, 0),
            Heading::SouthEast => (1, 1),
            Heading::South => (0, 1),
            Heading::SouthWest => (-1, 1),
            Heading::West => (-1, 0),
            Heading::NorthWest => (-1, -1),
            Heading::North => (0, -1),
            Heading::NorthEast => (1, -1),
        }
    }

    fn ordinal(self) -> usize {
        self as usize
    }

    /// Rotate by `steps` eighths of a turn; positive is clockwise.
    pub fn rotate(self, steps: i32) -> Heading {
        let idx = (self.ordinal() as i32 + steps).rem_euclid(8) as usize;
        Heading::ALL[idx]
    }

    /// The heading that moves from `from` to an adjacent `to`.
    ///
    /// Returns `None` if the positions are equal or not 8-adjacent.
    pub fn between(from: GridPos, to: GridPos) -> Option<Heading> {
        let delta = (to.x.checked_sub(from.x)?, to.y.checked_sub(from.y)?);
        Heading::ALL.into_iter().find(|h| h.offset() == delta)
    }
}
