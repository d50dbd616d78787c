//! Rectangular grid bounds.

use crate::error::TrailError;
use std::fmt;
use trek_core::GridPos;

/// A non-wrapping `width × height` grid with its corner at `(0, 0)`.
///
/// A position is inside when `0 <= x < width` and `0 <= y < height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridBounds {
    width: u32,
    height: u32,
}

impl GridBounds {
    /// Create bounds. Returns `Err(TrailError::EmptyBounds)` if either
    /// dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, TrailError> {
        if width == 0 || height == 0 {
            return Err(TrailError::EmptyBounds);
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `pos` lies inside the grid.
    pub fn contains(&self, pos: GridPos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as i64) < self.width as i64
            && (pos.y as i64) < self.height as i64
    }

    /// `Ok(())` if `pos` is inside, otherwise `TrailError::OutOfBounds`.
    pub fn check(&self, pos: GridPos) -> Result<(), TrailError> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(TrailError::OutOfBounds { pos, bounds: *self })
        }
    }
}

impl fmt::Display for GridBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} grid", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimension_rejected() {
        assert_eq!(GridBounds::new(0, 4), Err(TrailError::EmptyBounds));
        assert_eq!(GridBounds::new(4, 0), Err(TrailError::EmptyBounds));
    }

    #[test]
    fn contains_is_half_open() {
        let b = GridBounds::new(3, 2).unwrap();
        assert!(b.contains(GridPos::new(0, 0)));
        assert!(b.contains(GridPos::new(2, 1)));
        assert!(!b.contains(GridPos::new(3, 1)));
        assert!(!b.contains(GridPos::new(2, 2)));
        assert!(!b.contains(GridPos::new(-1, 0)));
    }

    #[test]
    fn check_reports_position() {
        let b = GridBounds::new(2, 2).unwrap();
        assert_eq!(
            b.check(GridPos::new(5, 0)),
            Err(TrailError::OutOfBounds {
                pos: GridPos::new(5, 0),
                bounds: b
            })
        );
    }
}
