//! Combining child walkers into the next generation.

use crate::population::WalkerPopulation;
use trek_core::Walker;

/// Group `children` by `(cell, direction)` and sum their masses.
///
/// Keys keep the order in which they are first seen, so the result
/// depends only on the order of `children`. A walker with a unique key
/// passes through with its mass unchanged. Merging an already merged
/// population returns an equal population.
///
/// # Examples
///
/// ```
/// use trek_core::{CellId, Direction, Walker};
/// use trek_population::merge;
///
/// let pop = merge([
///     Walker::new(CellId(1), Direction::Forward, 0.3),
///     Walker::new(CellId(0), Direction::Stay, 0.1),
///     Walker::new(CellId(1), Direction::Forward, 0.3),
/// ]);
/// assert_eq!(pop.len(), 2);
/// assert_eq!(pop.mass_at(CellId(1), Direction::Forward), 0.6);
/// ```
pub fn merge<I>(children: I) -> WalkerPopulation
where
    I: IntoIterator<Item = Walker>,
{
    let iter = children.into_iter();
    let mut population = WalkerPopulation::with_capacity(iter.size_hint().0);
    for child in iter {
        population.accumulate(child);
    }
    population
}
