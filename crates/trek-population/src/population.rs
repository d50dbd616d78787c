//! The published generation of walkers.

use indexmap::IndexMap;
use trek_core::{CellId, Direction, Walker, WalkerKey};

/// All walkers alive at one tick, keyed by `(cell, direction)`.
///
/// Iteration order is the order in which keys were first seen when the
/// population was merged, which makes every downstream pass
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WalkerPopulation {
    walkers: IndexMap<WalkerKey, f64>,
}

impl WalkerPopulation {
    /// An empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// A population holding a single walker.
    pub fn single(walker: Walker) -> Self {
        let mut walkers = IndexMap::with_capacity(1);
        walkers.insert(walker.key(), walker.mass);
        Self { walkers }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            walkers: IndexMap::with_capacity(capacity),
        }
    }

    pub(crate) fn accumulate(&mut self, walker: Walker) {
        *self.walkers.entry(walker.key()).or_insert(0.0) += walker.mass;
    }

    /// Number of distinct walkers.
    pub fn len(&self) -> usize {
        self.walkers.len()
    }

    /// Whether no walker is alive.
    pub fn is_empty(&self) -> bool {
        self.walkers.is_empty()
    }

    /// Mass of the walker at `key`, if any.
    pub fn get(&self, key: WalkerKey) -> Option<f64> {
        self.walkers.get(&key).copied()
    }

    /// Mass at `cell` travelling in `direction`, zero if absent.
    pub fn mass_at(&self, cell: CellId, direction: Direction) -> f64 {
        self.get(WalkerKey::new(cell, direction)).unwrap_or(0.0)
    }

    /// Walkers in merge order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Walker> + '_ {
        self.walkers
            .iter()
            .map(|(k, m)| Walker::new(k.cell, k.direction, *m))
    }

    /// Walkers in merge order, collected.
    pub fn walkers(&self) -> Vec<Walker> {
        self.iter().collect()
    }

    /// Sum of all walker masses.
    pub fn total_mass(&self) -> f64 {
        self.walkers.values().sum()
    }
}

impl FromIterator<Walker> for WalkerPopulation {
    fn from_iter<I: IntoIterator<Item = Walker>>(iter: I) -> Self {
        crate::merge::merge(iter)
    }
}
