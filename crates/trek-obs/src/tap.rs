//! A stateful sampler the engine driver calls after each tick.

use crate::range::{sample, MassRange};
use trek_core::TickId;
use trek_population::WalkerPopulation;

/// Remembers the mass range of the most recently observed population.
///
/// The tap only reads populations; it has no handle back into the
/// engine.
#[derive(Clone, Debug, Default)]
pub struct ObservabilityTap {
    last: Option<(TickId, MassRange)>,
    samples: u64,
}

impl ObservabilityTap {
    /// A tap that has seen nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample `population` as published at `tick`.
    ///
    /// An empty population clears the remembered range.
    pub fn observe(&mut self, tick: TickId, population: &WalkerPopulation) -> Option<MassRange> {
        let range = sample(population);
        self.last = range.map(|r| (tick, r));
        self.samples += 1;
        if let Some(r) = range {
            tracing::trace!(tick = tick.0, min = r.min, max = r.max, "mass range sampled");
        }
        range
    }

    /// The last non-empty sample and the tick it was taken at.
    pub fn last(&self) -> Option<(TickId, MassRange)> {
        self.last
    }

    /// Number of `observe` calls so far.
    pub fn sample_count(&self) -> u64 {
        self.samples
    }
}
