//! Per-tick metrics for the step engine.

/// Timing and mass accounting for a single tick.
///
/// Durations are in microseconds. The engine fills these in after each
/// successful `step()`; the most recent set is kept on the engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the whole tick, in microseconds.
    pub total_us: u64,
    /// Time spent expanding walkers, in microseconds.
    pub expand_us: u64,
    /// Time spent merging children, in microseconds.
    pub merge_us: u64,
    /// Walkers in the population the tick started from.
    pub walkers_before: usize,
    /// Walkers in the published population.
    pub walkers_after: usize,
    /// Children produced before merging.
    pub children: usize,
    /// Total mass the tick started from.
    pub mass_before: f64,
    /// Total mass of the published population.
    pub mass_after: f64,
    /// Mass lost at open boundaries this tick.
    pub dropped_mass: f64,
    /// Whether expansion ran on the rayon pool.
    pub parallel: bool,
}

impl StepMetrics {
    /// Walkers removed by merging: `children - walkers_after`.
    pub fn merged_away(&self) -> usize {
        self.children.saturating_sub(self.walkers_after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.expand_us, 0);
        assert_eq!(m.merge_us, 0);
        assert_eq!(m.walkers_before, 0);
        assert_eq!(m.walkers_after, 0);
        assert_eq!(m.children, 0);
        assert_eq!(m.mass_before, 0.0);
        assert_eq!(m.mass_after, 0.0);
        assert_eq!(m.dropped_mass, 0.0);
        assert!(!m.parallel);
    }

    #[test]
    fn merged_away_counts_collapsed_children() {
        let m = StepMetrics {
            children: 9,
            walkers_after: 6,
            ..StepMetrics::default()
        };
        assert_eq!(m.merged_away(), 3);
    }
}
