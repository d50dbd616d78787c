//! Simulation configuration, seeding, and configuration errors.

use std::error::Error;
use std::fmt;

use trek_core::{CellId, Direction, ProbabilityError, Walker, MASS_EPSILON};
use trek_trail::{TrailError, TrailGraph};
use trek_transition::{StayEcho, TrailTransitions, TransitionModel, TransitionProbabilities};

/// Populations larger than this expand on the rayon pool by default.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2048;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`SimulationConfig::validate()`].
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// A transition probability is invalid.
    Probability(ProbabilityError),
    /// The trail graph is invalid.
    Trail(TrailError),
    /// No seed walkers were given.
    NoSeeds,
    /// A seed walker references a cell that is not in the graph.
    SeedOffGraph {
        /// The missing cell.
        cell: CellId,
    },
    /// A seed walker's mass is NaN, infinite, or negative.
    InvalidSeedMass {
        /// Cell of the offending seed.
        cell: CellId,
        /// The offending mass.
        mass: f64,
    },
    /// Seed masses do not sum to 1.
    SeedMassNotUnit {
        /// The actual sum.
        total: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Probability(e) => write!(f, "probability: {e}"),
            Self::Trail(e) => write!(f, "trail: {e}"),
            Self::NoSeeds => write!(f, "at least one seed walker is required"),
            Self::SeedOffGraph { cell } => {
                write!(f, "seed walker at cell {cell}, which is not in the graph")
            }
            Self::InvalidSeedMass { cell, mass } => {
                write!(f, "seed walker at cell {cell} has invalid mass {mass}")
            }
            Self::SeedMassNotUnit { total } => {
                write!(f, "seed masses sum to {total}, expected 1")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Probability(e) => Some(e),
            Self::Trail(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProbabilityError> for ConfigError {
    fn from(e: ProbabilityError) -> Self {
        Self::Probability(e)
    }
}

impl From<TrailError> for ConfigError {
    fn from(e: TrailError) -> Self {
        Self::Trail(e)
    }
}

// ── SeedWalker ─────────────────────────────────────────────────────

/// A walker placed on the trail before the first tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedWalker {
    /// Starting cell.
    pub cell: CellId,
    /// Starting direction.
    pub direction: Direction,
    /// Starting mass.
    pub mass: f64,
}

impl SeedWalker {
    /// The whole unit of mass, heading forward from `cell`.
    pub fn unit(cell: CellId) -> Self {
        Self {
            cell,
            direction: Direction::Forward,
            mass: 1.0,
        }
    }

    /// One forward walker per cell in `cells`, sharing a unit of mass
    /// equally. Empty input gives no seeds.
    pub fn split_evenly(cells: &[CellId]) -> Vec<SeedWalker> {
        let share = 1.0 / cells.len().max(1) as f64;
        cells
            .iter()
            .map(|&cell| SeedWalker {
                cell,
                direction: Direction::Forward,
                mass: share,
            })
            .collect()
    }

    /// The walker this seed becomes.
    pub fn to_walker(self) -> Walker {
        Walker::new(self.cell, self.direction, self.mass)
    }
}

// ── SimulationConfig ───────────────────────────────────────────────

/// Everything needed to construct a [`StepEngine`](crate::StepEngine).
///
/// [`SimulationConfig::new`] starts from the stock trail transitions,
/// a single unit seed at the graph origin, and the default parallel
/// threshold.
pub struct SimulationConfig {
    /// Trail topology. Read-only once the engine is built.
    pub graph: TrailGraph,
    /// Transition rules consulted for every walker.
    pub model: Box<dyn TransitionModel>,
    /// Initial walkers; masses must sum to 1.
    pub seeds: Vec<SeedWalker>,
    /// Expand on the rayon pool when the population is larger than this.
    pub parallel_threshold: usize,
}

impl fmt::Debug for SimulationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationConfig")
            .field("cells", &self.graph.cell_count())
            .field("model", &self.model.name())
            .field("seeds", &self.seeds)
            .field("parallel_threshold", &self.parallel_threshold)
            .finish()
    }
}

impl SimulationConfig {
    /// Defaults for `graph`.
    pub fn new(graph: TrailGraph) -> Self {
        let origin = graph.origin();
        Self {
            graph,
            model: Box::new(TrailTransitions::default()),
            seeds: vec![SeedWalker::unit(origin)],
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Use the stock trail rules with these parameters.
    pub fn with_transitions(
        self,
        probabilities: TransitionProbabilities,
        stay_echo: StayEcho,
    ) -> Self {
        self.with_model(TrailTransitions::new(probabilities, stay_echo))
    }

    /// Use a custom transition model.
    pub fn with_model(mut self, model: impl TransitionModel) -> Self {
        self.model = Box::new(model);
        self
    }

    /// Replace the seed walkers.
    pub fn with_seeds(mut self, seeds: Vec<SeedWalker>) -> Self {
        self.seeds = seeds;
        self
    }

    /// Set the parallel expansion threshold. `usize::MAX` disables it.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Validate all invariants without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Graph structure.
        self.graph.validate()?;

        // 2. Seeds exist, sit on the graph, and carry valid mass.
        if self.seeds.is_empty() {
            return Err(ConfigError::NoSeeds);
        }
        for seed in &self.seeds {
            if self.graph.cell(seed.cell).is_err() {
                return Err(ConfigError::SeedOffGraph { cell: seed.cell });
            }
            if !seed.mass.is_finite() || seed.mass < 0.0 {
                return Err(ConfigError::InvalidSeedMass {
                    cell: seed.cell,
                    mass: seed.mass,
                });
            }
        }

        // 3. Seeds carry exactly one unit of mass between them.
        let total: f64 = self.seeds.iter().map(|s| s.mass).sum();
        if (total - 1.0).abs() > MASS_EPSILON {
            return Err(ConfigError::SeedMassNotUnit { total });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trek_trail::TrailLayout;

    fn straight(n: u32) -> TrailGraph {
        TrailLayout::straight(n).build().unwrap()
    }

    #[test]
    fn defaults_validate() {
        let config = SimulationConfig::new(straight(5));
        assert!(config.validate().is_ok());
        assert_eq!(config.seeds, vec![SeedWalker::unit(CellId(0))]);
        assert_eq!(config.model.name(), "trail_transitions");
    }

    #[test]
    fn empty_seeds_rejected() {
        let config = SimulationConfig::new(straight(5)).with_seeds(Vec::new());
        assert_eq!(config.validate(), Err(ConfigError::NoSeeds));
    }

    #[test]
    fn seed_off_graph_rejected() {
        let config =
            SimulationConfig::new(straight(3)).with_seeds(vec![SeedWalker::unit(CellId(3))]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::SeedOffGraph { cell: CellId(3) })
        );
    }

    #[test]
    fn negative_or_nan_seed_mass_rejected() {
        for mass in [-0.5, f64::NAN, f64::INFINITY] {
            let seed = SeedWalker {
                mass,
                ..SeedWalker::unit(CellId(0))
            };
            let config = SimulationConfig::new(straight(3)).with_seeds(vec![seed]);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidSeedMass { .. })
            ));
        }
    }

    #[test]
    fn seed_mass_must_sum_to_one() {
        let seeds = vec![
            SeedWalker {
                mass: 0.5,
                ..SeedWalker::unit(CellId(0))
            },
            SeedWalker {
                mass: 0.4,
                ..SeedWalker::unit(CellId(1))
            },
        ];
        let config = SimulationConfig::new(straight(3)).with_seeds(seeds);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SeedMassNotUnit { .. })
        ));
    }

    #[test]
    fn split_evenly_sums_to_one() {
        let cells = [CellId(0), CellId(1), CellId(2)];
        let seeds = SeedWalker::split_evenly(&cells);
        assert_eq!(seeds.len(), 3);
        let config = SimulationConfig::new(straight(3)).with_seeds(seeds);
        assert!(config.validate().is_ok());
        assert!(SeedWalker::split_evenly(&[]).is_empty());
    }

    #[test]
    fn probability_errors_convert() {
        fn build() -> Result<SimulationConfig, ConfigError> {
            let p = TransitionProbabilities::new(0.9, 0.2, 0.0)?;
            Ok(SimulationConfig::new(straight(3)).with_transitions(p, StayEcho::Enabled))
        }
        let err = build().unwrap_err();
        assert!(matches!(err, ConfigError::Probability(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("probability: "));
    }

    #[test]
    fn trail_errors_convert() {
        fn build() -> Result<SimulationConfig, ConfigError> {
            let graph = TrailLayout::straight(4)
                .with_bounds(trek_trail::GridBounds::new(2, 1)?)
                .build()?;
            Ok(SimulationConfig::new(graph))
        }
        assert!(matches!(build(), Err(ConfigError::Trail(_))));
    }

    #[test]
    fn debug_names_model() {
        let s = format!("{:?}", SimulationConfig::new(straight(2)));
        assert!(s.contains("trail_transitions"));
    }
}
