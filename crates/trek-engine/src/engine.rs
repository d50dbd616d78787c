//! The generational step engine.
//!
//! # Tick lifecycle
//!
//! ```text
//! Idle ──▶ Expanding ──▶ Merging ──▶ Published
//!              │
//!              └─ error ──▶ Idle (previous generation kept)
//! ```
//!
//! Expanding reads only the published population and the immutable
//! graph. Merging reduces the flat child list in snapshot order.
//! Publishing swaps in the new population and advances the tick. There
//! is no terminal state; stop calling [`StepEngine::step`] to stop.

use std::fmt;
use std::time::Instant;

use rayon::prelude::*;
use smallvec::SmallVec;
use trek_core::{CellId, GenerationId, TickId, Walker, WalkerKey};
use trek_obs::{sample, CellMassField, MassRange};
use trek_population::{merge, WalkerPopulation};
use trek_trail::{TrailError, TrailGraph};
use trek_transition::TransitionModel;

use crate::config::{ConfigError, SeedWalker, SimulationConfig};
use crate::metrics::StepMetrics;

// ── EnginePhase ─────────────────────────────────────────────────

/// Where the engine is in its tick cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnginePhase {
    /// Constructed, reset, or rolled back; no tick in progress.
    Idle,
    /// Expanding walkers of the current generation.
    Expanding,
    /// Merging children into the next generation.
    Merging,
    /// The last tick completed and its population is published.
    Published,
}

impl fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Expanding => "expanding",
            Self::Merging => "merging",
            Self::Published => "published",
        };
        f.write_str(s)
    }
}

// ── StepError ───────────────────────────────────────────────────

/// A tick failed and was abandoned.
///
/// The engine still publishes the population from before the failed
/// tick, and the tick counter has not advanced.
#[derive(Debug, PartialEq)]
pub enum StepError {
    /// The transition model could not expand a walker.
    ExpansionFailed {
        /// Name of the model.
        model: String,
        /// The walker being expanded.
        walker: WalkerKey,
        /// The underlying error.
        reason: TrailError,
    },
    /// The model returned a NaN, infinite, or negative probability.
    InvalidProbability {
        /// Name of the model.
        model: String,
        /// The walker being expanded.
        walker: WalkerKey,
        /// The offending probability.
        probability: f64,
    },
    /// The model sent a child to a cell that is not in the graph.
    UnknownDestination {
        /// Name of the model.
        model: String,
        /// The walker being expanded.
        walker: WalkerKey,
        /// The missing destination.
        cell: CellId,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpansionFailed {
                model,
                walker,
                reason,
            } => write!(f, "model '{model}' failed to expand {walker}: {reason}"),
            Self::InvalidProbability {
                model,
                walker,
                probability,
            } => write!(
                f,
                "model '{model}' gave {walker} a child with probability {probability}"
            ),
            Self::UnknownDestination {
                model,
                walker,
                cell,
            } => write!(
                f,
                "model '{model}' sent a child of {walker} to unknown cell {cell}"
            ),
        }
    }
}

impl std::error::Error for StepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ExpansionFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

// ── StepResult ──────────────────────────────────────────────────

/// Result of a successful [`StepEngine::step()`] call.
#[derive(Debug)]
pub struct StepResult<'e> {
    /// The tick that was just published.
    pub tick: TickId,
    /// The published population.
    pub population: &'e WalkerPopulation,
    /// Metrics for this tick.
    pub metrics: StepMetrics,
}

// ── StepEngine ──────────────────────────────────────────────────

struct Expanded {
    children: SmallVec<[Walker; 6]>,
    dropped: f64,
}

/// Advances a walker population across a trail one tick at a time.
///
/// # Examples
///
/// ```
/// use trek_core::{CellId, Direction};
/// use trek_engine::{SimulationConfig, StepEngine};
/// use trek_trail::TrailLayout;
///
/// let graph = TrailLayout::straight(5).build().unwrap();
/// let mut engine = StepEngine::new(SimulationConfig::new(graph)).unwrap();
/// let result = engine.step().unwrap();
/// assert_eq!(result.population.mass_at(CellId(1), Direction::Forward), 0.9);
/// assert_eq!(result.population.mass_at(CellId(0), Direction::Stay), 0.05);
/// ```
pub struct StepEngine {
    graph: TrailGraph,
    model: Box<dyn TransitionModel>,
    seeds: Vec<SeedWalker>,
    parallel_threshold: usize,
    population: WalkerPopulation,
    current_tick: TickId,
    generation: GenerationId,
    phase: EnginePhase,
    last_metrics: StepMetrics,
}

impl fmt::Debug for StepEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepEngine")
            .field("cells", &self.graph.cell_count())
            .field("model", &self.model.name())
            .field("tick", &self.current_tick)
            .field("walkers", &self.population.len())
            .field("phase", &self.phase)
            .finish()
    }
}

impl StepEngine {
    /// Validate `config` and seed the first generation.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let SimulationConfig {
            graph,
            model,
            seeds,
            parallel_threshold,
        } = config;
        let population = seed_population(&seeds);
        tracing::info!(
            cells = graph.cell_count(),
            forks = graph.fork_count(),
            seeds = seeds.len(),
            model = model.name(),
            "step engine ready"
        );
        Ok(Self {
            graph,
            model,
            seeds,
            parallel_threshold,
            population,
            current_tick: TickId(0),
            generation: GenerationId(0),
            phase: EnginePhase::Idle,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Execute one tick.
    ///
    /// # Errors
    ///
    /// Returns [`StepError`] if any walker fails to expand. The tick is
    /// abandoned: the previous population stays published and the tick
    /// counter does not advance.
    pub fn step(&mut self) -> Result<StepResult<'_>, StepError> {
        let tick_start = Instant::now();
        let next_tick = self.current_tick.next();
        let walkers = self.population.walkers();
        let parallel = walkers.len() > self.parallel_threshold;

        // 1. Expand against the published snapshot.
        self.enter(EnginePhase::Expanding);
        let expand_start = Instant::now();
        let expanded = {
            let model = &*self.model;
            let graph = &self.graph;
            if parallel {
                walkers
                    .par_iter()
                    .map(|w| expand_walker(model, graph, w))
                    .collect::<Result<Vec<_>, _>>()
            } else {
                walkers
                    .iter()
                    .map(|w| expand_walker(model, graph, w))
                    .collect::<Result<Vec<_>, _>>()
            }
        };
        let expanded = match expanded {
            Ok(expanded) => expanded,
            Err(e) => return Err(self.rollback(next_tick, e)),
        };
        let expand_us = expand_start.elapsed().as_micros() as u64;

        // 2. Merge in snapshot order.
        self.enter(EnginePhase::Merging);
        let merge_start = Instant::now();
        let children: usize = expanded.iter().map(|e| e.children.len()).sum();
        let dropped_mass: f64 = expanded.iter().map(|e| e.dropped).sum();
        let next = merge(expanded.iter().flat_map(|e| e.children.iter().copied()));
        let merge_us = merge_start.elapsed().as_micros() as u64;

        // 3. Publish.
        let mass_before = self.population.total_mass();
        self.population = next;
        self.current_tick = next_tick;
        self.generation = GenerationId(self.generation.0 + 1);
        self.enter(EnginePhase::Published);

        let metrics = StepMetrics {
            total_us: tick_start.elapsed().as_micros() as u64,
            expand_us,
            merge_us,
            walkers_before: walkers.len(),
            walkers_after: self.population.len(),
            children,
            mass_before,
            mass_after: self.population.total_mass(),
            dropped_mass,
            parallel,
        };
        tracing::debug!(
            tick = next_tick.0,
            walkers = metrics.walkers_after,
            children = metrics.children,
            mass = metrics.mass_after,
            dropped = metrics.dropped_mass,
            parallel,
            "tick published"
        );
        self.last_metrics = metrics.clone();

        Ok(StepResult {
            tick: next_tick,
            population: &self.population,
            metrics,
        })
    }

    /// Execute `ticks` ticks, stopping at the first failure.
    ///
    /// Returns the last published tick.
    pub fn run(&mut self, ticks: u64) -> Result<TickId, StepError> {
        for _ in 0..ticks {
            self.step()?;
        }
        Ok(self.current_tick)
    }

    /// Return to tick 0 with the configured seed walkers.
    ///
    /// The graph and model are reused.
    pub fn reset(&mut self) {
        self.population = seed_population(&self.seeds);
        self.current_tick = TickId(0);
        self.generation = GenerationId(self.generation.0 + 1);
        self.phase = EnginePhase::Idle;
        self.last_metrics = StepMetrics::default();
        tracing::info!(seeds = self.seeds.len(), "step engine reset");
    }

    /// The published population.
    pub fn population(&self) -> &WalkerPopulation {
        &self.population
    }

    /// The last published tick; `TickId(0)` before the first step.
    pub fn current_tick(&self) -> TickId {
        self.current_tick
    }

    /// Counts every population ever published, including resets.
    pub fn generation(&self) -> GenerationId {
        self.generation
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Metrics from the most recent successful tick.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// The trail graph.
    pub fn graph(&self) -> &TrailGraph {
        &self.graph
    }

    /// Name of the transition model.
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Min/max walker mass of the published population.
    pub fn mass_range(&self) -> Option<MassRange> {
        sample(&self.population)
    }

    /// Per-cell mass of the published population.
    pub fn mass_field(&self) -> Result<CellMassField, TrailError> {
        CellMassField::from_population(&self.population, &self.graph)
    }

    fn enter(&mut self, phase: EnginePhase) {
        tracing::trace!(from = %self.phase, to = %phase, "engine phase");
        self.phase = phase;
    }

    fn rollback(&mut self, tick: TickId, error: StepError) -> StepError {
        tracing::warn!(tick = tick.0, %error, "tick abandoned, previous generation kept");
        self.enter(EnginePhase::Idle);
        error
    }
}

fn seed_population(seeds: &[SeedWalker]) -> WalkerPopulation {
    merge(seeds.iter().map(|s| s.to_walker()))
}

fn expand_walker(
    model: &dyn TransitionModel,
    graph: &TrailGraph,
    walker: &Walker,
) -> Result<Expanded, StepError> {
    let expansion = model
        .expand(walker, graph)
        .map_err(|reason| StepError::ExpansionFailed {
            model: model.name().to_string(),
            walker: walker.key(),
            reason,
        })?;

    let mut children = SmallVec::with_capacity(expansion.transitions.len());
    for t in &expansion.transitions {
        if !t.probability.is_finite() || t.probability < 0.0 {
            return Err(StepError::InvalidProbability {
                model: model.name().to_string(),
                walker: walker.key(),
                probability: t.probability,
            });
        }
        if graph.cell(t.cell).is_err() {
            return Err(StepError::UnknownDestination {
                model: model.name().to_string(),
                walker: walker.key(),
                cell: t.cell,
            });
        }
        children.push(t.apply(walker.mass));
    }
    Ok(Expanded {
        children,
        dropped: walker.mass * expansion.dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use trek_core::Direction;
    use trek_trail::TrailLayout;
    use trek_transition::{Expansion, Transition};

    fn engine(cells: u32) -> StepEngine {
        let graph = TrailLayout::straight(cells).build().unwrap();
        StepEngine::new(SimulationConfig::new(graph)).unwrap()
    }

    /// Sends every child to a cell that does not exist.
    struct Stray;

    impl TransitionModel for Stray {
        fn name(&self) -> &str {
            "stray"
        }

        fn expand(&self, _: &Walker, _: &TrailGraph) -> Result<Expansion, TrailError> {
            let mut out = Expansion::default();
            out.transitions
                .push(Transition::new(CellId(999), Direction::Forward, 1.0));
            Ok(out)
        }
    }

    /// Emits a NaN probability.
    struct NanModel;

    impl TransitionModel for NanModel {
        fn name(&self) -> &str {
            "nan"
        }

        fn expand(&self, w: &Walker, _: &TrailGraph) -> Result<Expansion, TrailError> {
            let mut out = Expansion::default();
            out.transitions
                .push(Transition::new(w.cell, Direction::Stay, f64::NAN));
            Ok(out)
        }
    }

    #[test]
    fn new_engine_is_idle_at_tick_zero() {
        let e = engine(5);
        assert_eq!(e.current_tick(), TickId(0));
        assert_eq!(e.phase(), EnginePhase::Idle);
        assert_eq!(e.population().len(), 1);
        assert_eq!(e.model_name(), "trail_transitions");
    }

    #[test]
    fn step_publishes_and_advances() {
        let mut e = engine(5);
        let r = e.step().unwrap();
        assert_eq!(r.tick, TickId(1));
        assert_eq!(r.population.len(), 2);
        assert_eq!(r.metrics.walkers_before, 1);
        assert_eq!(r.metrics.children, 2);
        assert_eq!(r.metrics.dropped_mass, 0.05);
        assert_eq!(e.phase(), EnginePhase::Published);
        assert_eq!(e.current_tick(), TickId(1));
        assert_eq!(e.generation(), GenerationId(1));
        assert_eq!(e.last_metrics().walkers_after, 2);
    }

    #[test]
    fn run_advances_many_ticks() {
        let mut e = engine(8);
        assert_eq!(e.run(10).unwrap(), TickId(10));
    }

    #[test]
    fn reset_restores_seeds() {
        let mut e = engine(5);
        let seeded = e.population().clone();
        e.run(3).unwrap();
        e.reset();
        assert_eq!(e.current_tick(), TickId(0));
        assert_eq!(e.population(), &seeded);
        assert_eq!(e.phase(), EnginePhase::Idle);
        assert_eq!(e.last_metrics(), &StepMetrics::default());
        assert_eq!(e.generation(), GenerationId(4));
    }

    #[test]
    fn unknown_destination_rolls_back() {
        let graph = TrailLayout::straight(3).build().unwrap();
        let mut e = StepEngine::new(SimulationConfig::new(graph).with_model(Stray)).unwrap();
        let before = e.population().clone();
        let err = e.step().unwrap_err();
        assert!(matches!(
            err,
            StepError::UnknownDestination {
                cell: CellId(999),
                ..
            }
        ));
        assert_eq!(e.population(), &before);
        assert_eq!(e.current_tick(), TickId(0));
        assert_eq!(e.phase(), EnginePhase::Idle);
    }

    #[test]
    fn nan_probability_rolls_back() {
        let graph = TrailLayout::straight(3).build().unwrap();
        let mut e = StepEngine::new(SimulationConfig::new(graph).with_model(NanModel)).unwrap();
        assert!(matches!(
            e.step(),
            Err(StepError::InvalidProbability { .. })
        ));
        assert_eq!(e.current_tick(), TickId(0));
    }

    #[test]
    fn observation_helpers_read_published_population() {
        let mut e = engine(5);
        e.step().unwrap();
        let range = e.mass_range().unwrap();
        assert_eq!(range.min, 0.05);
        assert_eq!(range.max, 0.9);
        let field = e.mass_field().unwrap();
        assert_eq!(field.values(), &[0.05, 0.9, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let graph = TrailLayout::straight(3).build().unwrap();
        let config = SimulationConfig::new(graph).with_seeds(Vec::new());
        assert_eq!(StepEngine::new(config).unwrap_err(), ConfigError::NoSeeds);
    }

    #[test]
    fn phase_display() {
        assert_eq!(EnginePhase::Merging.to_string(), "merging");
    }
}
