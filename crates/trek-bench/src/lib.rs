//! Benchmark profiles for the Trek trail-traffic simulation.
//!
//! - [`reference_growth`]: a procedurally grown trail of about 2K cells
//! - [`stress_growth`]: the same recipe capped at about 16K cells
//! - [`profile`]: a ready-to-run [`SimulationConfig`] with one seed per cell

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use trek_core::{CellId, GridPos};
use trek_engine::{ConfigError, SeedWalker, SimulationConfig};
use trek_trail::{grow, GridBounds, GrowthConfig, TrailError, TrailGraph};
use trek_transition::{StayEcho, TransitionProbabilities};

/// Growth recipe for the reference profile: wide grid, deep forking.
pub fn reference_growth(seed: u64) -> Result<GrowthConfig, TrailError> {
    GrowthConfig::builder()
        .bounds(GridBounds::new(128, 128)?)
        .origin(GridPos::new(0, 64))
        .trunk_length(48)
        .branch_length(40)
        .max_fork_depth(6)
        .fork_probability(0.12)
        .min_fork_spacing(6)
        .max_cells(2048)
        .seed(seed)
        .build()
}

/// Growth recipe for the stress profile: 8x the reference cell cap.
pub fn stress_growth(seed: u64) -> Result<GrowthConfig, TrailError> {
    let mut config = reference_growth(seed)?;
    config.bounds = Some(GridBounds::new(512, 512)?);
    config.origin = GridPos::new(0, 256);
    config.branch_length = 96;
    config.max_fork_depth = 10;
    config.max_cells = 16384;
    config.validate()?;
    Ok(config)
}

/// Grow a trail from `growth`.
pub fn build_trail(growth: &GrowthConfig) -> Result<TrailGraph, TrailError> {
    Ok(grow(growth)?.graph)
}

/// A config for `graph` with the hiker rules and one seed on every cell.
///
/// Spreading the seeds makes the first measured tick representative of a
/// long-running population instead of a single walker at the origin.
pub fn profile(
    graph: TrailGraph,
    parallel_threshold: usize,
) -> Result<SimulationConfig, ConfigError> {
    let cells: Vec<CellId> = graph.cells().iter().map(|c| c.id()).collect();
    let config = SimulationConfig::new(graph)
        .with_transitions(TransitionProbabilities::hiker(), StayEcho::Enabled)
        .with_seeds(SeedWalker::split_evenly(&cells))
        .with_parallel_threshold(parallel_threshold);
    config.validate()?;
    Ok(config)
}
