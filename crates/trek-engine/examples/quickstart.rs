//! Trek Quickstart: grow a trail, release hikers, watch the mass spread.
//!
//! Demonstrates:
//!   1. Growing a branching trail procedurally inside a bounded grid
//!   2. Configuring the hiker transition profile and split seeds
//!   3. Stepping the engine and sampling the mass range each tick
//!   4. Rendering the per-cell heat field as ASCII
//!   5. Resetting and replaying on the same graph
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example quickstart

use trek_core::GridPos;
use trek_engine::{SeedWalker, SimulationConfig, StepEngine};
use trek_obs::ObservabilityTap;
use trek_trail::{grow, GridBounds, GrowthConfig, TrailGraph};
use trek_transition::{StayEcho, TransitionProbabilities};
use tracing_subscriber::EnvFilter;

// ─── Grid parameters ────────────────────────────────────────────

const WIDTH: u32 = 48;
const HEIGHT: u32 = 24;
const TICKS: u64 = 40;

const SHADES: &[u8] = b" .:-=+*#%@";

fn render(graph: &TrailGraph, engine: &StepEngine) -> Result<String, Box<dyn std::error::Error>> {
    let field = engine.mass_field()?;
    let mut rows = vec![vec![b' '; WIDTH as usize]; HEIGHT as usize];
    if let Some(range) = field.range() {
        for cell in graph.cells() {
            let level = range.normalize(field.values()[cell.id().index()]);
            let shade = SHADES[((level * (SHADES.len() - 1) as f64).round()) as usize];
            let pos = cell.pos();
            rows[pos.y as usize][pos.x as usize] = if shade == b' ' { b'_' } else { shade };
        }
    }
    Ok(rows
        .into_iter()
        .map(|r| String::from_utf8_lossy(&r).into_owned())
        .collect::<Vec<_>>()
        .join("\n"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("trek=info".parse()?))
        .init();

    // 1. Grow a trail.
    let growth = grow(
        &GrowthConfig::builder()
            .bounds(GridBounds::new(WIDTH, HEIGHT)?)
            .origin(GridPos::new(0, (HEIGHT / 2) as i32))
            .trunk_length(10)
            .branch_length(14)
            .fork_probability(0.2)
            .seed(2024)
            .build()?,
    )?;
    println!(
        "grew {} cells, {} forks, truncated: {}",
        growth.report.placed_cells,
        growth.report.forks,
        growth.report.is_truncated()
    );
    let graph = growth.graph;

    // 2. Configure: hiker profile, four tourists starting on the first cells.
    let starts: Vec<_> = graph.cells().iter().take(4).map(|c| c.id()).collect();
    let config = SimulationConfig::new(graph.clone())
        .with_transitions(TransitionProbabilities::hiker(), StayEcho::Enabled)
        .with_seeds(SeedWalker::split_evenly(&starts));
    let mut engine = StepEngine::new(config)?;
    let mut tap = ObservabilityTap::new();

    // 3. Step.
    for _ in 0..TICKS {
        let result = engine.step()?;
        let tick = result.tick;
        let walkers = result.population.len();
        let dropped = result.metrics.dropped_mass;
        if let Some(range) = tap.observe(tick, engine.population()) {
            println!(
                "tick {:>3}: {walkers:>3} walkers, mass range [{:.5}, {:.5}], dropped {dropped:.5}",
                tick.0, range.min, range.max
            );
        }
    }

    // 4. Render.
    println!("\n{}\n", render(&graph, &engine)?);

    // 5. Reset and replay.
    engine.reset();
    let replay_tick = engine.run(TICKS)?;
    println!(
        "replayed to tick {replay_tick}, total mass {:.5}",
        engine.population().total_mass()
    );
    Ok(())
}
