//! Tick engine for Trek simulations.
//!
//! [`StepEngine`] owns an immutable [`TrailGraph`](trek_trail::TrailGraph),
//! a [`TransitionModel`](trek_transition::TransitionModel), and the
//! published [`WalkerPopulation`](trek_population::WalkerPopulation).
//! Each [`step()`](StepEngine::step) expands every walker against the
//! current snapshot, merges the children, and publishes the result as
//! the next generation. A failed tick leaves the previous generation in
//! place.
//!
//! Configuration lives in [`SimulationConfig`], validated before any
//! state is built.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod metrics;

pub use config::{ConfigError, SeedWalker, SimulationConfig};
pub use engine::{EnginePhase, StepEngine, StepError, StepResult};
pub use metrics::StepMetrics;
