//! Trek: how a population of hikers spreads along a branching trail.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Trek sub-crates. For most users, adding `trek` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use trek::prelude::*;
//!
//! // Five cells in a row, one unit of mass at the start.
//! let graph = TrailLayout::straight(5).build().unwrap();
//! let mut engine = StepEngine::new(SimulationConfig::new(graph)).unwrap();
//!
//! let result = engine.step().unwrap();
//! assert_eq!(result.tick, TickId(1));
//! assert_eq!(result.population.mass_at(CellId(1), Direction::Forward), 0.9);
//!
//! // Per-cell heat for a renderer, normalised to [0, 1].
//! let field = engine.mass_field().unwrap();
//! let range = field.range().unwrap();
//! assert_eq!(range.normalize(field.values()[1]), 1.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `trek-core` | IDs, grid coordinates, walkers |
//! | [`trail`] | `trek-trail` | Trail graph, layouts, procedural growth |
//! | [`transition`] | `trek-transition` | Transition model trait and stock rules |
//! | [`population`] | `trek-population` | Walker populations and merging |
//! | [`obs`] | `trek-obs` | Mass ranges and heat fields |
//! | [`engine`] | `trek-engine` | Step engine and configuration |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`trek-core`).
pub use trek_core as types;

/// Trail topology and builders (`trek-trail`).
///
/// Build graphs with [`trail::TrailLayout`] or [`trail::grow`].
pub use trek_trail as trail;

/// Transition rules (`trek-transition`).
pub use trek_transition as transition;

/// Walker populations (`trek-population`).
pub use trek_population as population;

/// Read-only observation (`trek-obs`).
pub use trek_obs as obs;

/// The step engine (`trek-engine`).
pub use trek_engine as engine;

/// Common imports for typical Trek usage.
///
/// ```rust
/// use trek::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use trek_core::{CellId, Direction, GridPos, Heading, TickId, Walker, WalkerKey};

    // Trail
    pub use trek_trail::{grow, GridBounds, GrowthConfig, TrailGraph, TrailLayout};

    // Transitions
    pub use trek_transition::{
        Expansion, StayEcho, TrailTransitions, Transition, TransitionModel,
        TransitionProbabilities,
    };

    // Population and observation
    pub use trek_obs::{CellMassField, MassRange, ObservabilityTap};
    pub use trek_population::WalkerPopulation;

    // Errors
    pub use trek_core::ProbabilityError;
    pub use trek_engine::{ConfigError, StepError};
    pub use trek_trail::TrailError;

    // Engine
    pub use trek_engine::{SeedWalker, SimulationConfig, StepEngine, StepMetrics, StepResult};
}
