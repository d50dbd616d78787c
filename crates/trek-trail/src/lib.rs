//! Trail graph topology for Trek simulations.
//!
//! This crate defines [`TrailGraph`], the immutable cell arena every
//! walker moves across, and the two ways of building one:
//!
//! - [`TrailLayout`]: a deterministic, hand-authored description of runs
//!   and three-way forks.
//! - [`GrowthConfig`]: procedural growth by a seeded self-avoiding random
//!   walk that forks at random and truncates gracefully when boxed in.
//!
//! Both produce graphs with unique coordinates, sequence positions that
//! strictly increase along every forward path, and fully linked branch
//! triples.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bounds;
pub mod cell;
pub mod error;
pub mod graph;
pub mod growth;
pub mod layout;

#[cfg(test)]
pub(crate) mod compliance;

pub use bounds::GridBounds;
pub use cell::{CellRole, TrailCell};
pub use error::TrailError;
pub use graph::TrailGraph;
pub use growth::{grow, Growth, GrowthConfig, GrowthConfigBuilder, GrowthReport};
pub use layout::{Fork, Segment, TrailLayout};
