//! Core types for the Trek trail-traffic simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other Trek crate: cell and tick
//! identifiers, grid coordinates, walker values, and the probability
//! validation error.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod id;
pub mod walker;

pub use error::ProbabilityError;
pub use grid::{GridPos, Heading};
pub use id::{CellId, GenerationId, TickId};
pub use walker::{Direction, Walker, WalkerKey, MASS_EPSILON};
