//! Walker populations for Trek simulations.
//!
//! A [`WalkerPopulation`] holds at most one walker per
//! `(cell, direction)` key. [`merge`] builds one from an arbitrary list
//! of child walkers by summing the masses of walkers sharing a key.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod merge;
pub mod population;

pub use merge::merge;
pub use population::WalkerPopulation;
