//! Transition rules for Trek walkers.
//!
//! A [`TransitionModel`] maps one walker on a [`TrailGraph`](trek_trail::TrailGraph)
//! to its children as `(cell, direction, probability)` triples, plus the
//! probability share that falls off an open boundary. The stock model is
//! [`TrailTransitions`], parameterised by [`TransitionProbabilities`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod model;
pub mod probabilities;
pub mod trail;

pub use model::{Expansion, Transition, TransitionModel};
pub use probabilities::TransitionProbabilities;
pub use trail::{StayEcho, TrailTransitions};
