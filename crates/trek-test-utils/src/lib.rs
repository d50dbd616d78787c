//! Test utilities for Trek development.
//!
//! Trail fixtures, mass helpers, and mock
//! [`TransitionModel`](trek_transition::TransitionModel)s shared by the
//! integration tests and benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use trek_core::{Walker, MASS_EPSILON};
use trek_trail::{TrailGraph, TrailLayout};

/// A straight trail of `cells` cells heading east.
pub fn straight_trail(cells: u32) -> TrailGraph {
    TrailLayout::straight(cells)
        .build()
        .expect("straight layouts never collide")
}

/// A trunk of `trunk` cells splitting into three branches of `branch` cells.
pub fn single_fork_trail(trunk: u32, branch: u32) -> TrailGraph {
    TrailLayout::single_fork(trunk, branch.max(1))
        .build()
        .expect("single-fork layouts never collide")
}

/// The 21-cell two-fork demo trail.
pub fn double_fork_trail() -> TrailGraph {
    TrailLayout::double_fork()
        .build()
        .expect("demo layout is valid")
}

/// Sum of walker masses.
pub fn total_mass(walkers: &[Walker]) -> f64 {
    walkers.iter().map(|w| w.mass).sum()
}

/// Panics unless `a` and `b` agree within `tolerance`.
pub fn assert_close(a: f64, b: f64, tolerance: f64) {
    assert!(
        (a - b).abs() <= tolerance,
        "expected {b}, got {a} (tolerance {tolerance})"
    );
}

/// [`assert_close`] with the default mass tolerance.
pub fn assert_mass(a: f64, b: f64) {
    assert_close(a, b, MASS_EPSILON);
}
