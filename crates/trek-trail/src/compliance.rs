//! Structural checks every built graph must pass.
//!
//! Shared by the layout and growth tests so both builders are held to
//! the same contract.

use crate::graph::TrailGraph;
use std::collections::HashSet;
use trek_core::{CellId, Heading};

/// Panics with a readable message if `graph` violates a trail invariant.
pub(crate) fn assert_graph_invariants(graph: &TrailGraph) {
    graph
        .validate()
        .unwrap_or_else(|e| panic!("validate() failed: {e}"));

    let positions: HashSet<_> = graph.cells().iter().map(|c| c.pos()).collect();
    assert_eq!(positions.len(), graph.cell_count(), "duplicate coordinates");

    assert!(graph.cell(CellId(0)).unwrap().is_start());
    assert_eq!(
        graph.cells().iter().filter(|c| c.is_start()).count(),
        1,
        "exactly one origin"
    );

    for cell in graph.cells() {
        for succ in cell.successors() {
            let s = graph.cell(*succ).unwrap();
            assert!(
                s.sequence() > cell.sequence(),
                "sequence must increase along {} -> {}",
                cell.id(),
                s.id()
            );
            assert!(
                Heading::between(cell.pos(), s.pos()).is_some(),
                "cells {} and {} are not grid-adjacent",
                cell.id(),
                s.id()
            );
        }
    }
}
