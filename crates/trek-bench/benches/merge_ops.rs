//! Criterion micro-benchmarks for merging and sampling populations.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use trek_core::{CellId, Direction, Walker};
use trek_obs::{sample, CellMassField};
use trek_population::merge;
use trek_test_utils::straight_trail;

/// `n` children spread over `cells` cells, every key hit several times.
fn children(n: usize, cells: u32) -> Vec<Walker> {
    (0..n)
        .map(|i| {
            let cell = CellId((i as u32 * 7919) % cells);
            let direction = Direction::ALL[i % 3];
            Walker::new(cell, direction, 1.0 / n as f64)
        })
        .collect()
}

fn bench_merge(c: &mut Criterion) {
    let small = children(6_000, 1_000);
    c.bench_function("merge_6k_children", |b| {
        b.iter(|| black_box(merge(small.iter().copied()).len()));
    });

    let large = children(60_000, 10_000);
    c.bench_function("merge_60k_children", |b| {
        b.iter(|| black_box(merge(large.iter().copied()).len()));
    });
}

fn bench_observe(c: &mut Criterion) {
    let graph = straight_trail(10_000);
    let population = merge(children(60_000, 10_000));
    c.bench_function("sample_range_30k", |b| {
        b.iter(|| black_box(sample(&population)));
    });
    c.bench_function("cell_mass_field_10k", |b| {
        b.iter(|| black_box(CellMassField::from_population(&population, &graph).unwrap()));
    });
}

criterion_group!(benches, bench_merge, bench_observe);
criterion_main!(benches);
