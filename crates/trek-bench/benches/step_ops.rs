//! Criterion benchmarks for engine ticks on grown trails.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use trek_bench::{build_trail, profile, reference_growth, stress_growth};
use trek_engine::StepEngine;

fn engine(stress: bool, parallel_threshold: usize) -> StepEngine {
    let growth = if stress {
        stress_growth(42).unwrap()
    } else {
        reference_growth(42).unwrap()
    };
    let graph = build_trail(&growth).unwrap();
    let mut engine = StepEngine::new(profile(graph, parallel_threshold).unwrap()).unwrap();
    // Warm up until the population has spread into all three directions.
    engine.run(8).unwrap();
    engine
}

fn bench_tick_reference(c: &mut Criterion) {
    let mut seq = engine(false, usize::MAX);
    c.bench_function("tick_reference_sequential", |b| {
        b.iter(|| {
            let result = seq.step().unwrap();
            black_box(result.population.len());
        });
    });

    let mut par = engine(false, 0);
    c.bench_function("tick_reference_parallel", |b| {
        b.iter(|| {
            let result = par.step().unwrap();
            black_box(result.population.len());
        });
    });
}

fn bench_tick_stress(c: &mut Criterion) {
    let mut par = engine(true, 0);
    c.bench_function("tick_stress_parallel", |b| {
        b.iter(|| {
            let result = par.step().unwrap();
            black_box(result.population.len());
        });
    });
}

fn bench_100_ticks_reference(c: &mut Criterion) {
    let graph = build_trail(&reference_growth(42).unwrap()).unwrap();
    c.bench_function("100_ticks_reference", |b| {
        b.iter(|| {
            let mut engine =
                StepEngine::new(profile(graph.clone(), usize::MAX).unwrap()).unwrap();
            black_box(engine.run(100).unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_tick_reference,
    bench_tick_stress,
    bench_100_ticks_reference
);
criterion_main!(benches);
