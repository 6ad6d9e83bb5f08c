//! Criterion benchmarks for the Monte Carlo engine.
//!
//! Benchmarks cover:
//! - RNG normal generation
//! - Single-path simulation with varying step counts
//! - Full parallel runs with varying worker counts

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sim_core::SimulationParams;
use sim_engine::rng::WorkerRng;
use sim_engine::{path::simulate_terminal_pnl, EngineConfig, SimulationEngine};

/// Benchmark RNG generation (foundation for the simulation loop).
fn bench_rng_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rng_generation");

    for n_samples in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("normal_samples", n_samples),
            &n_samples,
            |b, &n| {
                let mut rng = WorkerRng::from_seed(42);
                b.iter(|| {
                    let mut sum = 0.0;
                    for _ in 0..n {
                        sum += rng.gen_normal();
                    }
                    black_box(sum)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark single-path simulation with varying step counts.
fn bench_path_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_simulation");

    for n_steps in [10, 50, 252] {
        let params = SimulationParams::builder()
            .n_steps(n_steps)
            .build()
            .unwrap();
        group.bench_with_input(
            BenchmarkId::new("terminal_pnl", n_steps),
            &params,
            |b, params| {
                let mut rng = WorkerRng::from_seed(42);
                b.iter(|| black_box(simulate_terminal_pnl(params, &mut rng)));
            },
        );
    }

    group.finish();
}

/// Benchmark full parallel runs with varying worker counts.
fn bench_parallel_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_run");
    group.sample_size(20); // Reduce sample size for slower benchmarks

    let params = SimulationParams::default();
    let total_paths = 100_000;

    for n_workers in [1, 2, 4, 8] {
        let config = EngineConfig::builder()
            .n_workers(n_workers)
            .paths_per_worker(total_paths / n_workers)
            .build()
            .unwrap();
        let engine = SimulationEngine::new(config);
        group.bench_with_input(
            BenchmarkId::new("workers", n_workers),
            &engine,
            |b, engine| {
                b.iter(|| black_box(engine.run(&params).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_rng_generation,
    bench_path_simulation,
    bench_parallel_run
);
criterion_main!(benches);
