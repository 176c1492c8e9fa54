//! Criterion benchmarks for the Gray-coded genetic algorithm.
//!
//! Uses the bundled reference objectives to measure generation overhead
//! (ranking, crossover, roulette selection) at a few population sizes.

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gray_ga::ga::benchmarks::{DampedSine, Himmelblau};
use gray_ga::ga::{FunctionParams, GaConfig, GaRunner, Population};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn config(population: usize, generations: usize) -> GaConfig {
    GaConfig::default()
        .with_population_size(population)
        .with_max_generations(generations)
        .with_step_delay(Duration::ZERO)
        .with_seed(42)
}

fn bench_damped_sine(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_damped_sine");
    group.sample_size(10);

    for (pop, gen) in [(20usize, 100usize), (100, 100), (500, 20)] {
        let params = FunctionParams::single(-5.0, 5.0, 1e-5).unwrap();
        group.bench_with_input(
            BenchmarkId::new(format!("p{}_g{}", pop, gen), pop),
            &(params, config(pop, gen)),
            |b, (p, c)| {
                b.iter(|| {
                    let mut runner = GaRunner::new(p.clone(), DampedSine, c.clone()).unwrap();
                    black_box(runner.run_to_completion(None).unwrap())
                })
            },
        );
    }
    group.finish();
}

fn bench_himmelblau(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_himmelblau");
    group.sample_size(10);

    for &pop in &[30usize, 200] {
        let params =
            FunctionParams::from_bounds(&[-4.0, -4.0], &[4.0, 4.0], &[1e-4, 1e-4]).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(pop),
            &(params, config(pop, 50)),
            |b, (p, c)| {
                b.iter(|| {
                    let mut runner = GaRunner::new(p.clone(), Himmelblau, c.clone()).unwrap();
                    black_box(runner.run_to_completion(None).unwrap())
                })
            },
        );
    }
    group.finish();
}

fn bench_population_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("population_step");
    group.sample_size(10);

    let params = Arc::new(FunctionParams::single(-5.0, 5.0, 1e-5).unwrap());
    for &pop in &[50usize, 500] {
        let mut rng = StdRng::seed_from_u64(7);
        let population = Population::new(pop, params.clone(), &mut rng).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(pop), &population, |b, p| {
            b.iter(|| {
                let mut next = p.clone();
                black_box(next.step(&DampedSine, 0.85, 0.15, false, &mut rng).unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_damped_sine,
    bench_himmelblau,
    bench_population_step
);
criterion_main!(benches);
