//! Criterion benchmarks for the tour GA.
//!
//! Uses synthetic customers on a jittered grid to measure pure engine
//! overhead independent of any instance format.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tour_ga::distance::DistanceMatrix;
use tour_ga::ga::{
    operators::{order_crossover, paired_order_crossover},
    CityId, FitnessEvaluator, GaConfig, GaRunner, TourProblem, Variant,
};
use tour_ga::random::{create_rng, shuffle};

// ===========================================================================
// Synthetic instance
// ===========================================================================

fn grid_problem(n: usize) -> TourProblem<DistanceMatrix> {
    let side = (n as f64).sqrt().ceil() as usize;
    let mut points = vec![(0, 0.0, 0.0)];
    for i in 1..=n {
        let (row, col) = ((i - 1) / side, (i - 1) % side);
        let jitter = ((i * 7919) % 13) as f64 / 13.0;
        points.push((i, col as f64 * 10.0 + jitter, row as f64 * 10.0 - jitter));
    }
    let matrix = DistanceMatrix::euclidean(&points).expect("distinct ids");
    TourProblem::new(0, (1..=n).collect(), matrix).expect("valid customers")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_ga_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_run");
    group.sample_size(10);

    for variant in [Variant::Classic, Variant::Paired] {
        for (n, pop, gen) in [(20usize, 50usize, 50usize), (50, 100, 30), (100, 100, 20)] {
            let problem = grid_problem(n);
            let config = GaConfig {
                population_size: pop,
                max_generations: gen,
                variant,
                seed: Some(42),
                ..GaConfig::default()
            };
            group.bench_with_input(
                BenchmarkId::new(format!("{variant:?}_p{pop}_g{gen}"), n),
                &(problem, config),
                |b, (p, c)| {
                    b.iter(|| {
                        let result = GaRunner::run(black_box(p), black_box(c));
                        black_box(result)
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_crossover(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossover");

    for &n in &[50usize, 200, 1000] {
        let mut rng = create_rng(42);
        let p1: Vec<CityId> = (1..=n).collect();
        let mut p2 = p1.clone();
        shuffle(&mut p2, &mut rng);

        group.bench_with_input(BenchmarkId::new("order", n), &(&p1, &p2), |b, (a, d)| {
            b.iter(|| black_box(order_crossover(a, d, &mut rng)))
        });
        group.bench_with_input(BenchmarkId::new("paired_order", n), &(&p1, &p2), |b, (a, d)| {
            b.iter(|| black_box(paired_order_crossover(a, d, &mut rng)))
        });
    }
    group.finish();
}

fn bench_route_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_distance");

    for &n in &[50usize, 200, 1000] {
        let problem = grid_problem(n);
        let mut route: Vec<CityId> = vec![0];
        route.extend(problem.customers());
        route.push(0);
        let eval = FitnessEvaluator::new(problem.oracle());

        group.bench_with_input(BenchmarkId::from_parameter(n), &route, |b, r| {
            b.iter(|| black_box(eval.route_distance(black_box(r))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ga_run, bench_crossover, bench_route_distance);
criterion_main!(benches);
