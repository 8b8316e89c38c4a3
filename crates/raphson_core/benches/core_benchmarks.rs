//! Criterion benchmarks for raphson_core.
//!
//! Measures parsing, differentiation and full solves, and how batch solving
//! scales with the number of problems.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use raphson_core::expr::{derive, evaluate, parse, simplify};
use raphson_core::math::solvers::{run, Config};
use raphson_core::{solve, solve_batch};

const FORMULAS: [(&str, &str); 3] = [
    ("cubic", "x**3 - 2*x - 5"),
    ("transcendental", "exp(-x^2) * sin(3*x) - x/4"),
    ("nested", "sqrt(1 + (x - 1)^2) * atan(x^3 + 2) - ln(x^2 + 1)"),
];

/// Benchmark parsing and symbolic work on formulas of growing size.
fn bench_expression(c: &mut Criterion) {
    let mut group = c.benchmark_group("expression");

    for (name, text) in FORMULAS {
        group.bench_with_input(BenchmarkId::new("parse", name), &text, |b, text| {
            b.iter(|| parse(black_box(text)).unwrap());
        });

        let f = parse(text).unwrap();
        group.bench_with_input(BenchmarkId::new("derive_simplify", name), &f, |b, f| {
            b.iter(|| simplify(&derive(black_box(f))));
        });

        let df = simplify(&derive(&f));
        group.bench_with_input(BenchmarkId::new("evaluate_derivative", name), &df, |b, df| {
            b.iter(|| evaluate(black_box(df), black_box(0.7_f64)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the iteration engine alone and the end-to-end solve.
fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");

    let config = Config::new("x**3 - 2*x - 5", 3.0, 10);
    let f = parse(&config.formula).unwrap();
    let df = simplify(&derive(&f));

    group.bench_function("engine_cubic", |b| {
        b.iter(|| run(black_box(&f), black_box(&df), &config));
    });

    group.bench_function("end_to_end_cubic", |b| {
        b.iter(|| solve(black_box(&config)).unwrap());
    });

    // Never converges, so every run hits the cap.
    let capped = Config::new("x^2 + 1", 0.5, 10).with_max_iterations(1000);
    group.bench_function("end_to_end_capped", |b| {
        b.iter(|| solve(black_box(&capped)).unwrap());
    });

    group.finish();
}

/// Benchmark batch solving at different batch sizes.
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_batch");

    for size in [10, 100, 1000] {
        let configs: Vec<Config> = (0..size)
            .map(|i| Config::new(format!("x^2 - {}", i + 1), 1.0, 10))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &configs, |b, configs| {
            b.iter(|| solve_batch(black_box(configs)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_expression, bench_solve, bench_batch);
criterion_main!(benches);
