//! Benchmarks for polylogarithm evaluation.
//!
//! Includes:
//! - Constant table construction
//! - Li_n in each region, double and arbitrary precision
//! - Li_{2,2} for each reduction strategy
//! - Batch evaluation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use polylogs::prelude::*;

/// Benchmark constant table construction.
fn bench_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("constant_table");
    group.sample_size(10);

    for bits in [53, 113, 232] {
        group.bench_with_input(BenchmarkId::new("weight_10", bits), &bits, |b, &bits| {
            b.iter(|| black_box(ConstantTable::<BigFloat>::new(10, bits).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark Li_n at one point per region.
fn bench_li_regions(c: &mut Criterion) {
    let points = [
        ("taylor", 0.1, 0.05),
        ("bernoulli", 0.25, 0.25),
        ("unit_expansion", 0.75, 0.25),
        ("inversion", 2.0, 4.0),
        ("near_circle", 0.01, 0.994_937),
    ];

    let double = Engine::<f64>::new(10).unwrap();
    let mut group = c.benchmark_group("li_f64");
    for (name, re, im) in points {
        let x = Complex::new(re, im);
        group.bench_function(BenchmarkId::new(name, 5), |b| {
            b.iter(|| black_box(double.li(5, &x).unwrap()))
        });
    }
    group.finish();

    let quad = Engine::<BigFloat>::with_precision(10, 34).unwrap();
    let mut group = c.benchmark_group("li_34_digits");
    for (name, re, im) in points {
        let x = quad.complex_from_f64(re, im).unwrap();
        group.bench_function(BenchmarkId::new(name, 5), |b| {
            b.iter(|| black_box(quad.li(5, &x).unwrap()))
        });
    }
    group.finish();
}

/// Benchmark Li_{2,2} for each strategy.
fn bench_li22(c: &mut Criterion) {
    let pairs = [
        ("direct", (0.125, 0.125), (0.125, 0.125)),
        ("swapped", (2.0, 0.125), (0.125, 0.125)),
        ("reflected", (2.0, 0.125), (2.0, 0.125)),
        ("tail_series", (0.2, -0.9), (0.2, -0.9)),
    ];

    let engine = Engine::<f64>::new(4).unwrap();
    let mut group = c.benchmark_group("li22_f64");
    for (name, (xr, xi), (yr, yi)) in pairs {
        let x = Complex::new(xr, xi);
        let y = Complex::new(yr, yi);
        group.bench_function(name, |b| b.iter(|| black_box(engine.li22(&x, &y).unwrap())));
    }
    group.finish();
}

/// Benchmark batch evaluation on random points.
fn bench_li_many(c: &mut Criterion) {
    let engine = Engine::<f64>::new(6).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut group = c.benchmark_group("li_many");

    for size in [8, 64, 512] {
        let xs: Vec<Complex<f64>> = (0..size)
            .map(|_| Complex::new(rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0)))
            .collect();
        group.bench_with_input(BenchmarkId::new("li3", size), &xs, |b, xs| {
            b.iter(|| black_box(engine.li_many(3, xs)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_table, bench_li_regions, bench_li22, bench_li_many);
criterion_main!(benches);
