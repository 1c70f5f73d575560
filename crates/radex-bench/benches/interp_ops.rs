//! Criterion micro-benchmarks for bracket search and table interpolation.

use criterion::{criterion_group, criterion_main, Criterion};
use radex_interp::{find_bracket, interp_1d, turnover_mass, InterpOptions};
use std::hint::black_box;

fn bench_bracket(c: &mut Criterion) {
    let ascending: Vec<f64> = (0..4096).map(|i| i as f64 * 0.25).collect();
    let descending: Vec<f64> = ascending.iter().rev().copied().collect();

    c.bench_function("find_bracket_ascending_4096", |b| {
        b.iter(|| find_bracket(black_box(&ascending), black_box(517.3)))
    });
    c.bench_function("find_bracket_descending_4096", |b| {
        b.iter(|| find_bracket(black_box(&descending), black_box(517.3)))
    });
}

fn bench_interp(c: &mut Criterion) {
    let axis: Vec<f64> = (1..=256).map(|i| i as f64).collect();
    let values: Vec<f64> = axis.iter().map(|x| x * x).collect();
    let log = InterpOptions {
        log_axis: true,
        log_value: true,
        ..InterpOptions::CLAMPED
    };

    c.bench_function("interp_1d_linear_256", |b| {
        b.iter(|| interp_1d(black_box(100.5), &axis, &values, InterpOptions::LINEAR))
    });
    c.bench_function("interp_1d_loglog_256", |b| {
        b.iter(|| interp_1d(black_box(100.5), &axis, &values, log))
    });
    c.bench_function("turnover_mass", |b| {
        b.iter(|| turnover_mass(black_box(17.25)))
    });
}

criterion_group!(benches, bench_bracket, bench_interp);
criterion_main!(benches);
