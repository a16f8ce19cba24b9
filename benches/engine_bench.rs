//! Benchmarks for the analysis engine

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tensile_analyzer::math::savgol_filter;
use tensile_analyzer::prelude::*;

fn bench_compute(c: &mut Criterion) {
    let engine = AnalysisEngine::default();
    let mut group = c.benchmark_group("compute");

    for points in [100, 1_000, 10_000] {
        let curve = MaterialProfile::steel().generate_noisy(points, 3.0, 11).unwrap();
        group.bench_function(format!("steel_{}", points), |b| {
            b.iter(|| engine.compute(black_box(curve.strain()), black_box(curve.stress())))
        });
    }

    group.finish();
}

fn bench_savgol(c: &mut Criterion) {
    let curve = MaterialProfile::aluminum().generate_noisy(5_000, 2.0, 3).unwrap();
    c.bench_function("savgol_11_3_5000", |b| {
        b.iter(|| savgol_filter(black_box(curve.stress()), 11, 3))
    });
}

fn bench_render(c: &mut Criterion) {
    let curve = MaterialProfile::copper().generate(500);
    let result = AnalysisEngine::default().compute_curve(&curve);
    let renderer = ChartRenderer::default();
    c.bench_function("render_500", |b| {
        b.iter(|| renderer.render(curve.strain(), curve.stress(), Some(&result), "copper"))
    });
}

criterion_group!(benches, bench_compute, bench_savgol, bench_render);
criterion_main!(benches);
