use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dyadic_segments::{
    Interval, ResolutionBounds, SearchTolerance, Segmenter, search, segment, testutil::WindowGen,
};
use std::{convert::Infallible, hint::black_box};

fn benchmark_segment(c: &mut Criterion) {
    let root = Interval::new(0.0, 10.0);
    let mut window_gen = WindowGen::new(42);
    let mut group = c.benchmark_group("segment");

    for resolution in [4, 8, 12, 16] {
        let single = window_gen.disjoint(&root, 1024, 1);
        group.bench_function(BenchmarkId::new("single_window", resolution), |b| {
            b.iter(|| black_box(segment(&root, |i| single.holds(i), resolution, -1)))
        });

        let many = window_gen.disjoint(&root, 1024, 13);
        group.bench_function(BenchmarkId::new("many_windows", resolution), |b| {
            b.iter(|| black_box(segment(&root, |i| many.holds(i), resolution, -1)))
        });

        let bounds = ResolutionBounds::up_to(resolution).unwrap();
        let mut segmenter = Segmenter::new(
            |i: &Interval| Ok::<_, Infallible>(many.holds(i)),
            bounds,
        );
        group.bench_function(BenchmarkId::new("segmenter_leaves", resolution), |b| {
            b.iter(|| black_box(segmenter.leaves(&root)))
        });
    }

    group.finish();
}

fn benchmark_search(c: &mut Criterion) {
    let root = Interval::new(0.0, 10.0);
    let mut window_gen = WindowGen::new(42);
    let mut group = c.benchmark_group("search");

    for precision in [4, 8, 12, 16] {
        let tolerance = SearchTolerance::precision(precision);

        let single = window_gen.disjoint(&root, 1024, 1);
        group.bench_function(BenchmarkId::new("single_window", precision), |b| {
            b.iter(|| black_box(search(&root, |i| single.holds(i), tolerance)))
        });

        let many = window_gen.disjoint(&root, 1024, 13);
        group.bench_function(BenchmarkId::new("many_windows", precision), |b| {
            b.iter(|| black_box(search(&root, |i| many.holds(i), tolerance)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_segment, benchmark_search);
criterion_main!(benches);
