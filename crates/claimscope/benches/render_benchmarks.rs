//! Benchmarks for page rendering and table analytics.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use claimscope::prelude::*;

fn benchmark_render(c: &mut Criterion) {
    let data = Datasets::get();
    let full = NavigationShell::full_range(data);

    let mut group = c.benchmark_group("render");

    for page in Page::ALL {
        group.bench_with_input(BenchmarkId::new("page", page.name()), &page, |b, &page| {
            b.iter(|| render(black_box(page), data, &full))
        });
    }

    group.finish();
}

fn benchmark_analytics(c: &mut Criterion) {
    let base = Datasets::get().procedures.rows();
    let range = CostRange::new(0.0, 20_000.0).unwrap();

    let mut group = c.benchmark_group("analytics");

    for size in [15, 1_500, 15_000] {
        // Replicate the procedure table to the requested size
        let rows: Vec<ProcedureRow> = base.iter().cycle().take(size).cloned().collect();

        group.bench_with_input(BenchmarkId::new("top_n", size), &rows, |b, rows| {
            b.iter(|| top_n(black_box(rows), ProcedureColumn::AvgPaid, 5, false))
        });

        group.bench_with_input(BenchmarkId::new("filter_range", size), &rows, |b, rows| {
            b.iter(|| filter_range(black_box(rows), ProcedureColumn::AvgPaid, &range))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_render, benchmark_analytics);
criterion_main!(benches);
