//! Benchmarks for highlight render passes.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mde::highlight::{
    HighlightOverlay, Interval, NeedleHighlighter, Pattern, mark_pattern, merge, partition,
};

fn sample_text() -> String {
    "Hello world, this is a **Hello** line with @mentions and more text.\n".repeat(200)
}

fn bench_merge(c: &mut Criterion) {
    let ranges: Vec<Interval> = (0..2_000)
        .map(|i| Interval::new((i * 37) % 10_000, (i * 37) % 10_000 + 12))
        .collect();
    c.bench_function("merge_2000", |b| {
        b.iter(|| merge(black_box(ranges.clone())))
    });
}

fn bench_partition(c: &mut Criterion) {
    let text = sample_text();
    let merged = merge((0..text.len()).step_by(40).map(|i| Interval::new(i, i + 5)));
    c.bench_function("partition", |b| {
        b.iter(|| partition(black_box(&text), black_box(&merged)))
    });
}

fn bench_mark_pattern(c: &mut Criterion) {
    let text = sample_text();
    let pattern = Pattern::new("H(e|a)llo").unwrap();
    c.bench_function("mark_pattern", |b| {
        b.iter(|| mark_pattern(black_box(&text), &pattern))
    });
}

fn bench_overlay_refresh(c: &mut Criterion) {
    let text = sample_text();
    let mut overlay = HighlightOverlay::new(NeedleHighlighter::new("Hello"));
    c.bench_function("overlay_refresh", |b| {
        b.iter(|| overlay.refresh(black_box(&text)).map(|backdrop| backdrop.line_count()))
    });
}

criterion_group!(
    benches,
    bench_merge,
    bench_partition,
    bench_mark_pattern,
    bench_overlay_refresh
);
criterion_main!(benches);
