//! Benchmarks for drawing the editor and building the preview.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mde::app::Model;
use mde::highlight::{HighlightOverlay, NeedleHighlighter};
use mde::preview::{Preview, render_html};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn sample_markdown() -> String {
    "# Notes\n\nHello **world**, see `code` and [a link](https://example.com).\n\n- one\n- two\n"
        .repeat(50)
}

fn bench_write_frame(c: &mut Criterion) {
    let markdown = sample_markdown();
    let overlay = HighlightOverlay::new(NeedleHighlighter::new("Hello"));
    let model = Model::new(&markdown, overlay, (100, 40));
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();

    c.bench_function("write_frame", |b| {
        b.iter(|| {
            terminal
                .draw(|frame| mde::ui::render(black_box(&model), frame))
                .unwrap();
        });
    });
}

fn bench_render_html(c: &mut Criterion) {
    let markdown = sample_markdown();
    c.bench_function("render_html", |b| b.iter(|| render_html(black_box(&markdown))));
}

fn bench_preview_generate(c: &mut Criterion) {
    let markdown = sample_markdown();
    c.bench_function("preview_generate", |b| {
        b.iter(|| Preview::generate(black_box(&markdown), 1))
    });
}

criterion_group!(
    benches,
    bench_write_frame,
    bench_render_html,
    bench_preview_generate
);
criterion_main!(benches);
