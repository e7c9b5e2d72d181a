//! Benchmarks for the render sweep.
//!
//! Run with: cargo bench -p glyphgrid-core

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glyphgrid_core::{Cell, DisplayState, Rgba};
use std::hint::black_box;

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("display/sweep");

    for (w, h) in [(40u16, 12u16), (80, 24), (200, 60)] {
        // Clean sweep: nothing pending, the early-exit path.
        group.bench_with_input(
            BenchmarkId::new("clean", format!("{w}x{h}")),
            &(),
            |b, _| {
                let mut display = DisplayState::new(w, h);
                b.iter(|| {
                    display.render(|x, y, cell| {
                        black_box((x, y, cell));
                    });
                })
            },
        );

        // Full repaint: every slot dirty, alternating between two frames so
        // no write is ever suppressed.
        group.bench_with_input(
            BenchmarkId::new("full", format!("{w}x{h}")),
            &(),
            |b, _| {
                let mut display = DisplayState::new(w, h);
                let frames = [
                    Cell::new('#', Rgba::WHITE, Rgba::BLACK),
                    Cell::new('.', Rgba::BLACK, Rgba::WHITE),
                ];
                let mut flip = 0usize;
                b.iter(|| {
                    let cell = frames[flip & 1];
                    flip += 1;
                    for y in 0..i32::from(h) {
                        for x in 0..i32::from(w) {
                            display.set_cell(x, y, cell);
                        }
                    }
                    display.render(|x, y, cell| {
                        black_box((x, y, cell));
                    });
                })
            },
        );

        // Sparse repaint: one changed row, the common interactive case.
        group.bench_with_input(
            BenchmarkId::new("one_row", format!("{w}x{h}")),
            &(),
            |b, _| {
                let mut display = DisplayState::new(w, h);
                let mut tick = 0u32;
                b.iter(|| {
                    tick += 1;
                    let glyph = char::from(b'a' + (tick % 26) as u8);
                    for x in 0..i32::from(w) {
                        display.set_cell(x, i32::from(h) / 2, Cell::from_glyph(glyph));
                    }
                    display.render(|x, y, cell| {
                        black_box((x, y, cell));
                    });
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_sweep);
criterion_main!(benches);
