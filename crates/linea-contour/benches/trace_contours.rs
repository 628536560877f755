use criterion::{Criterion, black_box, criterion_group, criterion_main};
use linea_contour::{build_edges, trace_contours};
use linea_core::Grid;

/// Terraced cone with ripples: one layer of a synthetic heightmap, giving
/// nested rings and many small islands.
fn synthetic_layer(width: usize, height: usize) -> Grid {
    let (cx, cy) = (width as f32 * 0.5, height as f32 * 0.5);
    Grid::pad_with(width, height, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let r = (dx * dx + dy * dy).sqrt();
        let z = 400.0 - r + 12.0 * (x as f32 * 0.11).sin() * (y as f32 * 0.07).cos();
        (z as i32).rem_euclid(48) < 24
    })
}

fn bench_build_edges(c: &mut Criterion) {
    let grid = synthetic_layer(1024, 768);

    c.bench_function("linea_build_edges_1024x768", |b| {
        b.iter(|| {
            let set = build_edges(black_box(&grid));
            black_box(set.len());
        });
    });
}

fn bench_trace(c: &mut Criterion) {
    let grid = synthetic_layer(1024, 768);
    let set = build_edges(&grid);

    c.bench_function("linea_trace_contours_1024x768", |b| {
        b.iter(|| {
            let contours = trace_contours(black_box(&set)).expect("synthetic layer traces");
            black_box(contours.len());
        });
    });
}

criterion_group!(benches, bench_build_edges, bench_trace);
criterion_main!(benches);
