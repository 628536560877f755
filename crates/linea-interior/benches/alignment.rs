use criterion::{Criterion, black_box, criterion_group, criterion_main};
use linea_contour::contours;
use linea_core::Grid;
use linea_interior::{InteriorSet, find_interior, locate_alignment};

fn disc_grid(r: usize) -> Grid {
    let d = 2 * r + 1;
    Grid::pad_with(d, d, |x, y| {
        let dx = x as i64 - r as i64;
        let dy = y as i64 - r as i64;
        dx * dx + dy * dy <= (r * r) as i64
    })
}

fn bench_find_interior(c: &mut Criterion) {
    let grid = disc_grid(200);
    let traced = contours(&grid).expect("disc traces");
    let corners = &traced[0].corners;

    c.bench_function("linea_find_interior_disc_r200", |b| {
        b.iter(|| {
            let set = find_interior(black_box(corners)).expect("non-empty");
            black_box(set.len());
        });
    });
}

fn bench_locate_alignment(c: &mut Criterion) {
    let grid = disc_grid(200);
    let traced = contours(&grid).expect("disc traces");
    let interior: InteriorSet = find_interior(&traced[0].corners).expect("non-empty");

    c.bench_function("linea_locate_alignment_disc_r200", |b| {
        b.iter(|| {
            let pts = locate_alignment(black_box(&interior)).expect("non-empty");
            black_box(pts);
        });
    });
}

criterion_group!(benches, bench_find_interior, bench_locate_alignment);
criterion_main!(benches);
