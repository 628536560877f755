//! Property-based tests for edge building and contour tracing.
//!
//! Run with: cargo test -p linea-contour -- proptest

use std::collections::HashSet;

use linea_contour::{Contour, build_edges, trace_contours};
use linea_core::{Cell, Grid};
use proptest::prelude::*;

/// Random inner mask of up to 12x12 cells, padded.
fn arb_grid() -> impl Strategy<Value = Grid> {
    (1usize..=12, 1usize..=12).prop_flat_map(|(w, h)| {
        prop::collection::vec(any::<bool>(), w * h)
            .prop_map(move |bits| Grid::pad_with(w, h, |x, y| bits[y * w + x]))
    })
}

fn foreground(grid: &Grid) -> HashSet<Cell> {
    let mut out = HashSet::new();
    for y in 0..grid.inner_height() {
        for x in 0..grid.inner_width() {
            if grid.is_set(x + 1, y + 1) {
                out.insert(Cell::new(x as i32, y as i32));
            }
        }
    }
    out
}

proptest! {
    #[test]
    fn proptest_tracing_consumes_every_edge(grid in arb_grid()) {
        let set = build_edges(&grid);
        let contours = trace_contours(&set).expect("padded grids always trace");

        let total: usize = contours.iter().map(Contour::num_edges).sum();
        prop_assert_eq!(total, set.len());
    }

    #[test]
    fn proptest_contours_are_closed(grid in arb_grid()) {
        let set = build_edges(&grid);
        for c in trace_contours(&set).expect("trace") {
            prop_assert!(c.is_closed());
            prop_assert_eq!(c.len(), c.num_edges() + 1);
        }
    }

    #[test]
    fn proptest_owner_pixels_are_foreground(grid in arb_grid()) {
        let fg = foreground(&grid);
        let set = build_edges(&grid);
        for c in trace_contours(&set).expect("trace") {
            for p in &c.pixels {
                prop_assert!(fg.contains(p));
            }
        }
    }

    #[test]
    fn proptest_winding_areas_sum_to_foreground(grid in arb_grid()) {
        let area: i64 = trace_contours(&build_edges(&grid))
            .expect("trace")
            .iter()
            .map(Contour::signed_area2)
            .sum();
        prop_assert_eq!(-area, 2 * foreground(&grid).len() as i64);
    }
}
