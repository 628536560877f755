use linea_core::{Cell, Grid, LatticePoint};

use crate::edge::{Edge, EdgeSet};

/// One side of a cell: neighbour offset plus the corner offsets of the shared
/// side, all relative to the padded cell `(x, y)`.
struct Side {
    dx: isize,
    dy: isize,
    src: (i32, i32),
    dst: (i32, i32),
}

// Listed so that the four edges of an isolated cell chain src -> dst into one
// closed cycle. Every cell boundary therefore has the same winding.
const SIDES: [Side; 4] = [
    Side {
        dx: -1,
        dy: 0,
        src: (-1, -1),
        dst: (-1, 0),
    },
    Side {
        dx: 0,
        dy: 1,
        src: (-1, 0),
        dst: (0, 0),
    },
    Side {
        dx: 1,
        dy: 0,
        src: (0, 0),
        dst: (0, -1),
    },
    Side {
        dx: 0,
        dy: -1,
        src: (0, -1),
        dst: (-1, -1),
    },
];

/// Emits one [`Edge`] for every side separating a foreground cell from a
/// background neighbour.
///
/// Lattice points and owner pixels come out in unpadded coordinates: padded
/// cell `(x, y)` owns pixel `(x - 1, y - 1)`.
pub fn build_edges(grid: &Grid) -> EdgeSet {
    let mut set = EdgeSet::new();

    for y in 1..grid.height() - 1 {
        for x in 1..grid.width() - 1 {
            if !grid.is_set(x, y) {
                continue;
            }

            let (xi, yi) = (x as i32, y as i32);
            let pixel = Cell::new(xi - 1, yi - 1);

            for side in &SIDES {
                // The gutter keeps both neighbour indices in range.
                let nx = x.wrapping_add_signed(side.dx);
                let ny = y.wrapping_add_signed(side.dy);
                if grid.is_set(nx, ny) {
                    continue;
                }

                set.push(Edge {
                    src: LatticePoint::new(xi + side.src.0, yi + side.src.1),
                    dst: LatticePoint::new(xi + side.dst.0, yi + side.dst.1),
                    pixel,
                });
            }
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use linea_core::{Cell, Grid, LatticePoint};

    use crate::build_edges;

    #[test]
    fn empty_and_blank_grids_have_no_edges() {
        assert!(build_edges(&Grid::from_ascii(&[])).is_empty());
        assert!(build_edges(&Grid::from_ascii(&["....", "...."])).is_empty());
    }

    #[test]
    fn single_cell_edges_form_a_cycle() {
        let set = build_edges(&Grid::from_ascii(&["#"]));
        assert_eq!(set.len(), 4);

        for e in set.edges() {
            assert_eq!(e.pixel, Cell::new(0, 0));
            let next = set
                .edges()
                .iter()
                .filter(|n| n.src == e.dst)
                .count();
            assert_eq!(next, 1);
        }

        let corners: Vec<_> = set.edges().iter().map(|e| e.src).collect();
        assert_eq!(
            corners,
            vec![
                LatticePoint::new(0, 0),
                LatticePoint::new(0, 1),
                LatticePoint::new(1, 1),
                LatticePoint::new(1, 0),
            ]
        );
    }

    #[test]
    fn shared_sides_between_foreground_cells_are_skipped() {
        let set = build_edges(&Grid::from_ascii(&["##"]));
        assert_eq!(set.len(), 6);
        assert!(
            set.edges()
                .iter()
                .all(|e| !(e.src.x == 1 && e.dst.x == 1))
        );
    }

    #[test]
    fn every_edge_is_indexed_under_both_endpoints() {
        let set = build_edges(&Grid::from_ascii(&["##.", ".##", "#.#"]));
        for (id, e) in set.edges().iter().enumerate() {
            assert!(set.incident(e.src).contains(&id));
            assert!(set.incident(e.dst).contains(&id));
        }
    }

    #[test]
    fn solid_block_edge_count_is_its_perimeter() {
        let set = build_edges(&Grid::from_ascii(&["###", "###", "###"]));
        assert_eq!(set.len(), 12);
    }
}
