use linea_core::{Cell, Error};
use log::debug;

use crate::distance::chamfer_distance;
use crate::fill::InteriorSet;

/// Two registration anchors deep inside a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlignmentPoints {
    pub first: Cell,
    pub last: Cell,
}

impl AlignmentPoints {
    pub fn as_array(&self) -> [Cell; 2] {
        [self.first, self.last]
    }
}

/// Picks the first and last cell, in `(x, y)` order, of the deepest plateau
/// of the chamfer distance map.
///
/// The plateau is every cell whose distance exceeds `max - stddev` over the
/// interior, plus the cells at `max` itself so a flat map (all distances
/// equal) keeps all of its cells. A single-cell interior yields that cell
/// twice.
pub fn locate_alignment(interior: &InteriorSet) -> Result<AlignmentPoints, Error> {
    let dist = chamfer_distance(interior)?;
    let values: Vec<u32> = interior.iter().map(|&c| dist.get(c)).collect();

    let n = values.len() as f64;
    let max = values.iter().copied().max().unwrap_or(0);
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    let var = values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    let threshold = max as f64 - var.sqrt();

    let mut plateau = interior
        .iter()
        .zip(&values)
        .filter(|&(_, &v)| v as f64 > threshold || v == max)
        .map(|(&c, _)| c);

    let first = plateau.next().ok_or(Error::EmptyInput {
        stage: "locate_alignment",
    })?;
    let last = plateau.last().unwrap_or(first);

    debug!(
        "alignment over {} cells: max depth {max}, threshold {threshold:.3}, anchors ({}, {}) ({}, {})",
        values.len(),
        first.x,
        first.y,
        last.x,
        last.y
    );
    Ok(AlignmentPoints { first, last })
}

#[cfg(test)]
mod tests {
    use linea_core::{Cell, Error};

    use super::{AlignmentPoints, locate_alignment};
    use crate::InteriorSet;

    fn disc(cx: i32, cy: i32, r: i32) -> InteriorSet {
        let mut set = InteriorSet::new();
        for x in (cx - r)..=(cx + r) {
            for y in (cy - r)..=(cy + r) {
                let (dx, dy) = (x - cx, y - cy);
                if dx * dx + dy * dy <= r * r {
                    set.insert(Cell::new(x, y));
                }
            }
        }
        set
    }

    #[test]
    fn square_picks_its_center() {
        let set: InteriorSet = (0..3)
            .flat_map(|x| (0..3).map(move |y| Cell::new(x, y)))
            .collect();

        let pts = locate_alignment(&set).expect("non-empty");
        assert_eq!(
            pts,
            AlignmentPoints {
                first: Cell::new(1, 1),
                last: Cell::new(1, 1),
            }
        );
    }

    #[test]
    fn single_cell_returns_itself_twice() {
        let set: InteriorSet = [Cell::new(4, -2)].into_iter().collect();
        let pts = locate_alignment(&set).expect("non-empty");
        assert_eq!(pts.as_array(), [Cell::new(4, -2), Cell::new(4, -2)]);
    }

    #[test]
    fn flat_strip_spans_its_ends() {
        let set: InteriorSet = (0..5).map(|x| Cell::new(x, 7)).collect();
        let pts = locate_alignment(&set).expect("non-empty");

        assert_eq!(pts.first, Cell::new(0, 7));
        assert_eq!(pts.last, Cell::new(4, 7));
    }

    #[test]
    fn anchors_lie_deep_inside_disc() {
        let set = disc(10, 20, 9);
        let pts = locate_alignment(&set).expect("non-empty");

        for c in pts.as_array() {
            assert!(set.contains(&c));
            let (dx, dy) = (c.x - 10, c.y - 20);
            assert!(dx * dx + dy * dy <= 9, "anchor {c:?} too far from center");
        }
        assert!(pts.first <= pts.last);
    }

    #[test]
    fn repeated_runs_agree() {
        let mut set = disc(0, 0, 6);
        set.subtract(&disc(3, 0, 2));

        let a = locate_alignment(&set).expect("non-empty");
        let b = locate_alignment(&set.clone()).expect("non-empty");
        assert_eq!(a, b);
        assert!(set.contains(&a.first) && set.contains(&a.last));
    }

    #[test]
    fn empty_interior_is_rejected() {
        assert!(matches!(
            locate_alignment(&InteriorSet::new()),
            Err(Error::EmptyInput { .. })
        ));
    }
}
