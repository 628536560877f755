use std::collections::{BTreeSet, HashSet};

use linea_contour::Contour;
use linea_core::{Bounds, Cell, Error, LatticePoint};

/// Ordered set of cells enclosed by a contour. Iterates in `(x, y)` order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteriorSet {
    cells: BTreeSet<Cell>,
}

impl InteriorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of_cells(&self.cells)
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.cells.is_disjoint(&other.cells)
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.cells.is_subset(&other.cells)
    }

    pub fn subtract(&mut self, other: &Self) {
        for c in &other.cells {
            self.cells.remove(c);
        }
    }
}

impl FromIterator<Cell> for InteriorSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a InteriorSet {
    type Item = &'a Cell;
    type IntoIter = std::collections::btree_set::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Even-odd scanline fill of a closed rectilinear polygon with unit steps.
///
/// `corners` is a closed sequence (`corners[0] == corners[last]`) such as
/// [`Contour::corners`]. Every vertical side `(x, y) - (x, y + 1)` toggles
/// the inside state of row `y` at column `x`. The result is the full set of
/// cells enclosed by this one loop: an outer boundary's fill includes its
/// holes, see [`region_interiors`].
pub fn find_interior(corners: &[LatticePoint]) -> Result<InteriorSet, Error> {
    let b = Bounds::of_points(corners).ok_or(Error::EmptyInput {
        stage: "find_interior",
    })?;
    if b.extent_x() == 0 || b.extent_y() == 0 {
        return Err(Error::EmptyInput {
            stage: "find_interior",
        });
    }

    let crossings: HashSet<LatticePoint> = corners
        .windows(2)
        .filter(|w| w[0].x == w[1].x && w[0].y != w[1].y)
        .map(|w| if w[0].y < w[1].y { w[0] } else { w[1] })
        .collect();

    let mut interior = InteriorSet::new();
    for y in b.min_y..b.max_y {
        let mut inside = crossings.contains(&LatticePoint::new(b.min_x, y));
        for x in b.min_x..b.max_x {
            if inside {
                interior.insert(Cell::new(x, y));
            }
            if crossings.contains(&LatticePoint::new(x + 1, y)) {
                inside = !inside;
            }
        }
    }

    Ok(interior)
}

/// Interior of every contour of one layer with nested loops cut out.
///
/// Each loop's fill loses the fill of every other loop strictly inside it.
/// For an outer boundary that leaves exactly its own foreground cells; for a
/// hole boundary, the background cells of the hole. Results are pairwise
/// disjoint and parallel to `contours`.
pub fn region_interiors(contours: &[Contour]) -> Result<Vec<InteriorSet>, Error> {
    let filled = contours
        .iter()
        .map(|c| find_interior(&c.corners))
        .collect::<Result<Vec<_>, _>>()?;
    let bounds: Vec<Option<Bounds>> = contours.iter().map(Contour::corner_bounds).collect();

    let mut out = Vec::with_capacity(filled.len());
    for (i, outer) in filled.iter().enumerate() {
        let mut own = outer.clone();
        for (j, inner) in filled.iter().enumerate() {
            if i == j || inner.len() >= outer.len() || !within(bounds[j], bounds[i]) {
                continue;
            }
            if inner.is_subset(outer) {
                own.subtract(inner);
            }
        }
        out.push(own);
    }

    Ok(out)
}

fn within(inner: Option<Bounds>, outer: Option<Bounds>) -> bool {
    match (inner, outer) {
        (Some(a), Some(b)) => {
            a.min_x >= b.min_x && a.min_y >= b.min_y && a.max_x <= b.max_x && a.max_y <= b.max_y
        }
        _ => false,
    }
}
