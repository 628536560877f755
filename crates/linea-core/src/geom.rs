//! Integer lattice geometry.
//!
//! Cells and lattice corners share one coordinate frame: cell `(x, y)` covers
//! the unit square spanned by corners `(x, y)` and `(x + 1, y + 1)`. All
//! contour shapes are kept in integers; [`Point2f`] appears only where
//! geometry leaves the crate.

/// Integer corner shared by up to four cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LatticePoint {
    pub x: i32,
    pub y: i32,
}

impl LatticePoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Exact midpoint of the segment `self -> other`.
    pub fn midpoint(self, other: Self) -> HalfPoint {
        HalfPoint {
            x2: self.x + other.x,
            y2: self.y + other.y,
        }
    }

    pub fn to_point2f(self) -> Point2f {
        Point2f {
            x: self.x as f32,
            y: self.y as f32,
        }
    }
}

/// Cell coordinate in unpadded grid space. Orders lexicographically by `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Point on the half-integer lattice, stored with doubled coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct HalfPoint {
    pub x2: i32,
    pub y2: i32,
}

impl HalfPoint {
    pub fn to_point2f(self) -> Point2f {
        Point2f {
            x: self.x2 as f32 * 0.5,
            y: self.y2 as f32 * 0.5,
        }
    }
}

/// Inclusive integer bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    /// Bounding box of `(x, y)` pairs, `None` for an empty iterator.
    pub fn from_xy(mut it: impl Iterator<Item = (i32, i32)>) -> Option<Self> {
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn of_cells<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Option<Self> {
        Self::from_xy(cells.into_iter().map(|c| (c.x, c.y)))
    }

    pub fn of_points<'a>(points: impl IntoIterator<Item = &'a LatticePoint>) -> Option<Self> {
        Self::from_xy(points.into_iter().map(|p| (p.x, p.y)))
    }

    /// `max_x - min_x`, the extent used by the minimum-feature filter.
    pub fn extent_x(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn extent_y(&self) -> i32 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2f {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline2f {
    pub points: Vec<Point2f>,
}
