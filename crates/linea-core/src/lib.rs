//! Foundational primitives for layered contour extraction.
//!
//! ## Grids and the gutter
//! A [`Grid`] is a binary raster (`0` background, `1` foreground) with a
//! mandatory 1-cell all-zero border. The border is established when the grid
//! is built and never re-checked by the algorithms that walk it.
//!
//! ## Coordinates
//! Cells are addressed `(x, y)` with `x` along the row. A [`Cell`] in unpadded
//! space covers the unit square between [`LatticePoint`]s `(x, y)` and
//! `(x + 1, y + 1)`. Midpoints of lattice edges are kept exact as
//! [`HalfPoint`]s; floating-point [`Point2f`] is only produced for output.

mod error;
mod geom;
mod grid;
mod image;

pub use error::Error;
pub use geom::{Bounds, Cell, HalfPoint, LatticePoint, Point2f, Polyline2f};
pub use grid::Grid;
pub use image::{Image, ImageView, to_f32};
