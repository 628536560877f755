//! Interior analysis of traced contours.
//!
//! - [`find_interior`]: even-odd scanline fill of one closed rectilinear
//!   loop. [`region_interiors`] cuts nested loops out so that every contour
//!   of a layer gets a disjoint cell set.
//! - [`chamfer_distance`]: two-pass Manhattan distance-to-boundary map.
//! - [`locate_alignment`]: two registration anchors on the deepest plateau
//!   of that map.
//!
//! All stages expect a non-empty interior; callers filter degenerate
//! contours first and get [`linea_core::Error::EmptyInput`] otherwise.

mod align;
mod distance;
mod fill;

pub use align::{AlignmentPoints, locate_alignment};
pub use distance::{DistanceMap, chamfer_distance};
pub use fill::{InteriorSet, find_interior, region_interiors};
