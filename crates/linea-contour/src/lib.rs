//! Closed boundary extraction from padded binary grids.
//!
//! Two stages:
//! - [`build_edges`] scans a [`linea_core::Grid`] and emits every unit side
//!   separating a foreground cell from the background, tagged with its owner
//!   pixel and indexed by lattice point.
//! - [`trace_contours`] consumes the edge set and walks it into closed
//!   [`Contour`] loops, one per boundary component.
//!
//! At a saddle corner the walk keeps to the arriving edge's owner pixel, so
//! foreground is 4-connected and background 8-connected. Two foreground
//! cells touching only at a corner get separate loops. Two background cells
//! touching only at a corner inside one component share a single loop that
//! passes the corner twice; such loops are closed but not simple. Each edge
//! has one fixed successor, so the loops found do not depend on edge order.
//! Outer boundaries and holes are not told apart while tracing; their
//! winding differs ([`Contour::is_hole`]).
//!
//! Smoothing and curve fitting are left to later stages.

mod build;
mod contour;
mod edge;
mod trace;

pub use build::build_edges;
pub use contour::Contour;
pub use edge::{Edge, EdgeId, EdgeSet};
pub use trace::{EdgePool, contours, trace_contours};
