//! Elevation slicing and the per-layer contour pipeline.
//!
//! A heightmap is cut into nested binary layers ([`slice_layers`]), each layer
//! is traced, small features are filtered out, and registration marks are
//! placed on regions not already covered by a mark from a layer above
//! ([`AlignmentRegistry`]). [`build_stack`] runs the whole thing top down.

mod config;
mod pipeline;
mod registry;
mod slice;

pub use config::{PointOnEdge, StackConfig};
pub use pipeline::{KeptContour, LayerReport, build_stack, process_layer};
pub use registry::AlignmentRegistry;
pub use slice::slice_layers;
