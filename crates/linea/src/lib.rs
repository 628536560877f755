//! Umbrella crate for the `linea` workspace.
//!
//! Re-exports the layer primitives, contour tracing, interior analysis and
//! the stack pipeline so callers depend on one crate.

pub use linea_contour::*;
pub use linea_core::*;
pub use linea_interior::*;
pub use linea_stack::*;
