use thiserror::Error;

use crate::geom::LatticePoint;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("out of bounds")]
    OutOfBounds,

    #[error("grid {width}x{height} is too small to carry a 1-cell gutter")]
    GridTooSmall { width: usize, height: usize },

    #[error("gutter cell ({x}, {y}) is set; padded grids need an all-zero border")]
    GutterNotClear { x: usize, y: usize },

    /// Contour walk reached a lattice point where the owner-pixel filter left
    /// zero or several continuations. Only happens on non-manifold edge sets.
    #[error(
        "ambiguous junction at lattice point ({}, {}): {candidates} candidate edges",
        point.x,
        point.y
    )]
    AmbiguousJunction {
        point: LatticePoint,
        candidates: usize,
    },

    #[error("empty input to {stage}")]
    EmptyInput { stage: &'static str },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
