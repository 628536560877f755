use linea_contour::{Contour, contours};
use linea_core::{Bounds, Error, Grid, ImageView, Point2f};
use linea_interior::{AlignmentPoints, locate_alignment, region_interiors};
use log::{debug, info, warn};

use crate::config::{PointOnEdge, StackConfig};
use crate::registry::AlignmentRegistry;
use crate::slice::slice_layers;

/// A contour that passed the minimum-feature filter.
#[derive(Debug, Clone, PartialEq)]
pub struct KeptContour {
    /// Closed vertex sequence chosen by [`StackConfig::point_on_edge`].
    pub points: Vec<Point2f>,
    pub is_hole: bool,
    pub pixel_bounds: Bounds,
    /// Cells of the region interior with nested loops cut out.
    pub interior_cells: usize,
    pub alignment: Option<AlignmentPoints>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerReport {
    /// Position in the stack, `0` being the top layer.
    pub index: usize,
    pub contours: Vec<KeptContour>,
    /// Contours dropped for being smaller than the minimum feature.
    pub filtered: usize,
}

impl LayerReport {
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn alignment_marks(&self) -> impl Iterator<Item = &AlignmentPoints> + '_ {
        self.contours.iter().filter_map(|c| c.alignment.as_ref())
    }
}

fn too_small(bounds: &Bounds, filter_pixels: f32) -> bool {
    (bounds.extent_x() as f32) < filter_pixels || (bounds.extent_y() as f32) < filter_pixels
}

fn points_of(contour: &Contour, mode: PointOnEdge) -> Vec<Point2f> {
    match mode {
        PointOnEdge::Corner => contour.vertices().into_iter().map(|p| p.to_point2f()).collect(),
        PointOnEdge::Center => contour.midpoint_polyline().points,
    }
}

/// Traces one layer grid, filters small features and places alignment marks.
///
/// Interiors are computed over every traced loop before filtering, so a
/// dropped hole still stays out of its outer region. Only outer boundaries
/// are offered to `registry`; a region overlapping an earlier claim gets no
/// marks of its own.
pub fn process_layer(
    index: usize,
    grid: &Grid,
    config: &StackConfig,
    filter_pixels: f32,
    registry: &mut AlignmentRegistry,
) -> Result<LayerReport, Error> {
    let traced = contours(grid)?;
    let interiors = region_interiors(&traced)?;

    let mut kept = Vec::new();
    let mut filtered = 0;
    for (contour, interior) in traced.iter().zip(interiors) {
        let Some(bounds) = contour.pixel_bounds() else {
            continue;
        };
        if too_small(&bounds, filter_pixels) {
            debug!(
                "layer {index}: dropping contour at ({}, {}) of extent {}x{} (< {filter_pixels:.2})",
                bounds.min_x,
                bounds.min_y,
                bounds.extent_x(),
                bounds.extent_y()
            );
            filtered += 1;
            continue;
        }

        let is_hole = contour.is_hole();
        let alignment = if !is_hole && !interior.is_empty() && registry.claim(&interior) {
            Some(locate_alignment(&interior)?)
        } else {
            None
        };

        kept.push(KeptContour {
            points: points_of(contour, config.point_on_edge),
            is_hole,
            pixel_bounds: bounds,
            interior_cells: interior.len(),
            alignment,
        });
    }

    let report = LayerReport {
        index,
        contours: kept,
        filtered,
    };
    if report.is_empty() {
        warn!("layer {index}: no contours kept ({filtered} filtered)");
    } else {
        info!(
            "layer {index}: {} contours kept, {filtered} filtered, {} marked",
            report.contours.len(),
            report.alignment_marks().count()
        );
    }
    Ok(report)
}

/// Slices `heights` and processes every layer from the top down, sharing one
/// alignment registry. Report `0` is the top layer.
pub fn build_stack(
    heights: &ImageView<'_, f32>,
    config: &StackConfig,
) -> Result<Vec<LayerReport>, Error> {
    config.validate()?;
    let layers = slice_layers(heights, config.layer_count)?;
    let filter_pixels = config.filter_pixels(heights.width(), heights.height());
    info!(
        "building stack of {} layers from {}x{} raster, min feature {filter_pixels:.2} px",
        layers.len(),
        heights.width(),
        heights.height()
    );

    let mut registry = AlignmentRegistry::new();
    layers
        .iter()
        .rev()
        .enumerate()
        .map(|(index, grid)| process_layer(index, grid, config, filter_pixels, &mut registry))
        .collect()
}
