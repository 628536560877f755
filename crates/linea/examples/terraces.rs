//! Example: slice a synthetic two-hill terrain into layers.
//!
//! Builds a heightmap from two cones with a crater in the larger one, runs
//! `build_stack`, and prints one line per layer: kept contours, holes,
//! filtered specks and alignment marks.
//!
//! Run from the workspace root:
//!   cargo run -p linea --example terraces -- --help
//!   RUST_LOG=debug cargo run -p linea --example terraces -- --layers 6

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use linea::{Image, PointOnEdge, StackConfig, build_stack};
use log::info;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Slice a synthetic terrain into stacked contour layers")]
struct Args {
    /// Raster width in samples
    #[arg(long, default_value_t = 240)]
    width: usize,

    /// Raster height in samples
    #[arg(long, default_value_t = 160)]
    height: usize,

    /// Number of slicing steps
    #[arg(long, default_value_t = 8)]
    layers: usize,

    /// Minimum feature size in model millimetres
    #[arg(long, default_value_t = 2.0)]
    min_dimension: f32,

    /// Emit edge midpoints instead of corners
    #[arg(long)]
    center: bool,
}

// ── Terrain ───────────────────────────────────────────────────────────────────

fn cone(x: f32, y: f32, cx: f32, cy: f32, radius: f32, peak: f32) -> f32 {
    let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
    (peak * (1.0 - d / radius)).max(0.0)
}

fn terrain(width: usize, height: usize) -> Result<Image<f32>> {
    let (w, h) = (width as f32, height as f32);
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let (fx, fy) = (x as f32, y as f32);
            let big = cone(fx, fy, 0.35 * w, 0.5 * h, 0.45 * h, 100.0);
            let crater = cone(fx, fy, 0.35 * w, 0.5 * h, 0.12 * h, 60.0);
            let small = cone(fx, fy, 0.78 * w, 0.4 * h, 0.3 * h, 55.0);
            data.push((big - crater).max(small));
        }
    }
    Image::from_vec(width, height, data).context("building terrain raster")
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let heights = terrain(args.width, args.height)?;
    let cfg = StackConfig {
        layer_count: args.layers,
        min_dimension: args.min_dimension,
        point_on_edge: if args.center {
            PointOnEdge::Center
        } else {
            PointOnEdge::Corner
        },
        ..StackConfig::default()
    };
    info!("config: {cfg:?}");

    let t0 = Instant::now();
    let reports = build_stack(&heights.as_view(), &cfg).context("building stack")?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    for r in &reports {
        let holes = r.contours.iter().filter(|c| c.is_hole).count();
        let vertices: usize = r.contours.iter().map(|c| c.points.len()).sum();
        println!(
            "layer {:>3}: {:>2} contours ({holes} holes, {vertices} vertices), {:>2} filtered, {} marks",
            r.index,
            r.contours.len(),
            r.filtered,
            r.alignment_marks().count()
        );
        for m in r.alignment_marks() {
            println!(
                "           mark ({}, {}) / ({}, {})",
                m.first.x, m.first.y, m.last.x, m.last.y
            );
        }
    }
    println!(
        "{} layers from {}x{} raster in {elapsed_ms:.2} ms",
        reports.len(),
        args.width,
        args.height
    );
    Ok(())
}
