use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use linea_core::{Grid, Image, to_f32};
use linea_interior::AlignmentPoints;
use linea_stack::{
    AlignmentRegistry, KeptContour, LayerReport, PointOnEdge, StackConfig, build_stack,
    process_layer,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "linea")]
#[command(about = "Trace layer contours from masks and heightmaps")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trace every boundary of a binary mask (any nonzero pixel is foreground)
    #[command(name = "contours")]
    Contours(ContoursArgs),
    /// Slice a grayscale heightmap into layers and trace each one
    #[command(name = "stack")]
    Stack(StackArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum EdgePoint {
    Corner,
    Center,
}

impl From<EdgePoint> for PointOnEdge {
    fn from(p: EdgePoint) -> Self {
        match p {
            EdgePoint::Corner => PointOnEdge::Corner,
            EdgePoint::Center => PointOnEdge::Center,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct ContoursArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out/contours")]
    out: PathBuf,
    #[arg(long, value_enum, default_value_t = EdgePoint::Corner)]
    point_on_edge: EdgePoint,
    /// Drop contours whose pixel extent is below this in either axis
    #[arg(long, default_value_t = 0.0)]
    min_pixels: f32,
}

#[derive(Args, Debug, Clone)]
struct StackArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    /// JSON file with kebab-case `StackConfig` keys
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides `layer-count` from the config file
    #[arg(long)]
    layers: Option<usize>,
    /// Overrides `point-on-edge` from the config file
    #[arg(long, value_enum)]
    point_on_edge: Option<EdgePoint>,
    #[arg(long, default_value = "out/stack")]
    out: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
struct ContourDto {
    points: Vec<[f32; 2]>,
    is_hole: bool,
    /// `[min_x, min_y, max_x, max_y]` of the owner pixels, inclusive.
    pixel_bounds: [i32; 4],
    interior_cells: usize,
    alignment: Option<[[i32; 2]; 2]>,
}

#[derive(Debug, Clone, Serialize)]
struct LayerDto {
    index: usize,
    filtered: usize,
    contours: Vec<ContourDto>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaContours {
    input: String,
    width: usize,
    height: usize,
    point_on_edge: PointOnEdge,
    min_pixels: f32,
    contour_count: usize,
    hole_count: usize,
    filtered: usize,
}

#[derive(Debug, Clone, Serialize)]
struct LayerSummaryDto {
    index: usize,
    contours: usize,
    holes: usize,
    filtered: usize,
    marks: usize,
    file: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct StackSummary {
    input: String,
    width: usize,
    height: usize,
    config: StackConfig,
    mm_per_pixel: f32,
    filter_pixels: f32,
    layers: Vec<LayerSummaryDto>,
}

const MARK_RADIUS: f32 = 3.0;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Contours(args) => run_contours(args),
        Command::Stack(args) => run_stack(args),
    }
}

fn run_contours(args: ContoursArgs) -> Result<()> {
    ensure_file_exists(&args.input, "input")?;
    let mask = image::open(&args.input)
        .with_context(|| format!("opening mask {}", args.input.display()))?
        .to_luma8();
    let (w, h) = (mask.width() as usize, mask.height() as usize);
    let mask = Image::from_vec(w, h, mask.into_raw())
        .with_context(|| format!("constructing mask image from {}", args.input.display()))?;
    let grid = Grid::pad(&mask.as_view());
    info!(
        "loaded {}: {w}x{h}, {} foreground pixels",
        args.input.display(),
        grid.count_set()
    );

    let cfg = StackConfig {
        point_on_edge: args.point_on_edge.into(),
        ..StackConfig::default()
    };
    let mut registry = AlignmentRegistry::new();
    let report = process_layer(0, &grid, &cfg, args.min_pixels, &mut registry)
        .context("tracing mask contours")?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;
    let layer = layer_dto(&report);
    write_json(args.out.join("contours.json"), &layer.contours)?;
    write_json(
        args.out.join("meta.json"),
        &MetaContours {
            input: args.input.display().to_string(),
            width: w,
            height: h,
            point_on_edge: cfg.point_on_edge,
            min_pixels: args.min_pixels,
            contour_count: report.contours.len(),
            hole_count: report.contours.iter().filter(|c| c.is_hole).count(),
            filtered: report.filtered,
        },
    )?;

    println!(
        "{} contours written to {}",
        report.contours.len(),
        args.out.display()
    );
    Ok(())
}

fn run_stack(args: StackArgs) -> Result<()> {
    ensure_file_exists(&args.input, "input")?;
    let mut cfg = match &args.config {
        Some(path) => {
            ensure_file_exists(path, "config")?;
            read_json::<StackConfig>(path)
                .with_context(|| format!("reading stack config {}", path.display()))?
        }
        None => StackConfig::default(),
    };
    if let Some(n) = args.layers {
        cfg.layer_count = n;
    }
    if let Some(p) = args.point_on_edge {
        cfg.point_on_edge = p.into();
    }
    cfg.validate().context("validating stack config")?;

    let heights = load_heightmap(&args.input)?;
    let (w, h) = (heights.width(), heights.height());
    info!("loaded heightmap {}: {w}x{h}", args.input.display());

    let reports = build_stack(&heights.as_view(), &cfg).context("building layer stack")?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;

    let mut layers = Vec::with_capacity(reports.len());
    for r in &reports {
        let file = if r.is_empty() {
            None
        } else {
            let name = format!("layer-{:03}.json", r.index);
            write_json(args.out.join(&name), &layer_dto(r))?;
            Some(name)
        };
        layers.push(LayerSummaryDto {
            index: r.index,
            contours: r.contours.len(),
            holes: r.contours.iter().filter(|c| c.is_hole).count(),
            filtered: r.filtered,
            marks: r.alignment_marks().count(),
            file,
        });
    }

    let written = layers.iter().filter(|l| l.file.is_some()).count();
    if written == 0 {
        warn!("no layer kept any contour; only the summary is written");
    }

    write_json(
        args.out.join("stack.json"),
        &StackSummary {
            input: args.input.display().to_string(),
            width: w,
            height: h,
            mm_per_pixel: cfg.mm_per_pixel(w, h),
            filter_pixels: cfg.filter_pixels(w, h),
            config: cfg,
            layers,
        },
    )?;

    let overlay = render_alignment_overlay(&heights, &reports)?;
    let overlay_path = args.out.join("alignment.png");
    overlay
        .save(&overlay_path)
        .with_context(|| format!("saving image {}", overlay_path.display()))?;

    println!(
        "{} of {} layers written to {}",
        written,
        reports.len(),
        args.out.display()
    );
    Ok(())
}

fn load_heightmap(path: &Path) -> Result<Image<f32>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening heightmap {}", path.display()))?;

    match &dyn_img {
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => {
            let luma = dyn_img.to_luma16();
            let (w, h) = luma.dimensions();
            let img = Image::from_vec(w as usize, h as usize, luma.into_raw())
                .with_context(|| format!("constructing 16-bit image from {}", path.display()))?;
            Ok(to_f32(&img.as_view()))
        }
        _ => {
            let luma = dyn_img.to_luma8();
            let (w, h) = luma.dimensions();
            let img = Image::from_vec(w as usize, h as usize, luma.into_raw())
                .with_context(|| format!("constructing 8-bit image from {}", path.display()))?;
            Ok(to_f32(&img.as_view()))
        }
    }
}

fn layer_dto(report: &LayerReport) -> LayerDto {
    LayerDto {
        index: report.index,
        filtered: report.filtered,
        contours: report.contours.iter().map(contour_dto).collect(),
    }
}

fn contour_dto(c: &KeptContour) -> ContourDto {
    let b = c.pixel_bounds;
    ContourDto {
        points: c.points.iter().map(|p| [p.x, p.y]).collect(),
        is_hole: c.is_hole,
        pixel_bounds: [b.min_x, b.min_y, b.max_x, b.max_y],
        interior_cells: c.interior_cells,
        alignment: c.alignment.map(|a| a.as_array().map(|p| [p.x, p.y])),
    }
}

/// Heightmap rendered to gray with every alignment mark of the stack circled
/// at its cell centre.
fn render_alignment_overlay(heights: &Image<f32>, reports: &[LayerReport]) -> Result<RgbImage> {
    let vis = f32_to_u8_vis(heights.data());
    let gray = GrayImage::from_raw(heights.width() as u32, heights.height() as u32, vis)
        .context("constructing GrayImage from heightmap")?;
    let mut rgb = DynamicImage::ImageLuma8(gray).to_rgb8();

    let marks: Vec<&AlignmentPoints> = reports.iter().flat_map(|r| r.alignment_marks()).collect();
    for m in &marks {
        for c in m.as_array() {
            let (cx, cy) = (c.x as f32 + 0.5, c.y as f32 + 0.5);
            draw_mark(&mut rgb, cx, cy, MARK_RADIUS, Rgb([255, 64, 64]));
        }
    }
    info!("drew {} alignment marks", marks.len());
    Ok(rgb)
}

fn f32_to_u8_vis(data: &[f32]) -> Vec<u8> {
    let (min_v, max_v) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if max_v - min_v <= 1e-12 {
        return vec![0u8; data.len()];
    }

    let scale = 255.0 / (max_v - min_v);
    data.iter()
        .map(|&v| ((v - min_v) * scale).round().clamp(0.0, 255.0) as u8)
        .collect()
}

/// Circle outline of `radius` pixels around `(cx, cy)`, clipped to the image.
fn draw_mark(img: &mut RgbImage, cx: f32, cy: f32, radius: f32, color: Rgb<u8>) {
    let r = radius.ceil() as i32 + 1;
    let (xi, yi) = (cx.floor() as i32, cy.floor() as i32);

    for dy in -r..=r {
        for dx in -r..=r {
            let (px, py) = (xi + dx, yi + dy);
            let d = ((px as f32 + 0.5 - cx).powi(2) + (py as f32 + 0.5 - cy).powi(2)).sqrt();
            if (d - radius).abs() > 0.5 {
                continue;
            }
            let (Ok(ux), Ok(uy)) = (u32::try_from(px), u32::try_from(py)) else {
                continue;
            };
            if ux < img.width() && uy < img.height() {
                img.put_pixel(ux, uy, color);
            }
        }
    }
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
