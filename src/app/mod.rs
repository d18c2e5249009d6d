use anyhow::{Context, Result};
use clap::Parser;
use geo_types::Point;
use std::path::PathBuf;

use crate::config::StyleConfig;
use crate::geometry::viewport_center;
use crate::layers;
use crate::render::MapDocument;
use crate::workbook::Workbook;

const SHEET_SCHEMAS: &str = "\
Expected sheet structure:
  markers:  latitude, longitude, name, description, icon, color
  lines:    name, coordinates, color, weight, opacity
  polygons: name, coordinates, color, fill_color, fill_opacity, weight
  heatmap:  latitude, longitude, intensity
  circles:  latitude, longitude, radius, name, description, color, fill_color

A coordinates field holds either \"[[lat,lon],[lat,lon]]\" or \"lat,lon;lat,lon\".";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(after_help = SHEET_SCHEMAS, arg_required_else_help = true)]
pub struct Cli {
    /// Input spreadsheet (.xlsx)
    pub input: PathBuf,

    /// Output HTML file
    #[arg(default_value = "map.html")]
    pub output: PathBuf,

    /// Center latitude (auto-computed from point data when omitted)
    #[arg(long, requires = "center_lon")]
    pub center_lat: Option<f64>,

    /// Center longitude (auto-computed from point data when omitted)
    #[arg(long, requires = "center_lat")]
    pub center_lon: Option<f64>,

    /// Initial zoom level
    #[arg(long)]
    pub zoom: Option<u8>,

    /// Style overrides (YAML)
    #[arg(long)]
    pub style: Option<PathBuf>,

    /// Attach markers individually instead of clustering them
    #[arg(long)]
    pub no_cluster: bool,

    /// Skip the decorative glow marker at the map center
    #[arg(long)]
    pub no_glow: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Load the workbook, build every layer in fixed order, and write the map.
pub fn run(cli: &Cli) -> Result<()> {
    let mut style = match &cli.style {
        Some(path) => StyleConfig::load(path)
            .with_context(|| format!("Failed to load style file {:?}", path))?,
        None => StyleConfig::default(),
    };
    if let Some(zoom) = cli.zoom {
        style.map.zoom = zoom;
    }
    if cli.no_cluster {
        style.map.cluster = false;
    }
    if cli.no_glow {
        style.map.glow = false;
    }

    let workbook = Workbook::load(&cli.input)?;
    tracing::info!("Found sheets: {:?}", workbook.sheet_names());

    let center = match (cli.center_lat, cli.center_lon) {
        (Some(lat), Some(lon)) => Point::new(lon, lat),
        _ => auto_center(&workbook),
    };
    tracing::info!("Viewport center: ({:.4}, {:.4})", center.y(), center.x());

    let mut doc = MapDocument::new(center, &style.map);

    tracing::info!("Adding markers...");
    log_stats(
        "markers",
        layers::markers::build(workbook.sheet("markers"), &style.markers, &mut doc),
    );

    tracing::info!("Adding polygons...");
    log_stats(
        "polygons",
        layers::polygons::build(workbook.sheet("polygons"), &style.polygons, &mut doc),
    );

    tracing::info!("Adding circles...");
    log_stats(
        "circles",
        layers::circles::build(workbook.sheet("circles"), &style.circles, &mut doc),
    );

    tracing::info!("Adding heatmap...");
    log_stats(
        "heatmap",
        layers::heatmap::build(workbook.sheet("heatmap"), &mut doc),
    );

    tracing::info!("Adding lines...");
    log_stats(
        "lines",
        layers::lines::build(workbook.sheet("lines"), &style.lines, &mut doc),
    );

    doc.save(&cli.output)?;
    tracing::info!("Map saved to: {}", cli.output.display());

    Ok(())
}

fn log_stats(layer: &str, stats: layers::LayerStats) {
    if stats.skipped > 0 {
        tracing::info!("{}: {} added, {} skipped", layer, stats.added, stats.skipped);
    } else {
        tracing::info!("{}: {} added", layer, stats.added);
    }
}

/// Average every latitude/longitude found in the point-bearing sheets; (0, 0)
/// when there are none. Lines and polygons never move the center.
pub fn auto_center(workbook: &Workbook) -> Point<f64> {
    let mut points = Vec::new();
    for name in ["markers", "heatmap", "circles"] {
        let Some(sheet) = workbook.sheet(name) else {
            continue;
        };
        for row in sheet.rows() {
            if let (Some(lat), Some(lon)) = (row.get_f64("latitude"), row.get_f64("longitude")) {
                points.push(Point::new(lon, lat));
            }
        }
    }
    viewport_center(&points)
}
