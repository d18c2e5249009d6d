use anyhow::{Context, Result};
use geo_types::{Coord, Point};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::MapStyle;

pub mod html;

#[derive(Debug, Clone)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub popup: String,
    pub tooltip: String,
    pub icon: Option<String>,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct Polyline {
    pub coords: Vec<Coord<f64>>,
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct PolygonShape {
    pub coords: Vec<Coord<f64>>,
    pub color: String,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub weight: f64,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct CircleShape {
    pub lat: f64,
    pub lon: f64,
    pub radius: f64,
    pub popup: String,
    pub tooltip: String,
    pub color: String,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub weight: f64,
}

/// (lat, lon, intensity)
pub type HeatPoint = [f64; 3];

/// Accumulated map state, built once by the layer builders and then serialized
/// to a self-contained HTML page.
#[derive(Debug)]
pub struct MapDocument {
    pub center: Point<f64>,
    pub zoom: u8,
    pub cluster: bool,
    pub glow: bool,
    pub markers: Vec<Marker>,
    pub lines: Vec<Polyline>,
    pub polygons: Vec<PolygonShape>,
    pub circles: Vec<CircleShape>,
    pub heat: Vec<HeatPoint>,
}

impl MapDocument {
    pub fn new(center: Point<f64>, style: &MapStyle) -> Self {
        Self {
            center,
            zoom: style.zoom,
            cluster: style.cluster,
            glow: style.glow,
            markers: Vec::new(),
            lines: Vec::new(),
            polygons: Vec::new(),
            circles: Vec::new(),
            heat: Vec::new(),
        }
    }

    /// Write the rendered page, overwriting any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Failed to create output {:?}", path))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(html::render(self).as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
