use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fill used when neither the row nor the style supplies one.
pub const FALLBACK_FILL: &str = "lightblue";

/// Per-layer rendering defaults, optionally overridden from a YAML file.
///
/// Every field has a default, so a style file only needs the values it wants
/// to change.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct StyleConfig {
    pub map: MapStyle,
    pub markers: MarkerStyle,
    pub lines: LineStyle,
    pub polygons: PolygonStyle,
    pub circles: CircleStyle,
}

impl StyleConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct MapStyle {
    pub zoom: u8,
    pub cluster: bool,
    pub glow: bool,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            zoom: 10,
            cluster: true,
            glow: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct MarkerStyle {
    pub color: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: "blue".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LineStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: "red".to_string(),
            weight: 3.0,
            opacity: 0.8,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PolygonStyle {
    pub color: String,
    pub fill_color: Option<String>,
    pub fill_opacity: f64,
    pub weight: f64,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            color: "blue".to_string(),
            fill_color: None,
            fill_opacity: 0.4,
            weight: 2.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CircleStyle {
    pub radius: f64,
    pub color: String,
    pub fill_color: Option<String>,
    pub fill_opacity: f64,
    pub weight: f64,
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self {
            radius: 500.0,
            color: "blue".to_string(),
            fill_color: None,
            fill_opacity: 0.4,
            weight: 2.0,
        }
    }
}
