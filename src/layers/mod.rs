pub mod circles;
pub mod heatmap;
pub mod lines;
pub mod markers;
pub mod polygons;

/// Outcome of one layer builder: rows turned into elements vs rows skipped
/// for missing or malformed geometry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LayerStats {
    pub added: usize,
    pub skipped: usize,
}

/// Popup body shared by markers and circles: bold name, optional description
/// on a second line. Values are spreadsheet-controlled and pass through as-is,
/// matching how the labels behave elsewhere on the map.
pub(crate) fn popup_html(name: &str, description: Option<&str>) -> String {
    match description {
        Some(description) => format!("<b>{name}</b><br>{description}"),
        None => format!("<b>{name}</b>"),
    }
}
