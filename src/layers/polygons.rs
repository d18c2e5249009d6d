use super::LayerStats;
use crate::config::{FALLBACK_FILL, PolygonStyle};
use crate::geometry::parse_coordinates;
use crate::render::{MapDocument, PolygonShape};
use crate::workbook::Sheet;

/// Turn `polygons` rows into closed filled regions. Fill color resolution:
/// row `fill_color`, else the row's outline color, else the configured fill,
/// else lightblue.
pub fn build(sheet: Option<&Sheet>, style: &PolygonStyle, doc: &mut MapDocument) -> LayerStats {
    let mut stats = LayerStats::default();
    let Some(sheet) = sheet else {
        return stats;
    };

    for row in sheet.rows() {
        let coords = match parse_coordinates(row.get_text("coordinates").as_deref()) {
            Ok(coords) => coords,
            Err(err) => {
                stats.skipped += 1;
                tracing::debug!("polygons: row {} skipped: {}", row.number(), err);
                continue;
            }
        };
        if coords.is_empty() {
            stats.skipped += 1;
            tracing::debug!("polygons: row {} has no coordinates, skipped", row.number());
            continue;
        }

        let row_color = row.get_text("color");
        let fill_color = row
            .get_text("fill_color")
            .or_else(|| row_color.clone())
            .or_else(|| style.fill_color.clone())
            .unwrap_or_else(|| FALLBACK_FILL.to_string());

        doc.polygons.push(PolygonShape {
            coords,
            color: row_color.unwrap_or_else(|| style.color.clone()),
            fill_color,
            fill_opacity: row.get_f64("fill_opacity").unwrap_or(style.fill_opacity),
            weight: row.get_f64("weight").unwrap_or(style.weight),
            label: row.get_text("name").unwrap_or_else(|| "Area".to_string()),
        });
        stats.added += 1;
    }

    stats
}
