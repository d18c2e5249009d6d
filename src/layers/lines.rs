use super::LayerStats;
use crate::config::LineStyle;
use crate::geometry::parse_coordinates;
use crate::render::{MapDocument, Polyline};
use crate::workbook::Sheet;

/// Turn `lines` rows into polylines. A row whose coordinate field is absent,
/// empty, or malformed contributes nothing.
pub fn build(sheet: Option<&Sheet>, style: &LineStyle, doc: &mut MapDocument) -> LayerStats {
    let mut stats = LayerStats::default();
    let Some(sheet) = sheet else {
        return stats;
    };

    for row in sheet.rows() {
        let coords = match parse_coordinates(row.get_text("coordinates").as_deref()) {
            Ok(coords) => coords,
            Err(err) => {
                stats.skipped += 1;
                tracing::debug!("lines: row {} skipped: {}", row.number(), err);
                continue;
            }
        };
        if coords.is_empty() {
            stats.skipped += 1;
            tracing::debug!("lines: row {} has no coordinates, skipped", row.number());
            continue;
        }

        doc.lines.push(Polyline {
            coords,
            color: row.get_text("color").unwrap_or_else(|| style.color.clone()),
            weight: row.get_f64("weight").unwrap_or(style.weight),
            opacity: row.get_f64("opacity").unwrap_or(style.opacity),
            label: row.get_text("name").unwrap_or_else(|| "Line".to_string()),
        });
        stats.added += 1;
    }

    stats
}
