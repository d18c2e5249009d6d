use super::{LayerStats, popup_html};
use crate::config::{CircleStyle, FALLBACK_FILL};
use crate::render::{CircleShape, MapDocument};
use crate::workbook::Sheet;

/// Turn `circles` rows into fixed-radius circles. Coordinate gating follows
/// the marker rules; fill resolution follows the polygon rules.
pub fn build(sheet: Option<&Sheet>, style: &CircleStyle, doc: &mut MapDocument) -> LayerStats {
    let mut stats = LayerStats::default();
    let Some(sheet) = sheet else {
        return stats;
    };

    for row in sheet.rows() {
        let (Some(lat), Some(lon)) = (row.get_f64("latitude"), row.get_f64("longitude")) else {
            stats.skipped += 1;
            tracing::debug!("circles: row {} has no latitude/longitude, skipped", row.number());
            continue;
        };

        let name = row
            .get_text("name")
            .unwrap_or_else(|| "Circle".to_string());
        let description = row.get_text("description");
        let row_color = row.get_text("color");
        let fill_color = row
            .get_text("fill_color")
            .or_else(|| row_color.clone())
            .or_else(|| style.fill_color.clone())
            .unwrap_or_else(|| FALLBACK_FILL.to_string());

        doc.circles.push(CircleShape {
            lat,
            lon,
            radius: row.get_f64("radius").unwrap_or(style.radius),
            popup: popup_html(&name, description.as_deref()),
            tooltip: name,
            color: row_color.unwrap_or_else(|| style.color.clone()),
            fill_color,
            fill_opacity: row.get_f64("fill_opacity").unwrap_or(style.fill_opacity),
            weight: row.get_f64("weight").unwrap_or(style.weight),
        });
        stats.added += 1;
    }

    stats
}
