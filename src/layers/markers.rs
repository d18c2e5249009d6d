use super::{LayerStats, popup_html};
use crate::config::MarkerStyle;
use crate::render::{MapDocument, Marker};
use crate::workbook::Sheet;

/// Turn `markers` rows into point markers. Rows without both coordinates are
/// skipped whole; nothing is ever partially rendered.
pub fn build(sheet: Option<&Sheet>, style: &MarkerStyle, doc: &mut MapDocument) -> LayerStats {
    let mut stats = LayerStats::default();
    let Some(sheet) = sheet else {
        return stats;
    };

    for row in sheet.rows() {
        let (Some(lat), Some(lon)) = (row.get_f64("latitude"), row.get_f64("longitude")) else {
            stats.skipped += 1;
            tracing::debug!("markers: row {} has no latitude/longitude, skipped", row.number());
            continue;
        };

        let name = row
            .get_text("name")
            .unwrap_or_else(|| "Marker".to_string());
        let description = row.get_text("description");

        doc.markers.push(Marker {
            lat,
            lon,
            popup: popup_html(&name, description.as_deref()),
            tooltip: name,
            icon: row.get_text("icon"),
            color: row.get_text("color").unwrap_or_else(|| style.color.clone()),
        });
        stats.added += 1;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapStyle;
    use crate::workbook::CellValue;
    use geo_types::Point;

    fn doc() -> MapDocument {
        MapDocument::new(Point::new(0.0, 0.0), &MapStyle::default())
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn absent_sheet_adds_nothing() {
        let mut doc = doc();
        let stats = build(None, &MarkerStyle::default(), &mut doc);
        assert_eq!(stats, LayerStats::default());
        assert!(doc.markers.is_empty());
    }

    #[test]
    fn row_without_longitude_is_skipped() {
        let sheet = Sheet::from_rows(
            &["latitude", "longitude", "name"],
            vec![
                vec![CellValue::Float(1.0), CellValue::Empty, text("no lon")],
                vec![CellValue::Float(1.0), CellValue::Float(2.0), text("ok")],
            ],
        );
        let mut doc = doc();
        let stats = build(Some(&sheet), &MarkerStyle::default(), &mut doc);
        assert_eq!(stats.added, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(doc.markers[0].tooltip, "ok");
    }

    #[test]
    fn defaults_apply_per_row() {
        let sheet = Sheet::from_rows(
            &["latitude", "longitude", "color", "icon", "description"],
            vec![
                vec![
                    CellValue::Float(1.0),
                    CellValue::Float(2.0),
                    text("red"),
                    text("star"),
                    text("note"),
                ],
                vec![
                    CellValue::Float(3.0),
                    CellValue::Float(4.0),
                    CellValue::Empty,
                    CellValue::Empty,
                    CellValue::Empty,
                ],
            ],
        );
        let mut doc = doc();
        build(Some(&sheet), &MarkerStyle::default(), &mut doc);

        assert_eq!(doc.markers[0].color, "red");
        assert_eq!(doc.markers[0].icon.as_deref(), Some("star"));
        assert_eq!(doc.markers[0].popup, "<b>Marker</b><br>note");

        assert_eq!(doc.markers[1].color, "blue");
        assert_eq!(doc.markers[1].icon, None);
        assert_eq!(doc.markers[1].popup, "<b>Marker</b>");
    }
}
