use super::LayerStats;
use crate::render::MapDocument;
use crate::workbook::Sheet;

/// Collect `heatmap` rows into (lat, lon, intensity) triples. All points feed
/// one density layer; the renderer emits it only when at least one point was
/// collected.
pub fn build(sheet: Option<&Sheet>, doc: &mut MapDocument) -> LayerStats {
    let mut stats = LayerStats::default();
    let Some(sheet) = sheet else {
        return stats;
    };

    for row in sheet.rows() {
        let (Some(lat), Some(lon)) = (row.get_f64("latitude"), row.get_f64("longitude")) else {
            stats.skipped += 1;
            tracing::debug!("heatmap: row {} has no latitude/longitude, skipped", row.number());
            continue;
        };
        let intensity = row.get_f64("intensity").unwrap_or(1.0);
        doc.heat.push([lat, lon, intensity]);
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

    #[test]
    fn intensity_defaults_to_one() {
        let sheet = Sheet::from_rows(
            &["latitude", "longitude", "intensity"],
            vec![
                vec![
                    CellValue::Float(1.0),
                    CellValue::Float(2.0),
                    CellValue::Float(3.5),
                ],
                vec![CellValue::Float(4.0), CellValue::Float(5.0), CellValue::Empty],
            ],
        );
        let mut doc = doc();
        let stats = build(Some(&sheet), &mut doc);
        assert_eq!(stats.added, 2);
        assert_eq!(doc.heat, vec![[1.0, 2.0, 3.5], [4.0, 5.0, 1.0]]);
    }

    #[test]
    fn rows_missing_coordinates_collect_nothing() {
        let sheet = Sheet::from_rows(
            &["latitude", "longitude"],
            vec![vec![CellValue::Empty, CellValue::Float(2.0)]],
        );
        let mut doc = doc();
        let stats = build(Some(&sheet), &mut doc);
        assert_eq!(stats.skipped, 1);
        assert!(doc.heat.is_empty());
    }

    #[test]
    fn absent_sheet_is_fine() {
        let mut doc = doc();
        assert_eq!(build(None, &mut doc), LayerStats::default());
    }
}
