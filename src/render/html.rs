//! Leaflet HTML emission.
//!
//! The page pulls Leaflet and its plugins (markercluster, leaflet.heat,
//! awesome-markers) from CDN and embeds every element as a generated JS
//! statement. Only non-empty layers emit a layer group, so an absent dataset
//! leaves no trace in the output.

use geo_types::Coord;

use super::{CircleShape, MapDocument, Marker, PolygonShape, Polyline};

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>sheetmap</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.css">
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/leaflet.markercluster@1.5.3/dist/MarkerCluster.css">
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/leaflet.markercluster@1.5.3/dist/MarkerCluster.Default.css">
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/leaflet.awesome-markers@2.0.2/dist/leaflet.awesome-markers.css">
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@3.3.7/dist/css/bootstrap.min.css">
<script src="https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.js"></script>
<script src="https://cdn.jsdelivr.net/npm/leaflet.markercluster@1.5.3/dist/leaflet.markercluster.js"></script>
<script src="https://cdn.jsdelivr.net/npm/leaflet.heat@0.2.0/dist/leaflet-heat.js"></script>
<script src="https://cdn.jsdelivr.net/npm/leaflet.awesome-markers@2.0.2/dist/leaflet.awesome-markers.js"></script>
<style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
"#;

const TILE_LAYERS: &str = r#"const baseLayers = {};
baseLayers["OpenStreetMap"] = L.tileLayer("https://tile.openstreetmap.org/{z}/{x}/{y}.png", {maxZoom: 19, attribution: "&copy; OpenStreetMap contributors"}).addTo(map);
baseLayers["Light Mode"] = L.tileLayer("https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png", {maxZoom: 20, attribution: "&copy; OpenStreetMap contributors &copy; CARTO"});
baseLayers["Dark Mode"] = L.tileLayer("https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png", {maxZoom: 20, attribution: "&copy; OpenStreetMap contributors &copy; CARTO"});
const overlays = {};
"#;

const PAGE_FOOT: &str = "</script>\n</body>\n</html>\n";

pub fn render(doc: &MapDocument) -> String {
    let mut page = String::with_capacity(4096);
    page.push_str(PAGE_HEAD);

    page.push_str(&format!(
        "const map = L.map(\"map\").setView({}, {});\n",
        latlng(doc.center.y(), doc.center.x()),
        doc.zoom
    ));
    page.push_str(TILE_LAYERS);

    // Group emission order mirrors the builder invocation order.
    if !doc.markers.is_empty() {
        emit_markers(&mut page, &doc.markers, doc.cluster);
    }
    if !doc.polygons.is_empty() {
        emit_polygons(&mut page, &doc.polygons);
    }
    if !doc.circles.is_empty() {
        emit_circles(&mut page, &doc.circles);
    }
    if !doc.heat.is_empty() {
        emit_heat(&mut page, &doc.heat);
    }
    if !doc.lines.is_empty() {
        emit_lines(&mut page, &doc.lines);
    }

    page.push_str("L.control.layers(baseLayers, overlays).addTo(map);\n");

    if doc.glow {
        page.push_str(&format!(
            "L.circleMarker({}, {{radius: 12, color: \"yellow\", fill: true, fillColor: \"yellow\", fillOpacity: 0.6}}).bindPopup({}).addTo(map);\n",
            latlng(doc.center.y(), doc.center.x()),
            js_str("\u{2728} Center Glow \u{2728}")
        ));
    }

    page.push_str(PAGE_FOOT);
    page
}

fn emit_markers(page: &mut String, markers: &[Marker], cluster: bool) {
    if cluster {
        page.push_str("const markersLayer = L.markerClusterGroup();\n");
    } else {
        page.push_str("const markersLayer = L.layerGroup();\n");
    }
    for marker in markers {
        let icon = marker.icon.as_deref().unwrap_or("info-sign");
        page.push_str(&format!(
            "L.marker({}, {{icon: L.AwesomeMarkers.icon({{icon: {}, markerColor: {}, prefix: \"glyphicon\"}})}}).bindPopup({}, {{maxWidth: 300}}).bindTooltip({}).addTo(markersLayer);\n",
            latlng(marker.lat, marker.lon),
            js_str(icon),
            js_str(&marker.color),
            js_str(&marker.popup),
            js_str(&marker.tooltip)
        ));
    }
    page.push_str("markersLayer.addTo(map);\noverlays[\"Markers\"] = markersLayer;\n");
}

fn emit_polygons(page: &mut String, polygons: &[PolygonShape]) {
    page.push_str("const polygonsLayer = L.layerGroup();\n");
    for polygon in polygons {
        page.push_str(&format!(
            "L.polygon({}, {{color: {}, weight: {}, fill: true, fillColor: {}, fillOpacity: {}}}).bindPopup({}).bindTooltip({}).addTo(polygonsLayer);\n",
            latlngs(&polygon.coords),
            js_str(&polygon.color),
            polygon.weight,
            js_str(&polygon.fill_color),
            polygon.fill_opacity,
            js_str(&polygon.label),
            js_str(&polygon.label)
        ));
    }
    page.push_str("polygonsLayer.addTo(map);\noverlays[\"Polygons\"] = polygonsLayer;\n");
}

fn emit_circles(page: &mut String, circles: &[CircleShape]) {
    page.push_str("const circlesLayer = L.layerGroup();\n");
    for circle in circles {
        page.push_str(&format!(
            "L.circle({}, {{radius: {}, color: {}, weight: {}, fill: true, fillColor: {}, fillOpacity: {}}}).bindPopup({}, {{maxWidth: 300}}).bindTooltip({}).addTo(circlesLayer);\n",
            latlng(circle.lat, circle.lon),
            circle.radius,
            js_str(&circle.color),
            circle.weight,
            js_str(&circle.fill_color),
            circle.fill_opacity,
            js_str(&circle.popup),
            js_str(&circle.tooltip)
        ));
    }
    page.push_str("circlesLayer.addTo(map);\noverlays[\"Circles\"] = circlesLayer;\n");
}

fn emit_heat(page: &mut String, heat: &[[f64; 3]]) {
    let triples: Vec<String> = heat
        .iter()
        .map(|[lat, lon, intensity]| format!("[{lat}, {lon}, {intensity}]"))
        .collect();
    page.push_str(&format!(
        "const heatLayer = L.heatLayer([{}]).addTo(map);\noverlays[\"Heatmap\"] = heatLayer;\n",
        triples.join(", ")
    ));
}

fn emit_lines(page: &mut String, lines: &[Polyline]) {
    page.push_str("const linesLayer = L.layerGroup();\n");
    for line in lines {
        page.push_str(&format!(
            "L.polyline({}, {{color: {}, weight: {}, opacity: {}}}).bindPopup({}).bindTooltip({}).addTo(linesLayer);\n",
            latlngs(&line.coords),
            js_str(&line.color),
            line.weight,
            line.opacity,
            js_str(&line.label),
            js_str(&line.label)
        ));
    }
    page.push_str("linesLayer.addTo(map);\noverlays[\"Lines\"] = linesLayer;\n");
}

fn latlng(lat: f64, lon: f64) -> String {
    format!("[{lat}, {lon}]")
}

fn latlngs(coords: &[Coord<f64>]) -> String {
    let pairs: Vec<String> = coords.iter().map(|c| latlng(c.y, c.x)).collect();
    format!("[{}]", pairs.join(", "))
}

/// Encode a string as a JS literal. `<`, `>` and `&` are unicode-escaped so
/// embedded data can never terminate the enclosing `<script>` element.
fn js_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapStyle;
    use geo_types::{Point, coord};

    fn empty_doc() -> MapDocument {
        MapDocument::new(Point::new(4.9, 52.3), &MapStyle::default())
    }

    #[test]
    fn empty_document_has_base_map_and_control() {
        let page = render(&empty_doc());
        assert!(page.contains("L.map(\"map\").setView([52.3, 4.9], 10);"));
        assert!(page.contains("baseLayers[\"Light Mode\"]"));
        assert!(page.contains("baseLayers[\"Dark Mode\"]"));
        assert!(page.contains("L.control.layers(baseLayers, overlays)"));
        assert!(!page.contains("L.marker(["));
        assert!(!page.contains("L.heatLayer("));
    }

    #[test]
    fn glow_marker_is_a_feature_flag() {
        let mut doc = empty_doc();
        assert!(render(&doc).contains("L.circleMarker([52.3, 4.9]"));
        doc.glow = false;
        assert!(!render(&doc).contains("L.circleMarker("));
    }

    #[test]
    fn markers_cluster_by_default() {
        let mut doc = empty_doc();
        doc.markers.push(Marker {
            lat: 1.0,
            lon: 2.0,
            popup: "<b>Spot</b>".to_string(),
            tooltip: "Spot".to_string(),
            icon: None,
            color: "blue".to_string(),
        });
        let page = render(&doc);
        assert!(page.contains("L.markerClusterGroup();"));
        assert!(page.contains("L.marker([1, 2]"));
        assert!(page.contains("markerColor: \"blue\""));
        assert!(page.contains("icon: \"info-sign\""));
        assert!(page.contains("overlays[\"Markers\"]"));

        doc.cluster = false;
        assert!(!render(&doc).contains("L.markerClusterGroup"));
    }

    #[test]
    fn heat_layer_appears_once_for_all_points() {
        let mut doc = empty_doc();
        doc.heat.push([1.0, 2.0, 1.0]);
        doc.heat.push([3.0, 4.0, 2.5]);
        let page = render(&doc);
        assert_eq!(page.matches("L.heatLayer(").count(), 1);
        assert!(page.contains("[1, 2, 1], [3, 4, 2.5]"));
    }

    #[test]
    fn polygon_carries_fill_attributes() {
        let mut doc = empty_doc();
        doc.polygons.push(PolygonShape {
            coords: vec![
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 1.0, y: 0.0 },
                coord! { x: 1.0, y: 1.0 },
            ],
            color: "green".to_string(),
            fill_color: "green".to_string(),
            fill_opacity: 0.4,
            weight: 2.0,
            label: "Area".to_string(),
        });
        let page = render(&doc);
        assert!(page.contains("L.polygon([[0, 0], [0, 1], [1, 1]]"));
        assert!(page.contains("fillColor: \"green\""));
    }

    #[test]
    fn js_str_escapes_script_breakers() {
        assert_eq!(js_str("</script>"), "\"\\u003c/script\\u003e\"");
        assert_eq!(js_str("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(js_str("a\nb"), "\"a\\nb\"");
    }
}
