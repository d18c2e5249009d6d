use geo_types::{Coord, Point, coord};
use thiserror::Error;

/// Why a coordinate field could not be decoded. Callers skip the row and log
/// the reason instead of aborting the run.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("unrecognized coordinate encoding: {0:?}")]
    UnrecognizedFormat(String),
    #[error("malformed coordinate pair: {0:?}")]
    MalformedPair(String),
    #[error("malformed coordinate array: {0}")]
    MalformedArray(String),
}

/// Decode a coordinate field into an ordered sequence of positions.
///
/// Two textual encodings are accepted:
/// - a JSON nested array of `[lat, lon]` pairs: `[[52.1,4.9],[52.2,5.0]]`
/// - semicolon-delimited pairs: `52.1,4.9;52.2,5.0`
///
/// An absent or blank field decodes to an empty sequence. The returned coords
/// follow the geo convention: x is longitude, y is latitude.
pub fn parse_coordinates(raw: Option<&str>) -> Result<Vec<Coord<f64>>, GeometryError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        let pairs: Vec<[f64; 2]> = serde_json::from_str(trimmed)
            .map_err(|err| GeometryError::MalformedArray(err.to_string()))?;
        return Ok(pairs
            .into_iter()
            .map(|[lat, lon]| coord! { x: lon, y: lat })
            .collect());
    }

    if trimmed.contains(';') {
        let mut coords = Vec::new();
        for group in trimmed.split(';') {
            let mut parts = group.split(',');
            let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(GeometryError::MalformedPair(group.to_string()));
            };
            let lat: f64 = lat
                .trim()
                .parse()
                .map_err(|_| GeometryError::MalformedPair(group.to_string()))?;
            let lon: f64 = lon
                .trim()
                .parse()
                .map_err(|_| GeometryError::MalformedPair(group.to_string()))?;
            coords.push(coord! { x: lon, y: lat });
        }
        return Ok(coords);
    }

    Err(GeometryError::UnrecognizedFormat(trimmed.to_string()))
}

/// Average position of the given points; (0, 0) when there are none.
pub fn viewport_center(points: &[Point<f64>]) -> Point<f64> {
    if points.is_empty() {
        return Point::new(0.0, 0.0);
    }
    let count = points.len() as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(x, y), point| (x + point.x(), y + point.y()));
    Point::new(sum_x / count, sum_y / count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_field_decodes_to_empty() {
        assert_eq!(parse_coordinates(None), Ok(Vec::new()));
        assert_eq!(parse_coordinates(Some("   ")), Ok(Vec::new()));
    }

    #[test]
    fn decodes_semicolon_pairs() {
        let coords = parse_coordinates(Some("1,1;2,2;3,3")).unwrap();
        assert_eq!(
            coords,
            vec![
                coord! { x: 1.0, y: 1.0 },
                coord! { x: 2.0, y: 2.0 },
                coord! { x: 3.0, y: 3.0 },
            ]
        );
    }

    #[test]
    fn decodes_json_array() {
        let coords = parse_coordinates(Some("[[52.1, 4.9], [52.2, 5.0]]")).unwrap();
        assert_eq!(coords.len(), 2);
        assert_eq!(coords[0], coord! { x: 4.9, y: 52.1 });
    }

    #[test]
    fn both_encodings_decode_identically() {
        let json = parse_coordinates(Some("[[1.5,2.5],[3.5,4.5]]")).unwrap();
        let delimited = parse_coordinates(Some("1.5,2.5;3.5,4.5")).unwrap();
        assert_eq!(json, delimited);
    }

    #[test]
    fn rejects_bare_pair_without_delimiter() {
        assert!(matches!(
            parse_coordinates(Some("1,1")),
            Err(GeometryError::UnrecognizedFormat(_))
        ));
    }

    #[test]
    fn rejects_malformed_numbers() {
        assert!(matches!(
            parse_coordinates(Some("1,abc;2,2")),
            Err(GeometryError::MalformedPair(_))
        ));
    }

    #[test]
    fn rejects_triple_in_pair_group() {
        assert!(matches!(
            parse_coordinates(Some("1,2,3;4,5")),
            Err(GeometryError::MalformedPair(_))
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_coordinates(Some("[[1,2],[3]]")),
            Err(GeometryError::MalformedArray(_))
        ));
        assert!(matches!(
            parse_coordinates(Some("[not json")),
            Err(GeometryError::MalformedArray(_))
        ));
    }

    #[test]
    fn center_averages_points() {
        let points = [Point::new(0.0, 0.0), Point::new(2.0, 2.0)];
        assert_eq!(viewport_center(&points), Point::new(1.0, 1.0));
    }

    #[test]
    fn center_defaults_to_origin() {
        assert_eq!(viewport_center(&[]), Point::new(0.0, 0.0));
    }
}
