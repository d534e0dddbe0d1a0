// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation serialization and deserialization.
//!
//! Polygons are stored in two forms next to each other:
//!
//! - a structured JSON shape list with integer pixel coordinates, which is
//!   the form read back when an image is reopened;
//! - a YOLO segmentation text file with one normalized line per polygon,
//!   consumed by training pipelines. It is never read back.

use crate::config::FORMAT_VERSION;
use crate::error::{AnnotationFormat, AnnotatorError};
use crate::models::annotation::{Point, Polygon};
use crate::models::classes::ClassRegistry;
use crate::util::geometry::{normalize_coordinates, BoundingBox};
use serde::{Deserialize, Serialize};
use std::path::Path;

const POLYGON_SHAPE: &str = "polygon";

/// Structured annotation file contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredAnnotation {
    pub version: String,
    #[serde(rename = "imagePath")]
    pub image_path: String,
    #[serde(rename = "imageWidth")]
    pub image_width: u32,
    #[serde(rename = "imageHeight")]
    pub image_height: u32,
    pub shapes: Vec<ShapeRecord>,
}

/// A single polygon in the structured file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeRecord {
    pub label: String,
    pub points: Vec<[i64; 2]>,
    pub shape_type: String,
}

/// Lenient view of a structured file used when reading it back.
///
/// Shapes stay untyped so one odd entry cannot reject the whole file.
#[derive(Deserialize)]
struct RawAnnotation {
    #[serde(default)]
    shapes: Vec<serde_json::Value>,
}

/// Round a pixel coordinate for the structured form (ties to even).
pub fn round_coordinate(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Build the structured record for an image's committed polygons.
pub fn encode_structured(
    polygons: &[Polygon],
    image_name: &str,
    width: u32,
    height: u32,
) -> StructuredAnnotation {
    let shapes = polygons
        .iter()
        .map(|polygon| ShapeRecord {
            label: polygon.label.clone(),
            points: polygon
                .points
                .iter()
                .map(|p| [round_coordinate(p.x), round_coordinate(p.y)])
                .collect(),
            shape_type: POLYGON_SHAPE.to_string(),
        })
        .collect();

    StructuredAnnotation {
        version: FORMAT_VERSION.to_string(),
        image_path: image_name.to_string(),
        image_width: width,
        image_height: height,
        shapes,
    }
}

/// Serialize a structured record as JSON with four-space indentation.
pub fn structured_to_bytes(annotation: &StructuredAnnotation) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    annotation.serialize(&mut serializer)?;
    Ok(buf)
}

/// Encode committed polygons as YOLO segmentation lines.
///
/// Each line is `class_id cx cy w h x1 y1 ... xn yn` with every value
/// after the class id normalized by the image size.
pub fn encode_flat(
    polygons: &[Polygon],
    width: u32,
    height: u32,
    registry: &ClassRegistry,
) -> String {
    polygons
        .iter()
        .filter_map(|polygon| {
            let bbox = BoundingBox::from_points(&polygon.points)?;
            if registry.resolve(&polygon.label).is_none() {
                log::warn!(
                    "Label '{}' is not in the class list, writing class 0",
                    polygon.label
                );
            }
            let class_id = registry.index_of(&polygon.label);

            let mut values: Vec<f64> = bbox.normalized_center_size(width, height).to_vec();
            for p in &polygon.points {
                let (x, y) = normalize_coordinates(p.x, p.y, width, height);
                values.push(x);
                values.push(y);
            }

            let coords: Vec<String> = values.iter().map(|v| format!("{:.6}", v)).collect();
            Some(format!("{} {}", class_id, coords.join(" ")))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decode the polygons from a structured JSON document.
///
/// Non-polygon shapes, malformed points and shapes left without points
/// are skipped. A shape without a label gets the first registry label.
pub fn decode_structured(
    json: &str,
    registry: &ClassRegistry,
) -> serde_json::Result<Vec<Polygon>> {
    let raw: RawAnnotation = serde_json::from_str(json)?;
    let default_label = registry.first().unwrap_or("0");

    let polygons = raw
        .shapes
        .iter()
        .filter(|shape| {
            shape.get("shape_type").and_then(serde_json::Value::as_str) == Some(POLYGON_SHAPE)
        })
        .filter_map(|shape| {
            let label = match shape.get("label") {
                None | Some(serde_json::Value::Null) => default_label.to_string(),
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            };
            let points: Vec<Point> = shape
                .get("points")
                .and_then(serde_json::Value::as_array)
                .map(|points| points.iter().filter_map(coerce_point).collect())
                .unwrap_or_default();
            if points.is_empty() {
                None
            } else {
                Some(Polygon::new(label, points))
            }
        })
        .collect();

    Ok(polygons)
}

/// Read a pair of numeric components from a JSON point entry.
fn coerce_point(value: &serde_json::Value) -> Option<Point> {
    let items = value.as_array()?;
    if items.len() < 2 {
        return None;
    }
    Some(Point::new(coerce_number(&items[0])?, coerce_number(&items[1])?))
}

fn coerce_number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read polygons from a structured file. A missing file yields `Ok(None)`.
pub fn read_structured(
    path: &Path,
    registry: &ClassRegistry,
) -> Result<Option<Vec<Polygon>>, AnnotatorError> {
    if !path.exists() {
        return Ok(None);
    }

    let read_error = |source: std::io::Error| AnnotatorError::AnnotationRead {
        path: path.to_path_buf(),
        source,
    };
    let json = std::fs::read_to_string(path).map_err(read_error)?;
    let polygons = decode_structured(&json, registry)
        .map_err(|e| read_error(std::io::Error::from(e)))?;
    Ok(Some(polygons))
}

/// Write the structured JSON file.
pub fn write_structured(path: &Path, annotation: &StructuredAnnotation) -> Result<(), AnnotatorError> {
    let write_error = |source: std::io::Error| AnnotatorError::AnnotationWrite {
        format: AnnotationFormat::Structured,
        path: path.to_path_buf(),
        source,
    };
    let bytes = structured_to_bytes(annotation).map_err(|e| write_error(e.into()))?;
    std::fs::write(path, bytes).map_err(write_error)
}

/// Write the YOLO segmentation text file.
pub fn write_flat(path: &Path, contents: &str) -> Result<(), AnnotatorError> {
    std::fs::write(path, contents).map_err(|source| AnnotatorError::AnnotationWrite {
        format: AnnotationFormat::Flat,
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(labels: &[&str]) -> ClassRegistry {
        let mut registry = ClassRegistry::new();
        registry.load_labels(labels).unwrap();
        registry
    }

    fn dog_triangle() -> Polygon {
        Polygon::new(
            "dog",
            vec![
                Point::new(10.0, 10.0),
                Point::new(90.0, 10.0),
                Point::new(90.0, 40.0),
            ],
        )
    }

    #[test]
    fn test_flat_line_for_scenario() {
        let registry = registry(&["cat", "dog"]);
        let text = encode_flat(&[dog_triangle()], 100, 50, &registry);
        assert_eq!(
            text,
            "1 0.500000 0.500000 0.800000 0.600000 \
             0.100000 0.200000 0.900000 0.200000 0.900000 0.800000"
        );
    }

    #[test]
    fn test_flat_bbox_matches_formula() {
        let registry = registry(&["a"]);
        let polygon = Polygon::new(
            "a",
            vec![
                Point::new(13.0, 200.0),
                Point::new(400.5, 17.25),
                Point::new(250.0, 330.0),
                Point::new(100.0, 90.0),
            ],
        );
        let (w, h) = (640u32, 480u32);
        let line = encode_flat(&[polygon], w, h, &registry);
        let fields: Vec<&str> = line.split(' ').collect();
        assert_eq!(fields.len(), 1 + 4 + 8);

        let (x_min, x_max, y_min, y_max) = (13.0, 400.5, 17.25, 330.0);
        let expected = [
            ((x_min + x_max) / 2.0) / w as f64,
            ((y_min + y_max) / 2.0) / h as f64,
            (x_max - x_min) / w as f64,
            (y_max - y_min) / h as f64,
        ];
        for (field, value) in fields[1..5].iter().zip(expected) {
            assert_eq!(*field, format!("{:.6}", value));
        }
    }

    #[test]
    fn test_flat_unresolved_label_uses_class_zero() {
        let registry = registry(&["cat", "dog"]);
        let mut polygon = dog_triangle();
        polygon.label = "horse".to_string();
        let text = encode_flat(&[polygon], 100, 50, &registry);
        assert!(text.starts_with("0 "), "{}", text);
    }

    #[test]
    fn test_flat_lines_have_no_trailing_newline() {
        let registry = registry(&["cat", "dog"]);
        let text = encode_flat(&[dog_triangle(), dog_triangle()], 100, 50, &registry);
        assert_eq!(text.lines().count(), 2);
        assert!(!text.ends_with('\n'));
        assert_eq!(encode_flat(&[], 100, 50, &registry), "");
    }

    #[test]
    fn test_structured_rounds_half_to_even() {
        let polygon = Polygon::new(
            "cat",
            vec![
                Point::new(0.5, 1.5),
                Point::new(2.5, 2.4),
                Point::new(2.6, -0.5),
            ],
        );
        let record = encode_structured(&[polygon], "a.png", 10, 10);
        assert_eq!(record.shapes[0].points, vec![[0, 2], [2, 2], [3, 0]]);
    }

    #[test]
    fn test_structured_json_layout() {
        let record = encode_structured(&[dog_triangle()], "img.png", 100, 50);
        let bytes = structured_to_bytes(&record).unwrap();
        let json = String::from_utf8(bytes).unwrap();

        assert!(json.starts_with("{\n    \"version\": \"1.0\",\n    \"imagePath\": \"img.png\","));
        assert!(json.contains("\"imageWidth\": 100"));
        assert!(json.contains("\"imageHeight\": 50"));
        assert!(json.contains("\"shape_type\": \"polygon\""));
    }

    #[test]
    fn test_structured_roundtrip() {
        let registry = registry(&["cat", "dog"]);
        let polygons = vec![
            dog_triangle(),
            Polygon::new(
                "cat",
                vec![
                    Point::new(1.4, 2.6),
                    Point::new(30.5, 2.0),
                    Point::new(15.0, 20.5),
                ],
            ),
        ];
        let record = encode_structured(&polygons, "img.png", 100, 50);
        let json = String::from_utf8(structured_to_bytes(&record).unwrap()).unwrap();
        let decoded = decode_structured(&json, &registry).unwrap();

        let expected: Vec<Polygon> = polygons
            .iter()
            .map(|polygon| {
                Polygon::new(
                    polygon.label.clone(),
                    polygon
                        .points
                        .iter()
                        .map(|p| {
                            Point::new(
                                round_coordinate(p.x) as f64,
                                round_coordinate(p.y) as f64,
                            )
                        })
                        .collect(),
                )
            })
            .collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_decode_is_lenient() {
        let registry = registry(&["cat", "dog"]);
        let json = r#"{
            "version": "1.0",
            "extra": {"anything": true},
            "shapes": [
                {"label": "dog", "points": [[1, 2], [3], "bad", [4.5, "6"], [7, 8, 9]], "shape_type": "polygon"},
                {"points": [[1, 1], [2, 2]], "shape_type": "polygon"},
                {"label": "cat", "points": [[1]], "shape_type": "polygon"},
                {"label": "cat", "points": [[1, 2]], "shape_type": "rectangle"},
                {"label": "cat", "points": [[1, 2]]}
            ]
        }"#;

        let polygons = decode_structured(json, &registry).unwrap();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].label, "dog");
        assert_eq!(
            polygons[0].points,
            vec![Point::new(1.0, 2.0), Point::new(4.5, 6.0), Point::new(7.0, 8.0)]
        );
        assert_eq!(polygons[1].label, "cat");
    }

    #[test]
    fn test_decode_skips_odd_shapes_without_losing_polygons() {
        let registry = registry(&["cat", "dog"]);
        let json = r#"{
            "shapes": [
                {"label": "note", "points": {"x": 1}, "shape_type": 7},
                {"label": "dog", "points": [[1, 2], [3, 4], [5, 6]], "shape_type": "polygon"},
                {"label": ["odd"], "points": "none", "shape_type": null},
                "not a shape",
                {"label": "cat", "points": {"x": 1}, "shape_type": "polygon"},
                {"label": "cat", "points": [[7, 8]], "shape_type": "polygon"}
            ]
        }"#;

        let polygons = decode_structured(json, &registry).unwrap();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].label, "dog");
        assert_eq!(polygons[0].points.len(), 3);
        assert_eq!(polygons[1].label, "cat");
        assert_eq!(polygons[1].points, vec![Point::new(7.0, 8.0)]);
    }

    #[test]
    fn test_decode_default_label_without_registry() {
        let json = r#"{"shapes": [{"points": [[1, 2]], "shape_type": "polygon"}]}"#;
        let polygons = decode_structured(json, &ClassRegistry::new()).unwrap();
        assert_eq!(polygons[0].label, "0");
    }

    #[test]
    fn test_decode_without_shapes() {
        let polygons = decode_structured(r#"{"version": "1.0"}"#, &ClassRegistry::new()).unwrap();
        assert!(polygons.is_empty());
    }

    #[test]
    fn test_read_structured_missing_and_corrupt() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let registry = registry(&["cat"]);

        let missing = read_structured(&temp.path().join("none.json"), &registry).unwrap();
        assert!(missing.is_none());

        let corrupt = temp.path().join("corrupt.json");
        std::fs::write(&corrupt, "{ not json").unwrap();
        assert!(matches!(
            read_structured(&corrupt, &registry),
            Err(AnnotatorError::AnnotationRead { .. })
        ));
    }

    #[test]
    fn test_write_errors_name_format() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let missing_dir = temp.path().join("missing");
        let record = encode_structured(&[dog_triangle()], "img.png", 100, 50);

        match write_structured(&missing_dir.join("a.json"), &record) {
            Err(AnnotatorError::AnnotationWrite { format, .. }) => {
                assert_eq!(format, AnnotationFormat::Structured)
            }
            other => panic!("unexpected result: {:?}", other),
        }
        match write_flat(&missing_dir.join("a.txt"), "0 0.1") {
            Err(AnnotatorError::AnnotationWrite { format, .. }) => {
                assert_eq!(format, AnnotationFormat::Flat)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
