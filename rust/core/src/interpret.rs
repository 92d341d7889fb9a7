// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity interpretation
//!
//! Dispatches exhaustively over the closed entity kind set, runs each
//! defining point through OCS normalization, the plausibility check and
//! reprojection, and assembles a GeoJSON feature with the kind's
//! geometry type.
//!
//! Every entity reduces to exactly one [`Outcome`]; nothing here
//! panics or escapes the batch loop. Implausible coordinates are kept
//! distinct from malformed data: the former is valid geometry outside
//! the region of interest, the latter is a defect in the entity itself.

use geojson::{Feature, Geometry, JsonObject, JsonValue, Value};
use nalgebra::{Point3, Vector3};

use crate::entity::{Entity, EntityGeometry};
use crate::ocs;
use crate::plausibility;
use crate::reproject::Reprojector;
use crate::tessellate;

/// Result of interpreting one entity
#[derive(Debug)]
pub enum Outcome {
    /// Entity produced a map feature
    Feature(Feature),
    /// Entity dropped for out-of-range coordinates
    Filtered,
    /// Entity unsupported or malformed; key for the skip counter
    Skipped(String),
}

/// Why an entity produced no feature
enum Rejection {
    Implausible,
    Unsupported,
    Malformed,
}

impl From<crate::Error> for Rejection {
    fn from(_: crate::Error) -> Self {
        Rejection::Malformed
    }
}

/// Interpret a single entity against a prepared reprojector.
pub fn interpret(entity: &Entity, reprojector: &Reprojector) -> Outcome {
    match geometry_value(entity, reprojector) {
        Ok(value) => Outcome::Feature(feature(entity, value)),
        Err(Rejection::Implausible) => Outcome::Filtered,
        Err(Rejection::Unsupported) | Err(Rejection::Malformed) => {
            Outcome::Skipped(entity.geometry.kind_name().to_string())
        }
    }
}

fn geometry_value(entity: &Entity, reprojector: &Reprojector) -> Result<Value, Rejection> {
    let extrusion = &entity.extrusion;
    let value = match &entity.geometry {
        EntityGeometry::Line { start, end } => {
            let a = project_checked(start, extrusion, reprojector)?;
            let b = project_checked(end, extrusion, reprojector)?;
            Value::LineString(vec![a.to_vec(), b.to_vec()])
        }

        EntityGeometry::Polyline {
            vertices, closed, ..
        } => {
            if vertices.len() < 2 {
                return Err(Rejection::Malformed);
            }
            // Vertices are filtered individually; the entity survives as
            // long as enough of them stay in range.
            let mut positions = Vec::with_capacity(vertices.len());
            for vertex in vertices {
                let (x, y) = ocs::to_wcs(*vertex, *extrusion);
                if plausibility::plausible(x, y) {
                    positions.push(reprojector.project(x, y)?.to_vec());
                }
            }
            if *closed {
                // Fewer than 3 survivors would close into a degenerate
                // ring, which the output contract forbids.
                if positions.len() < 3 {
                    return Err(Rejection::Implausible);
                }
                let first = positions[0].clone();
                positions.push(first);
                Value::Polygon(vec![positions])
            } else {
                if positions.len() < 2 {
                    return Err(Rejection::Implausible);
                }
                Value::LineString(positions)
            }
        }

        EntityGeometry::Circle { center, radius } => {
            if !radius.is_finite() {
                return Err(Rejection::Malformed);
            }
            let (x, y) = ocs::to_wcs(*center, *extrusion);
            if !plausibility::plausible(x, y) {
                return Err(Rejection::Implausible);
            }
            let ring = tessellate::circle_ring((x, y), *radius, reprojector)?;
            Value::Polygon(vec![ring])
        }

        EntityGeometry::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        } => {
            if !radius.is_finite() || !start_angle.is_finite() || !end_angle.is_finite() {
                return Err(Rejection::Malformed);
            }
            let (x, y) = ocs::to_wcs(*center, *extrusion);
            if !plausibility::plausible(x, y) {
                return Err(Rejection::Implausible);
            }
            let line =
                tessellate::arc_line((x, y), *radius, *start_angle, *end_angle, reprojector)?;
            if line.len() < 2 {
                return Err(Rejection::Implausible);
            }
            Value::LineString(line)
        }

        EntityGeometry::Point { location } => {
            let position = project_checked(location, extrusion, reprojector)?;
            Value::Point(position.to_vec())
        }

        EntityGeometry::Text {
            location,
            alignment,
            ..
        } => {
            let anchor = alignment.as_ref().unwrap_or(location);
            let position = project_checked(anchor, extrusion, reprojector)?;
            Value::Point(position.to_vec())
        }

        EntityGeometry::MText { location, .. } => {
            let position = project_checked(location, extrusion, reprojector)?;
            Value::Point(position.to_vec())
        }

        EntityGeometry::Insert { location, .. } => {
            let position = project_checked(location, extrusion, reprojector)?;
            Value::Point(position.to_vec())
        }

        EntityGeometry::Dimension { p1, p2 } => {
            let a = project_checked(p1, extrusion, reprojector)?;
            let b = project_checked(p2, extrusion, reprojector)?;
            Value::LineString(vec![a.to_vec(), b.to_vec()])
        }

        EntityGeometry::Other { .. } => return Err(Rejection::Unsupported),
    };
    Ok(value)
}

/// Normalize, range-check and reproject one defining point.
///
/// A single implausible defining point rejects the whole entity; the
/// batch counts it once as filtered.
fn project_checked(
    local: &Point3<f64>,
    extrusion: &Vector3<f64>,
    reprojector: &Reprojector,
) -> Result<[f64; 2], Rejection> {
    let (x, y) = ocs::to_wcs(*local, *extrusion);
    if !plausibility::plausible(x, y) {
        return Err(Rejection::Implausible);
    }
    Ok(reprojector.project(x, y)?)
}

/// Assemble the feature: geometry plus the property contract.
///
/// `layer` and `type` are always present; `color` only for explicit ACI
/// colors; `text`/`block` for the kinds that carry them. Insertion order
/// is the serialization order.
fn feature(entity: &Entity, value: Value) -> Feature {
    let mut properties = JsonObject::new();
    let layer = if entity.layer.is_empty() {
        "0"
    } else {
        entity.layer.as_str()
    };
    properties.insert("layer".to_string(), JsonValue::from(layer));
    properties.insert(
        "type".to_string(),
        JsonValue::from(entity.geometry.kind_name()),
    );
    if let Some(color) = entity.color {
        properties.insert("color".to_string(), JsonValue::from(color));
    }
    match &entity.geometry {
        EntityGeometry::Text { value: text, .. } | EntityGeometry::MText { value: text, .. } => {
            properties.insert("text".to_string(), JsonValue::from(text.as_str()));
        }
        EntityGeometry::Insert { block, .. } if !block.is_empty() => {
            properties.insert("block".to_string(), JsonValue::from(block.as_str()));
        }
        _ => {}
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reprojector() -> Reprojector {
        Reprojector::new(32638).unwrap()
    }

    fn in_range(position: &[f64]) -> bool {
        position[0] >= -180.0 && position[0] <= 180.0 && position[1] >= -90.0 && position[1] <= 90.0
    }

    fn expect_feature(outcome: Outcome) -> Feature {
        match outcome {
            Outcome::Feature(feature) => feature,
            Outcome::Filtered => panic!("entity was filtered"),
            Outcome::Skipped(kind) => panic!("entity was skipped as {kind}"),
        }
    }

    fn line_coords(feature: &Feature) -> Vec<Vec<f64>> {
        match &feature.geometry.as_ref().unwrap().value {
            Value::LineString(coords) => coords.clone(),
            other => panic!("expected LineString, got {other:?}"),
        }
    }

    fn polygon_ring(feature: &Feature) -> Vec<Vec<f64>> {
        match &feature.geometry.as_ref().unwrap().value {
            Value::Polygon(rings) => {
                assert_eq!(rings.len(), 1, "contract allows exactly one ring");
                rings[0].clone()
            }
            other => panic!("expected Polygon, got {other:?}"),
        }
    }

    #[test]
    fn test_line_in_range_produces_two_point_linestring() {
        let entity = Entity::new(EntityGeometry::Line {
            start: Point3::new(300000.0, 3600000.0, 0.0),
            end: Point3::new(300100.0, 3600100.0, 0.0),
        });
        let feature = expect_feature(interpret(&entity, &reprojector()));
        let coords = line_coords(&feature);
        assert_eq!(coords.len(), 2);
        assert!(coords.iter().all(|p| in_range(p)));
    }

    #[test]
    fn test_line_with_one_endpoint_out_of_range_is_filtered() {
        let entity = Entity::new(EntityGeometry::Line {
            start: Point3::new(300000.0, 3600000.0, 0.0),
            end: Point3::new(10.0, 10.0, 0.0),
        });
        assert!(matches!(
            interpret(&entity, &reprojector()),
            Outcome::Filtered
        ));
    }

    #[test]
    fn test_point_outside_bounds_is_filtered() {
        let entity = Entity::new(EntityGeometry::Point {
            location: Point3::new(10.0, 10.0, 0.0),
        });
        assert!(matches!(
            interpret(&entity, &reprojector()),
            Outcome::Filtered
        ));
    }

    #[test]
    fn test_unrecognized_kind_is_skipped_under_its_name() {
        let entity = Entity::new(EntityGeometry::Other {
            kind: "HATCH".to_string(),
        });
        match interpret(&entity, &reprojector()) {
            Outcome::Skipped(kind) => assert_eq!(kind, "HATCH"),
            other => panic!("expected skip, got {other:?}"),
        }
    }

    #[test]
    fn test_open_polyline_keeps_vertex_count_without_closure() {
        let entity = Entity::new(EntityGeometry::Polyline {
            vertices: vec![
                Point3::new(300000.0, 3600000.0, 0.0),
                Point3::new(300050.0, 3600050.0, 0.0),
                Point3::new(300100.0, 3600000.0, 0.0),
            ],
            closed: false,
            lightweight: true,
        });
        let feature = expect_feature(interpret(&entity, &reprojector()));
        let coords = line_coords(&feature);
        assert_eq!(coords.len(), 3);
        assert_ne!(coords.first(), coords.last());
    }

    #[test]
    fn test_closed_polyline_ring_is_closed() {
        let entity = Entity::new(EntityGeometry::Polyline {
            vertices: vec![
                Point3::new(300000.0, 3600000.0, 0.0),
                Point3::new(300100.0, 3600000.0, 0.0),
                Point3::new(300100.0, 3600100.0, 0.0),
                Point3::new(300000.0, 3600100.0, 0.0),
            ],
            closed: true,
            lightweight: true,
        });
        let feature = expect_feature(interpret(&entity, &reprojector()));
        let ring = polygon_ring(&feature);
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_polyline_filters_vertices_individually() {
        // One stray vertex near the origin; the other four survive.
        let entity = Entity::new(EntityGeometry::Polyline {
            vertices: vec![
                Point3::new(300000.0, 3600000.0, 0.0),
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(300100.0, 3600000.0, 0.0),
                Point3::new(300100.0, 3600100.0, 0.0),
                Point3::new(300000.0, 3600100.0, 0.0),
            ],
            closed: true,
            lightweight: true,
        });
        let feature = expect_feature(interpret(&entity, &reprojector()));
        let ring = polygon_ring(&feature);
        assert_eq!(ring.len(), 5);
    }

    #[test]
    fn test_closed_polyline_with_two_survivors_is_filtered() {
        let entity = Entity::new(EntityGeometry::Polyline {
            vertices: vec![
                Point3::new(300000.0, 3600000.0, 0.0),
                Point3::new(300100.0, 3600000.0, 0.0),
                Point3::new(5.0, 5.0, 0.0),
            ],
            closed: true,
            lightweight: true,
        });
        assert!(matches!(
            interpret(&entity, &reprojector()),
            Outcome::Filtered
        ));
    }

    #[test]
    fn test_open_polyline_below_two_survivors_is_filtered() {
        let entity = Entity::new(EntityGeometry::Polyline {
            vertices: vec![
                Point3::new(300000.0, 3600000.0, 0.0),
                Point3::new(5.0, 5.0, 0.0),
            ],
            closed: false,
            lightweight: true,
        });
        assert!(matches!(
            interpret(&entity, &reprojector()),
            Outcome::Filtered
        ));
    }

    #[test]
    fn test_single_vertex_polyline_is_skipped_as_malformed() {
        let entity = Entity::new(EntityGeometry::Polyline {
            vertices: vec![Point3::new(300000.0, 3600000.0, 0.0)],
            closed: false,
            lightweight: true,
        });
        match interpret(&entity, &reprojector()) {
            Outcome::Skipped(kind) => assert_eq!(kind, "LWPOLYLINE"),
            other => panic!("expected skip, got {other:?}"),
        }
    }

    #[test]
    fn test_polyline_type_property_keeps_source_spelling() {
        let vertices = vec![
            Point3::new(300000.0, 3600000.0, 0.0),
            Point3::new(300100.0, 3600100.0, 0.0),
        ];
        let lightweight = Entity::new(EntityGeometry::Polyline {
            vertices: vertices.clone(),
            closed: false,
            lightweight: true,
        });
        let feature = expect_feature(interpret(&lightweight, &reprojector()));
        assert_eq!(feature.properties.unwrap().get("type").unwrap(), "LWPOLYLINE");

        let classic = Entity::new(EntityGeometry::Polyline {
            vertices,
            closed: false,
            lightweight: false,
        });
        let feature = expect_feature(interpret(&classic, &reprojector()));
        assert_eq!(feature.properties.unwrap().get("type").unwrap(), "POLYLINE");
    }

    #[test]
    fn test_circle_produces_closed_65_point_ring() {
        let entity = Entity::new(EntityGeometry::Circle {
            center: Point3::new(400000.0, 3700000.0, 0.0),
            radius: 10.0,
        });
        let feature = expect_feature(interpret(&entity, &reprojector()));
        let ring = polygon_ring(&feature);
        assert_eq!(ring.len(), 65);
        assert_eq!(ring[0], ring[64]);
    }

    #[test]
    fn test_circle_with_non_finite_radius_is_skipped() {
        let entity = Entity::new(EntityGeometry::Circle {
            center: Point3::new(400000.0, 3700000.0, 0.0),
            radius: f64::NAN,
        });
        match interpret(&entity, &reprojector()) {
            Outcome::Skipped(kind) => assert_eq!(kind, "CIRCLE"),
            other => panic!("expected skip, got {other:?}"),
        }
    }

    #[test]
    fn test_arc_is_validated_by_center_only() {
        // Radius pushes samples outside the box; only the center is
        // range-checked, so the arc still converts.
        let entity = Entity::new(EntityGeometry::Arc {
            center: Point3::new(160000.0, 3200000.0, 0.0),
            radius: 50000.0,
            start_angle: 0.0,
            end_angle: 90.0,
        });
        let feature = expect_feature(interpret(&entity, &reprojector()));
        assert_eq!(line_coords(&feature).len(), 33);
    }

    #[test]
    fn test_text_anchors_at_alignment_point_when_present() {
        // Insertion point is implausible; the alignment point is not.
        // The feature converting proves the anchor choice.
        let entity = Entity::new(EntityGeometry::Text {
            location: Point3::new(10.0, 10.0, 0.0),
            alignment: Some(Point3::new(400000.0, 3700000.0, 0.0)),
            value: "station 12".to_string(),
        });
        let feature = expect_feature(interpret(&entity, &reprojector()));
        let properties = feature.properties.unwrap();
        assert_eq!(properties.get("text").unwrap(), "station 12");
    }

    #[test]
    fn test_text_without_alignment_uses_location() {
        let entity = Entity::new(EntityGeometry::Text {
            location: Point3::new(400000.0, 3700000.0, 0.0),
            alignment: None,
            value: String::new(),
        });
        let feature = expect_feature(interpret(&entity, &reprojector()));
        let properties = feature.properties.unwrap();
        assert_eq!(properties.get("text").unwrap(), "");
    }

    #[test]
    fn test_insert_carries_block_property_when_named() {
        let entity = Entity::new(EntityGeometry::Insert {
            location: Point3::new(400000.0, 3700000.0, 0.0),
            block: "VALVE".to_string(),
        });
        let feature = expect_feature(interpret(&entity, &reprojector()));
        let properties = feature.properties.unwrap();
        assert_eq!(properties.get("block").unwrap(), "VALVE");
        assert_eq!(properties.get("type").unwrap(), "INSERT");
    }

    #[test]
    fn test_insert_with_empty_name_has_no_block_property() {
        let entity = Entity::new(EntityGeometry::Insert {
            location: Point3::new(400000.0, 3700000.0, 0.0),
            block: String::new(),
        });
        let feature = expect_feature(interpret(&entity, &reprojector()));
        assert!(!feature.properties.unwrap().contains_key("block"));
    }

    #[test]
    fn test_dimension_with_out_of_range_point_is_filtered() {
        let entity = Entity::new(EntityGeometry::Dimension {
            p1: Point3::new(400000.0, 3700000.0, 0.0),
            p2: Point3::new(0.0, 0.0, 0.0),
        });
        assert!(matches!(
            interpret(&entity, &reprojector()),
            Outcome::Filtered
        ));
    }

    #[test]
    fn test_dimension_converts_to_two_point_linestring() {
        let entity = Entity::new(EntityGeometry::Dimension {
            p1: Point3::new(400000.0, 3700000.0, 0.0),
            p2: Point3::new(400050.0, 3700050.0, 0.0),
        });
        let feature = expect_feature(interpret(&entity, &reprojector()));
        assert_eq!(line_coords(&feature).len(), 2);
    }

    #[test]
    fn test_property_order_is_insertion_order() {
        let mut entity = Entity::new(EntityGeometry::Text {
            location: Point3::new(400000.0, 3700000.0, 0.0),
            alignment: None,
            value: "label".to_string(),
        });
        entity.layer = "notes".to_string();
        entity.color = Some(1);
        let feature = expect_feature(interpret(&entity, &reprojector()));
        let keys: Vec<String> = feature.properties.unwrap().keys().cloned().collect();
        assert_eq!(keys, ["layer", "type", "color", "text"]);
    }

    #[test]
    fn test_empty_layer_defaults_to_zero() {
        let mut entity = Entity::new(EntityGeometry::Point {
            location: Point3::new(400000.0, 3700000.0, 0.0),
        });
        entity.layer = String::new();
        let feature = expect_feature(interpret(&entity, &reprojector()));
        assert_eq!(feature.properties.unwrap().get("layer").unwrap(), "0");
    }

    #[test]
    fn test_color_is_omitted_by_default() {
        let entity = Entity::new(EntityGeometry::Point {
            location: Point3::new(400000.0, 3700000.0, 0.0),
        });
        let feature = expect_feature(interpret(&entity, &reprojector()));
        assert!(!feature.properties.unwrap().contains_key("color"));
    }
}
