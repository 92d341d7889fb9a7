// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DXF document boundary
//!
//! The only module that touches the [dxf](https://docs.rs/dxf) crate's
//! entity types. Parsed entities are mapped once into the crate's own
//! [`Entity`] model; from there the pipeline never probes parser fields
//! again.
//!
//! The mapping also irons out a quirk of the generated parser API: the
//! DXF 210 group (the extrusion normal) is named `normal` on some
//! entities and `extrusion_direction` on others, following the wording
//! of the format reference. The model carries a single extrusion vector.

use std::path::Path;

use dxf::entities::EntityType;
use dxf::Drawing;
use nalgebra::{Point3, Vector3};

use crate::entity::{Entity, EntityGeometry};
use crate::error::Result;

/// Load a drawing and map every model-space entity into [`Entity`].
///
/// Fails only when the file cannot be read or parsed as DXF; individual
/// entities never fail here (unrecognized kinds map to
/// [`EntityGeometry::Other`]).
pub fn load_entities(path: &Path) -> Result<Vec<Entity>> {
    let drawing = Drawing::load_file(path)?;
    let entities = entities_from_drawing(&drawing);
    tracing::debug!(
        path = %path.display(),
        entities = entities.len(),
        "Loaded DXF document"
    );
    Ok(entities)
}

/// Map all entities of an in-memory drawing, preserving iteration order.
pub fn entities_from_drawing(drawing: &Drawing) -> Vec<Entity> {
    drawing.entities().map(convert_entity).collect()
}

fn convert_entity(source: &dxf::entities::Entity) -> Entity {
    let color: Option<i16> = source.common.color.index().map(Into::into);
    let (geometry, extrusion) = match &source.specific {
        EntityType::Line(line) => (
            EntityGeometry::Line {
                start: to_point(&line.p1),
                end: to_point(&line.p2),
            },
            to_vector(&line.extrusion_direction),
        ),
        EntityType::LwPolyline(polyline) => (
            EntityGeometry::Polyline {
                vertices: polyline
                    .vertices
                    .iter()
                    .map(|v| Point3::new(v.x, v.y, 0.0))
                    .collect(),
                closed: polyline.is_closed(),
                lightweight: true,
            },
            to_vector(&polyline.extrusion_direction),
        ),
        EntityType::Polyline(polyline) => (
            EntityGeometry::Polyline {
                vertices: polyline.vertices().map(|v| to_point(&v.location)).collect(),
                closed: polyline.is_closed(),
                lightweight: false,
            },
            to_vector(&polyline.normal),
        ),
        EntityType::Circle(circle) => (
            EntityGeometry::Circle {
                center: to_point(&circle.center),
                radius: circle.radius,
            },
            to_vector(&circle.normal),
        ),
        EntityType::Arc(arc) => (
            EntityGeometry::Arc {
                center: to_point(&arc.center),
                radius: arc.radius,
                start_angle: arc.start_angle,
                end_angle: arc.end_angle,
            },
            to_vector(&arc.normal),
        ),
        EntityType::ModelPoint(point) => (
            EntityGeometry::Point {
                location: to_point(&point.location),
            },
            to_vector(&point.extrusion_direction),
        ),
        EntityType::Text(text) => {
            let aligned = !matches!(
                text.horizontal_text_justification,
                dxf::enums::HorizontalTextJustification::Left
            ) || !matches!(
                text.vertical_text_justification,
                dxf::enums::VerticalTextJustification::Baseline
            );
            (
                EntityGeometry::Text {
                    location: to_point(&text.location),
                    alignment: aligned.then(|| to_point(&text.second_alignment_point)),
                    value: text.value.clone(),
                },
                to_vector(&text.normal),
            )
        }
        EntityType::MText(mtext) => {
            // Long values arrive split into 250-character chunks; the
            // trailing remainder sits in `text`.
            let mut value = String::new();
            for chunk in &mtext.extended_text {
                value.push_str(chunk);
            }
            value.push_str(&mtext.text);
            (
                EntityGeometry::MText {
                    location: to_point(&mtext.insertion_point),
                    value,
                },
                to_vector(&mtext.extrusion_direction),
            )
        }
        EntityType::Insert(insert) => (
            EntityGeometry::Insert {
                location: to_point(&insert.location),
                block: insert.name.clone(),
            },
            to_vector(&insert.extrusion_direction),
        ),
        EntityType::RotatedDimension(dimension) => dimension_geometry(
            &dimension.dimension_base,
            &dimension.definition_point_2,
        ),
        EntityType::RadialDimension(dimension) => dimension_geometry(
            &dimension.dimension_base,
            &dimension.definition_point_2,
        ),
        EntityType::DiameterDimension(dimension) => dimension_geometry(
            &dimension.dimension_base,
            &dimension.definition_point_2,
        ),
        EntityType::AngularThreePointDimension(dimension) => dimension_geometry(
            &dimension.dimension_base,
            &dimension.definition_point_2,
        ),
        EntityType::OrdinateDimension(dimension) => dimension_geometry(
            &dimension.dimension_base,
            &dimension.definition_point_2,
        ),
        other => (
            EntityGeometry::Other {
                kind: unsupported_kind(other).to_string(),
            },
            Vector3::z(),
        ),
    };

    Entity {
        layer: source.common.layer.clone(),
        color,
        extrusion,
        geometry,
    }
}

/// Dimensions reduce to their first two definition points; the first
/// always lives on the shared dimension base.
fn dimension_geometry(
    base: &dxf::entities::DimensionBase,
    second: &dxf::Point,
) -> (EntityGeometry, Vector3<f64>) {
    (
        EntityGeometry::Dimension {
            p1: to_point(&base.definition_point_1),
            p2: to_point(second),
        },
        to_vector(&base.normal),
    )
}

/// DXF type name for kinds the interpreter does not handle
///
/// Covers every variant the dxf crate can yield, so skip summaries
/// report real type names. The wildcard arm only matches the kinds the
/// main dispatch consumes before this function is reached.
fn unsupported_kind(specific: &EntityType) -> &'static str {
    match specific {
        EntityType::Face3D(_) => "3DFACE",
        EntityType::Solid3D(_) => "3DSOLID",
        EntityType::ProxyEntity(_) => "ACAD_PROXY_ENTITY",
        EntityType::ArcAlignedText(_) => "ARCALIGNEDTEXT",
        EntityType::AttributeDefinition(_) => "ATTDEF",
        EntityType::Attribute(_) => "ATTRIB",
        EntityType::Body(_) => "BODY",
        EntityType::DgnUnderlay(_) => "DGNUNDERLAY",
        EntityType::DwfUnderlay(_) => "DWFUNDERLAY",
        EntityType::Ellipse(_) => "ELLIPSE",
        EntityType::Helix(_) => "HELIX",
        EntityType::Image(_) => "IMAGE",
        EntityType::Leader(_) => "LEADER",
        EntityType::Light(_) => "LIGHT",
        EntityType::MLine(_) => "MLINE",
        EntityType::OleFrame(_) => "OLEFRAME",
        EntityType::Ole2Frame(_) => "OLE2FRAME",
        EntityType::PdfUnderlay(_) => "PDFUNDERLAY",
        EntityType::Ray(_) => "RAY",
        EntityType::Region(_) => "REGION",
        EntityType::RText(_) => "RTEXT",
        EntityType::Section(_) => "SECTION",
        EntityType::Seqend(_) => "SEQEND",
        EntityType::Shape(_) => "SHAPE",
        EntityType::Solid(_) => "SOLID",
        EntityType::Spline(_) => "SPLINE",
        EntityType::Tolerance(_) => "TOLERANCE",
        EntityType::Trace(_) => "TRACE",
        EntityType::Vertex(_) => "VERTEX",
        EntityType::Wipeout(_) => "WIPEOUT",
        EntityType::XLine(_) => "XLINE",
        _ => "UNSUPPORTED",
    }
}

#[inline]
fn to_point(point: &dxf::Point) -> Point3<f64> {
    Point3::new(point.x, point.y, point.z)
}

#[inline]
fn to_vector(vector: &dxf::Vector) -> Vector3<f64> {
    Vector3::new(vector.x, vector.y, vector.z)
}
