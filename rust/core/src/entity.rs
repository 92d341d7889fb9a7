// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drawing entity model
//!
//! A closed, typed view of the DXF entities the converter understands.
//! The DXF document layer ([`crate::document`]) maps parsed entities into
//! this model once; everything downstream dispatches on the
//! [`EntityGeometry`] variants exhaustively instead of probing fields.
//!
//! Coordinates are kept in the entity's local frame (OCS for tilted
//! entities) together with the extrusion normal; normalization into the
//! drawing's world frame happens in [`crate::ocs`] at interpretation time.

use nalgebra::{Point3, Vector3};

/// One drawing entity: common metadata plus kind-specific geometry
#[derive(Debug, Clone)]
pub struct Entity {
    /// Layer name as stored in the drawing; empty collapses to "0"
    pub layer: String,
    /// Explicit ACI color index (1-255); by-layer/by-block carry None
    pub color: Option<i16>,
    /// Extrusion normal defining the entity's object coordinate system
    pub extrusion: Vector3<f64>,
    /// Kind-specific defining geometry
    pub geometry: EntityGeometry,
}

impl Entity {
    /// Entity with default metadata (layer "0", no color, untilted)
    pub fn new(geometry: EntityGeometry) -> Self {
        Self {
            layer: String::from("0"),
            color: None,
            extrusion: Vector3::z(),
            geometry,
        }
    }
}

/// Closed set of entity kinds the interpreter dispatches over
///
/// Angles are degrees (DXF convention), points are local-frame
/// coordinates. Both lightweight and classic polylines map to
/// [`EntityGeometry::Polyline`]; anything outside the recognized set is
/// carried as [`EntityGeometry::Other`] with its DXF type name so the
/// batch can count it.
#[derive(Debug, Clone)]
pub enum EntityGeometry {
    Line {
        start: Point3<f64>,
        end: Point3<f64>,
    },
    Polyline {
        vertices: Vec<Point3<f64>>,
        closed: bool,
        /// True for lightweight (LWPOLYLINE) sources, false for classic
        /// POLYLINE; the `type` property keeps the source spelling
        lightweight: bool,
    },
    Circle {
        center: Point3<f64>,
        radius: f64,
    },
    Arc {
        center: Point3<f64>,
        radius: f64,
        /// Start angle in degrees, counter-clockwise from the OCS X axis
        start_angle: f64,
        /// End angle in degrees; may be numerically below the start angle
        /// when the arc crosses 0
        end_angle: f64,
    },
    Point {
        location: Point3<f64>,
    },
    Text {
        location: Point3<f64>,
        /// Second alignment point, present when the text justification is
        /// non-default; anchors the feature instead of `location`
        alignment: Option<Point3<f64>>,
        value: String,
    },
    MText {
        location: Point3<f64>,
        value: String,
    },
    Insert {
        location: Point3<f64>,
        /// Referenced block name; empty when the reference is unresolvable
        block: String,
    },
    Dimension {
        p1: Point3<f64>,
        p2: Point3<f64>,
    },
    Other {
        /// DXF type name, e.g. "SPLINE"
        kind: String,
    },
}

impl EntityGeometry {
    /// Kind name used for the `type` property and skip counters
    pub fn kind_name(&self) -> &str {
        match self {
            EntityGeometry::Line { .. } => "LINE",
            EntityGeometry::Polyline { lightweight, .. } => {
                if *lightweight {
                    "LWPOLYLINE"
                } else {
                    "POLYLINE"
                }
            }
            EntityGeometry::Circle { .. } => "CIRCLE",
            EntityGeometry::Arc { .. } => "ARC",
            EntityGeometry::Point { .. } => "POINT",
            EntityGeometry::Text { .. } => "TEXT",
            EntityGeometry::MText { .. } => "MTEXT",
            EntityGeometry::Insert { .. } => "INSERT",
            EntityGeometry::Dimension { .. } => "DIMENSION",
            EntityGeometry::Other { kind } => kind,
        }
    }
}
