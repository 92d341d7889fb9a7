// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Object coordinate system normalization
//!
//! DXF stores planar entities in an object coordinate system (OCS) tilted
//! by the entity's extrusion normal. Reprojection is only valid in the
//! drawing's world frame, so every defining point passes through here
//! first. The frame is reconstructed with the DXF arbitrary axis
//! algorithm: the OCS X axis is WorldY x N when the normal is close to
//! the world Z axis, WorldZ x N otherwise, and the Y axis completes the
//! right-handed frame.
//!
//! For the default normal (0, 0, 1) the reconstruction degenerates to the
//! identity, so untilted entities pass through bit-exact.

use nalgebra::{Point3, Vector3};

/// Threshold from the DXF arbitrary axis algorithm: normals with both
/// X and Y components below 1/64 use WorldY to seed the frame.
const ARBITRARY_AXIS_LIMIT: f64 = 1.0 / 64.0;

/// Convert a local (OCS) point into world-frame x/y coordinates.
///
/// A degenerate extrusion normal (zero length or non-finite) leaves the
/// point untouched, matching the identity fallback for malformed
/// orientation data.
pub fn to_wcs(point: Point3<f64>, extrusion: Vector3<f64>) -> (f64, f64) {
    let length = extrusion.norm();
    if !length.is_finite() || length == 0.0 {
        return (point.x, point.y);
    }
    let normal = extrusion / length;

    let seed = if normal.x.abs() < ARBITRARY_AXIS_LIMIT && normal.y.abs() < ARBITRARY_AXIS_LIMIT {
        Vector3::y().cross(&normal)
    } else {
        Vector3::z().cross(&normal)
    };
    let axis_x = seed.normalize();
    let axis_y = normal.cross(&axis_x);

    let world = axis_x * point.x + axis_y * point.y + normal * point.z;
    (world.x, world.y)
}
