// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tessellation of curved primitives
//!
//! Circles and arcs are approximated as point sequences sampled at fixed
//! angular resolution, in the world frame around the already-normalized
//! center, then reprojected point by point. Positions come back in
//! GeoJSON nesting (`Vec<f64>` per position) ready for geometry
//! assembly.

use std::f64::consts::TAU;

use crate::error::Result;
use crate::reproject::Reprojector;

/// Samples per full circle; the ring carries one extra closing point
pub const CIRCLE_SEGMENTS: usize = 64;

/// Samples per arc sweep
pub const ARC_SEGMENTS: usize = 32;

/// Sample a circle as a closed ring of `CIRCLE_SEGMENTS + 1` positions.
///
/// The closing position is a copy of the first, so ring closure survives
/// rounding exactly.
pub fn circle_ring(
    center: (f64, f64),
    radius: f64,
    reprojector: &Reprojector,
) -> Result<Vec<Vec<f64>>> {
    let mut ring = Vec::with_capacity(CIRCLE_SEGMENTS + 1);
    for i in 0..CIRCLE_SEGMENTS {
        let angle = TAU * i as f64 / CIRCLE_SEGMENTS as f64;
        let x = center.0 + radius * angle.cos();
        let y = center.1 + radius * angle.sin();
        ring.push(reprojector.project(x, y)?.to_vec());
    }
    let first = ring[0].clone();
    ring.push(first);
    Ok(ring)
}

/// Sample an arc as `ARC_SEGMENTS + 1` positions along its sweep.
///
/// Angles are degrees. An end angle at or below the start angle marks an
/// arc crossing 0 degrees; the sweep always runs in the increasing-angle
/// direction, so wrapping adds a full turn and the effective sweep stays
/// within (0, 360] degrees.
pub fn arc_line(
    center: (f64, f64),
    radius: f64,
    start_deg: f64,
    end_deg: f64,
    reprojector: &Reprojector,
) -> Result<Vec<Vec<f64>>> {
    let start = start_deg.to_radians();
    let mut end = end_deg.to_radians();
    if end <= start {
        end += TAU;
    }
    let sweep = end - start;

    let mut line = Vec::with_capacity(ARC_SEGMENTS + 1);
    for i in 0..=ARC_SEGMENTS {
        let angle = start + sweep * i as f64 / ARC_SEGMENTS as f64;
        let x = center.0 + radius * angle.cos();
        let y = center.1 + radius * angle.sin();
        line.push(reprojector.project(x, y)?.to_vec());
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const CENTER: (f64, f64) = (400000.0, 3700000.0);

    fn reprojector() -> Reprojector {
        Reprojector::new(32638).unwrap()
    }

    #[test]
    fn test_circle_ring_has_65_points_and_closes() {
        let ring = circle_ring(CENTER, 10.0, &reprojector()).unwrap();
        assert_eq!(ring.len(), CIRCLE_SEGMENTS + 1);
        assert_eq!(ring[0], ring[CIRCLE_SEGMENTS]);
        for position in &ring {
            assert!(position[0] > -180.0 && position[0] < 180.0);
            assert!(position[1] > -90.0 && position[1] < 90.0);
        }
    }

    #[test]
    fn test_circle_ring_point_count_is_radius_independent() {
        let reprojector = reprojector();
        for radius in [0.5, 10.0, 2500.0] {
            let ring = circle_ring(CENTER, radius, &reprojector).unwrap();
            assert_eq!(ring.len(), 65);
            assert_eq!(ring[0], ring[64]);
        }
    }

    #[test]
    fn test_arc_line_samples_33_points() {
        let line = arc_line(CENTER, 100.0, 0.0, 90.0, &reprojector()).unwrap();
        assert_eq!(line.len(), ARC_SEGMENTS + 1);
    }

    #[test]
    fn test_arc_endpoints_match_projected_angles() {
        let reprojector = reprojector();
        let radius = 100.0;
        let line = arc_line(CENTER, radius, 0.0, 90.0, &reprojector).unwrap();

        let start = reprojector.project(CENTER.0 + radius, CENTER.1).unwrap();
        let end = reprojector.project(CENTER.0, CENTER.1 + radius).unwrap();
        assert_eq!(line[0], start.to_vec());
        assert_eq!(line[ARC_SEGMENTS], end.to_vec());
    }

    #[test]
    fn test_arc_crossing_zero_wraps_forward() {
        // 350 -> 10 degrees is a 20 degree sweep through 0, not a 340
        // degree sweep backwards.
        let reprojector = reprojector();
        let radius = 100.0;
        let line = arc_line(CENTER, radius, 350.0, 10.0, &reprojector).unwrap();
        assert_eq!(line.len(), 33);

        let start_angle = 350.0_f64.to_radians();
        let expected_first = reprojector
            .project(
                CENTER.0 + radius * start_angle.cos(),
                CENTER.1 + radius * start_angle.sin(),
            )
            .unwrap();
        assert_eq!(line[0], expected_first.to_vec());

        // The wrapped end lands at the 10 degree direction.
        let end_angle = 10.0_f64.to_radians();
        let expected_last = reprojector
            .project(
                CENTER.0 + radius * end_angle.cos(),
                CENTER.1 + radius * end_angle.sin(),
            )
            .unwrap();
        assert_relative_eq!(line[32][0], expected_last[0], epsilon = 1e-6);
        assert_relative_eq!(line[32][1], expected_last[1], epsilon = 1e-6);
    }

    #[test]
    fn test_equal_angles_sweep_a_full_turn() {
        let line = arc_line(CENTER, 100.0, 45.0, 45.0, &reprojector()).unwrap();
        assert_eq!(line.len(), 33);
        // Full turn: last sample returns to the start direction.
        assert_relative_eq!(line[32][0], line[0][0], epsilon = 1e-6);
        assert_relative_eq!(line[32][1], line[0][1], epsilon = 1e-6);
    }
}
