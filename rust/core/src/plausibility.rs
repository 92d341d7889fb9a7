// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plausibility bounds for projected coordinates
//!
//! Drawings routinely mix survey geometry with leftover paper-space or
//! local-origin construction lines. After OCS normalization, every
//! defining point is checked against a coarse easting/northing box before
//! reprojection; anything outside is dropped and counted as filtered
//! rather than reported as an error.
//!
//! The box is tuned for the UTM zones the overlays come from. It is a
//! magnitude filter, not a geofence: values near zero (local origins) and
//! paper-space layouts fall far outside it.

/// Exclusive easting bounds in meters
pub const MIN_EASTING: f64 = 150_000.0;
pub const MAX_EASTING: f64 = 850_000.0;

/// Exclusive northing bounds in meters
pub const MIN_NORTHING: f64 = 3_100_000.0;
pub const MAX_NORTHING: f64 = 4_300_000.0;

/// Whether a world-frame coordinate looks like a real projected position.
///
/// Open intervals on purpose: exact boundary values are rejected, and the
/// comparisons reject NaN without a separate check.
#[inline]
pub fn plausible(x: f64, y: f64) -> bool {
    MIN_EASTING < x && x < MAX_EASTING && MIN_NORTHING < y && y < MAX_NORTHING
}
