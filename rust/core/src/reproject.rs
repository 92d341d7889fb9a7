// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reprojection into WGS84 longitude/latitude
//!
//! Wraps the [proj4rs](https://docs.rs/proj4rs) transform pipeline behind
//! a small registry of supported EPSG codes. The transform pair is built
//! once per conversion run; unknown codes fail there, before any entity
//! is touched. Output is always `[longitude, latitude]` in that order,
//! rounded to 7 decimal digits (about 1 cm), the only coordinate form
//! that leaves the core.

use proj4rs::proj::Proj;
use proj4rs::transform::transform;

use crate::error::{Error, Result};

/// Geographic WGS84, the fixed target of every conversion
const WGS84: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Decimal digits kept on output coordinates
const OUTPUT_DECIMALS: f64 = 1e7;

/// Source-CRS to WGS84 transformer
pub struct Reprojector {
    source: Proj,
    target: Proj,
    /// Geographic sources feed proj in radians, projected ones in meters
    source_is_geographic: bool,
}

impl Reprojector {
    /// Build the transform pair for a source EPSG code.
    ///
    /// Supported codes: 4326 (WGS84 geographic), 32601-32660 (WGS84 / UTM
    /// north zones) and 32701-32760 (south zones). Anything else returns
    /// [`Error::UnsupportedCrs`].
    pub fn new(epsg: u32) -> Result<Self> {
        let definition = proj_definition(epsg).ok_or(Error::UnsupportedCrs(epsg))?;
        let source = Proj::from_proj_string(&definition)?;
        let target = Proj::from_proj_string(WGS84)?;
        Ok(Self {
            source,
            target,
            source_is_geographic: epsg == 4326,
        })
    }

    /// Project a world-frame coordinate to rounded `[lng, lat]` degrees.
    pub fn project(&self, x: f64, y: f64) -> Result<[f64; 2]> {
        let mut point = if self.source_is_geographic {
            (x.to_radians(), y.to_radians(), 0.0)
        } else {
            (x, y, 0.0)
        };
        transform(&self.source, &self.target, &mut point)?;
        Ok([round7(point.0.to_degrees()), round7(point.1.to_degrees())])
    }
}

/// Proj pipeline string for a supported EPSG code
fn proj_definition(epsg: u32) -> Option<String> {
    match epsg {
        4326 => Some(WGS84.to_string()),
        32601..=32660 => Some(format!(
            "+proj=utm +zone={} +datum=WGS84 +units=m +no_defs",
            epsg - 32600
        )),
        32701..=32760 => Some(format!(
            "+proj=utm +zone={} +south +datum=WGS84 +units=m +no_defs",
            epsg - 32700
        )),
        _ => None,
    }
}

#[inline]
fn round7(value: f64) -> f64 {
    (value * OUTPUT_DECIMALS).round() / OUTPUT_DECIMALS
}
