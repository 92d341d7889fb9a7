// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geographic extent of emitted features
//!
//! Small bbox accumulator used for conversion summaries: the CLI prints
//! it, the upload response carries it so the map can fly to the new
//! overlay.

use geojson::{Feature, Value};

/// Longitude/latitude bounding box accumulator
#[derive(Debug, Clone)]
pub struct Extent {
    min_lng: f64,
    min_lat: f64,
    max_lng: f64,
    max_lat: f64,
    count: usize,
}

impl Extent {
    /// Empty extent; invalid until at least one position is added
    pub fn new() -> Self {
        Self {
            min_lng: f64::MAX,
            min_lat: f64::MAX,
            max_lng: f64::MIN,
            max_lat: f64::MIN,
            count: 0,
        }
    }

    /// Extent over every coordinate of a feature sequence
    pub fn from_features(features: &[Feature]) -> Self {
        let mut extent = Self::new();
        for feature in features {
            let Some(geometry) = &feature.geometry else {
                continue;
            };
            match &geometry.value {
                Value::Point(position) => extent.expand(position[0], position[1]),
                Value::LineString(positions) => {
                    for position in positions {
                        extent.expand(position[0], position[1]);
                    }
                }
                Value::Polygon(rings) => {
                    for ring in rings {
                        for position in ring {
                            extent.expand(position[0], position[1]);
                        }
                    }
                }
                _ => {}
            }
        }
        extent
    }

    /// Include a position.
    #[inline]
    pub fn expand(&mut self, lng: f64, lat: f64) {
        self.min_lng = self.min_lng.min(lng);
        self.min_lat = self.min_lat.min(lat);
        self.max_lng = self.max_lng.max(lng);
        self.max_lat = self.max_lat.max(lat);
        self.count += 1;
    }

    /// Whether any position has been added
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.count > 0
    }

    /// `[min_lng, min_lat, max_lng, max_lat]`, or None while empty
    pub fn bbox(&self) -> Option<[f64; 4]> {
        self.is_valid()
            .then(|| [self.min_lng, self.min_lat, self.max_lng, self.max_lat])
    }

    /// Bounding-box midpoint as `[lng, lat]`, or None while empty
    pub fn center(&self) -> Option<[f64; 2]> {
        self.is_valid().then(|| {
            [
                (self.min_lng + self.max_lng) / 2.0,
                (self.min_lat + self.max_lat) / 2.0,
            ]
        })
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::new()
    }
}
