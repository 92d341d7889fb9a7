// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch conversion
//!
//! Composition root of the core: drives [`crate::interpret`] over a full
//! entity sequence in source order and folds the per-entity outcomes
//! into one [`ConversionResult`]. Only opening the drawing or building
//! the reprojector can fail; individual entities never abort the batch.

use std::collections::BTreeMap;
use std::path::Path;

use geojson::{Feature, FeatureCollection};

use crate::document;
use crate::entity::Entity;
use crate::error::Result;
use crate::interpret::{self, Outcome};
use crate::reproject::Reprojector;

/// Outcome of one conversion run
///
/// Feature order equals input entity order. Skip counts use a BTreeMap
/// so summaries are deterministic.
#[derive(Debug, Default)]
pub struct ConversionResult {
    /// Emitted features, in input entity order
    pub features: Vec<Feature>,
    /// Unsupported or malformed entities, counted per kind name
    pub skipped: BTreeMap<String, usize>,
    /// Entities dropped for out-of-range coordinates
    pub filtered: usize,
}

impl ConversionResult {
    /// Assemble the output FeatureCollection, consuming the features.
    pub fn into_feature_collection(self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.features,
            foreign_members: None,
        }
    }

    /// Serialize the features as a GeoJSON FeatureCollection string.
    pub fn to_geojson(&self) -> Result<String> {
        let collection = FeatureCollection {
            bbox: None,
            features: self.features.clone(),
            foreign_members: None,
        };
        Ok(serde_json::to_string(&collection)?)
    }
}

/// Convert a DXF file into geographic features.
///
/// The sole entry point for file-based conversion: builds the transform
/// for the source EPSG code, loads the drawing and interprets every
/// model-space entity. Deterministic for a fixed input file and code.
pub fn convert(path: &Path, epsg: u32) -> Result<ConversionResult> {
    let reprojector = Reprojector::new(epsg)?;
    let entities = document::load_entities(path)?;
    let result = convert_entities(&entities, &reprojector);
    tracing::info!(
        path = %path.display(),
        epsg,
        entities = entities.len(),
        features = result.features.len(),
        filtered = result.filtered,
        skipped = result.skipped.values().sum::<usize>(),
        "Conversion complete"
    );
    Ok(result)
}

/// Interpret an already-loaded entity sequence.
pub fn convert_entities(entities: &[Entity], reprojector: &Reprojector) -> ConversionResult {
    let mut result = ConversionResult::default();
    for entity in entities {
        match interpret::interpret(entity, reprojector) {
            Outcome::Feature(feature) => result.features.push(feature),
            Outcome::Filtered => result.filtered += 1,
            Outcome::Skipped(kind) => *result.skipped.entry(kind).or_insert(0) += 1,
        }
    }
    result
}
