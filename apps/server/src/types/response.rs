// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use serde::Serialize;
use std::collections::BTreeMap;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
}

/// One stored overlay.
#[derive(Debug, Clone, Serialize)]
pub struct OverlayInfo {
    /// Overlay name (slug of the uploaded filename).
    pub name: String,
    /// URL path the overlay is served under.
    pub file: String,
    /// File size in KB, rounded to 0.1.
    pub size_kb: f64,
}

/// Upload response: where the overlay landed and what the conversion did.
#[derive(Debug, Serialize)]
pub struct UploadSummary {
    /// Overlay name the file was stored as.
    pub name: String,
    /// URL path the overlay is served under.
    pub file: String,
    /// Number of features in the overlay.
    pub features: usize,
    /// Geographic bounds `[min_lng, min_lat, max_lng, max_lat]`.
    pub bounds: Option<[f64; 4]>,
    /// Bounds midpoint `[lng, lat]`, where the map should fly to.
    pub center: Option<[f64; 2]>,
    /// Unsupported or malformed entities, counted per kind.
    pub skipped: BTreeMap<String, usize>,
    /// Entities dropped for out-of-range coordinates.
    pub filtered: usize,
}

/// Delete confirmation.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: String,
}
