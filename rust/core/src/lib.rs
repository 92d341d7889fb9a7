// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # dxf2geo Core
//!
//! Converts DXF drawing entities into GeoJSON features, reprojecting
//! projected (UTM) drawing coordinates into WGS84 longitude/latitude and
//! filtering out geometry whose coordinates are not plausible real-world
//! positions (leftover paper-space or local-origin construction lines).
//!
//! ## Pipeline
//!
//! - **Document boundary** ([`document`]): maps parsed DXF entities into
//!   the crate's closed [`Entity`] model
//! - **OCS normalization** ([`ocs`]): tilted object coordinate systems
//!   into the drawing's world frame
//! - **Plausibility filter** ([`plausibility`]): coarse easting/northing
//!   box separating survey geometry from local-origin leftovers
//! - **Reprojection** ([`reproject`]): source EPSG to WGS84, rounded to
//!   7 decimals
//! - **Tessellation** ([`tessellate`]): circles and arcs sampled at
//!   fixed angular resolution
//! - **Interpretation** ([`interpret`]): per-kind dispatch producing one
//!   outcome per entity
//! - **Batch conversion** ([`convert`]): folds outcomes into a
//!   [`ConversionResult`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dxf2geo_core::convert;
//! use std::path::Path;
//!
//! let result = convert(Path::new("site.dxf"), 32638)?;
//! println!(
//!     "{} features, {} filtered",
//!     result.features.len(),
//!     result.filtered
//! );
//! std::fs::write("site.geojson", result.to_geojson()?)?;
//! ```

pub mod convert;
pub mod document;
pub mod entity;
pub mod error;
pub mod extent;
pub mod interpret;
pub mod ocs;
pub mod plausibility;
pub mod reproject;
pub mod tessellate;

pub use convert::{convert, convert_entities, ConversionResult};
pub use entity::{Entity, EntityGeometry};
pub use error::{Error, Result};
pub use extent::Extent;
pub use interpret::{interpret, Outcome};
pub use reproject::Reprojector;
