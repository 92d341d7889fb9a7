use thiserror::Error;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a conversion run
///
/// Only fatal conditions live here. Per-entity conditions (unsupported
/// kinds, malformed fields, out-of-range coordinates) are reduced to the
/// counters on [`ConversionResult`](crate::ConversionResult) and never
/// escape the batch loop.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read drawing: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse DXF document: {0}")]
    Dxf(#[from] dxf::DxfError),

    #[error("Unsupported reference system: EPSG:{0}")]
    UnsupportedCrs(u32),

    #[error("Projection failed: {0}")]
    Projection(#[from] proj4rs::errors::Error),

    #[error("Failed to serialize GeoJSON: {0}")]
    Serialize(#[from] serde_json::Error),
}
