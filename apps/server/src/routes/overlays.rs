// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Overlay endpoints: upload, list and delete converted DXF overlays.

use crate::error::ApiError;
use crate::types::{DeleteResponse, OverlayInfo, UploadSummary};
use crate::AppState;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use dxf2geo_core::{convert, ConversionResult, Extent};
use std::io::Write;

/// One multipart upload: file bytes plus the optional EPSG field.
struct UploadRequest {
    filename: String,
    data: Vec<u8>,
    epsg: Option<u32>,
}

/// Pull the `file` and `epsg` fields out of a multipart request.
async fn extract_upload(multipart: &mut Multipart) -> Result<UploadRequest, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut epsg: Option<u32> = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or_default() {
            "file" => {
                let filename = field.file_name().unwrap_or("overlay.dxf").to_string();
                let bytes = field.bytes().await?;
                tracing::debug!(filename = %filename, size = bytes.len(), "Extracted upload");
                file = Some((filename, bytes.to_vec()));
            }
            "epsg" => {
                let text = field.text().await?;
                epsg = Some(
                    text.trim()
                        .parse()
                        .map_err(|_| ApiError::InvalidEpsg(text))?,
                );
            }
            other => {
                tracing::debug!(field_name = %other, "Ignoring multipart field");
            }
        }
    }

    let (filename, data) = file.ok_or(ApiError::MissingFile)?;
    Ok(UploadRequest {
        filename,
        data,
        epsg,
    })
}

/// GET /api/overlays - List stored overlays.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<OverlayInfo>>, ApiError> {
    Ok(Json(state.store.list()?))
}

/// POST /api/upload-dxf - Convert an uploaded DXF into a stored overlay.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadSummary>, ApiError> {
    let request = extract_upload(&mut multipart).await?;
    let epsg = request.epsg.unwrap_or(state.config.default_epsg);

    tracing::info!(
        filename = %request.filename,
        size = request.data.len(),
        epsg,
        "Converting uploaded DXF"
    );

    // Conversion is CPU-bound and the dxf crate reads from a path, so
    // stage the bytes to a temp file on the blocking pool.
    let data = request.data;
    let result: ConversionResult = tokio::task::spawn_blocking(move || {
        let mut staged = tempfile::Builder::new().suffix(".dxf").tempfile()?;
        staged.write_all(&data)?;
        staged.flush()?;
        convert(staged.path(), epsg).map_err(ApiError::from)
    })
    .await??;

    if result.features.is_empty() {
        return Err(ApiError::NoFeatures);
    }

    let extent = Extent::from_features(&result.features);
    let features = result.features.len();
    let skipped = result.skipped.clone();
    let filtered = result.filtered;

    let name = state
        .store
        .write(&request.filename, &result.to_geojson()?)?;

    Ok(Json(UploadSummary {
        file: state.store.public_path(&name),
        name,
        features,
        bounds: extent.bbox(),
        center: extent.center(),
        skipped,
        filtered,
    }))
}

/// DELETE /api/overlays/:name - Remove a stored overlay.
pub async fn remove(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if state.store.delete(&name)? {
        Ok(Json(DeleteResponse { deleted: name }))
    } else {
        Err(ApiError::NotFound(format!("overlay '{}'", name)))
    }
}
