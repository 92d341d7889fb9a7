// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! dxf2geo Server - DXF overlay upload and serving API.
//!
//! Serves the map frontend plus a small CRUD API around the core
//! converter: uploaded DXF files are converted to GeoJSON overlays and
//! stored on disk, where the frontend loads them as map layers.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/overlays` - List stored overlays
//! - `POST /api/upload-dxf` - Upload and convert a DXF file
//! - `DELETE /api/overlays/:name` - Delete a stored overlay
//! - `GET /overlays/*` - Static overlay GeoJSON files
//! - `/` - Static frontend files

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod config;
mod error;
mod routes;
mod services;
mod types;

use config::Config;
use services::store::OverlayStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<OverlayStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,tower_http=debug,dxf2geo_server=debug".into()),
        )
        .init();

    let config = Config::from_env();

    tracing::info!(
        port = config.port,
        overlay_dir = %config.overlay_dir,
        static_dir = %config.static_dir,
        default_epsg = config.default_epsg,
        max_upload_mb = config.max_upload_mb,
        "Starting dxf2geo Server"
    );

    let store = Arc::new(OverlayStore::new(&config.overlay_dir).context("overlay store setup")?);

    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(routes::health::check))
        // Overlay API
        .route("/api/overlays", get(routes::overlays::list))
        .route("/api/upload-dxf", post(routes::overlays::upload))
        .route("/api/overlays/:name", delete(routes::overlays::remove))
        // Stored overlay GeoJSON files
        .nest_service("/overlays", ServeDir::new(&config.overlay_dir))
        // Frontend (index.html fallback handled by ServeDir)
        .fallback_service(ServeDir::new(&config.static_dir))
        // Middleware
        .layer(DefaultBodyLimit::max(config.max_upload_mb * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from((config.host, config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind listener")?;
    axum::serve(listener, app).await.context("serve")?;
    Ok(())
}
