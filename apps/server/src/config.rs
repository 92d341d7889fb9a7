// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

use std::net::IpAddr;
use std::time::Duration;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Directory where converted overlays are stored.
    pub overlay_dir: String,
    /// Directory with the static frontend files.
    pub static_dir: String,
    /// Source EPSG code used when the upload does not name one.
    pub default_epsg: u32,
    /// Maximum upload size in MB.
    pub max_upload_mb: usize,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".into())
                .parse()
                .unwrap_or_else(|_| [0, 0, 0, 0].into()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".into())
                .parse()
                .unwrap_or(8000),
            overlay_dir: std::env::var("OVERLAY_DIR").unwrap_or_else(|_| "./overlays".into()),
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "./static".into()),
            default_epsg: std::env::var("DEFAULT_EPSG")
                .unwrap_or_else(|_| "32638".into())
                .parse()
                .unwrap_or(32638),
            max_upload_mb: std::env::var("MAX_UPLOAD_MB")
                .unwrap_or_else(|_| "50".into())
                .parse()
                .unwrap_or(50),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".into())
                .parse()
                .unwrap_or(60),
        }
    }

    /// Request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
