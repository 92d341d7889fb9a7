// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Disk-backed overlay store.
//!
//! Converted overlays live as `<slug>.geojson` files in one directory.
//! Names are slugged from the uploaded filename; looked-up names are
//! slugged again so callers can never reach outside the directory.

use crate::types::OverlayInfo;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name-keyed GeoJSON file store.
#[derive(Debug)]
pub struct OverlayStore {
    dir: PathBuf,
}

impl OverlayStore {
    /// Open the store, creating its directory if needed.
    pub fn new(dir: &str) -> io::Result<Self> {
        let path = PathBuf::from(dir);
        fs::create_dir_all(&path)?;
        Ok(Self { dir: path })
    }

    /// Store a serialized FeatureCollection under the slug of `name`.
    ///
    /// Returns the slug the overlay was stored as.
    pub fn write(&self, name: &str, geojson: &str) -> io::Result<String> {
        let slug = slugify(name);
        let path = self.path_for(&slug);
        fs::write(&path, geojson)?;
        tracing::info!(name = %slug, path = %path.display(), "Stored overlay");
        Ok(slug)
    }

    /// List stored overlays, sorted by name.
    pub fn list(&self) -> io::Result<Vec<OverlayInfo>> {
        let mut overlays = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("geojson") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let size = entry.metadata()?.len();
            overlays.push(OverlayInfo {
                name: name.to_string(),
                file: self.public_path(name),
                size_kb: (size as f64 / 1024.0 * 10.0).round() / 10.0,
            });
        }
        overlays.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(overlays)
    }

    /// Delete an overlay by name; false when it was not stored.
    pub fn delete(&self, name: &str) -> io::Result<bool> {
        let path = self.path_for(&slugify(name));
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        tracing::info!(name = %name, "Deleted overlay");
        Ok(true)
    }

    /// URL path the overlay is served under.
    pub fn public_path(&self, slug: &str) -> String {
        format!("/overlays/{}.geojson", slug)
    }

    fn path_for(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{}.geojson", slug))
    }
}

/// Lowercased file stem with non-alphanumeric runs collapsed to hyphens.
pub fn slugify(name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);

    let mut slug = String::with_capacity(stem.len());
    let mut pending_hyphen = false;
    for c in stem.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
