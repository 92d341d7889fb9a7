// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: Convert a DXF drawing into a GeoJSON overlay
//!
//! Reprojects drawing coordinates from a source UTM zone into WGS84 and
//! drops geometry with implausible coordinates (paper space, local
//! origins).
//!
//! Usage:
//!   dxf2geo <input.dxf> [output.geojson] [--epsg <code>]

use dxf2geo_core::{convert, Extent};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

const DEFAULT_EPSG: u32 = 32638;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut epsg: u32 = DEFAULT_EPSG;
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--epsg" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --epsg requires a value");
                    process::exit(1);
                }
                epsg = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("Error: invalid EPSG code '{}'", args[i]);
                    process::exit(1);
                });
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                process::exit(1);
            }
            path => {
                if input.is_none() {
                    input = Some(PathBuf::from(path));
                } else if output.is_none() {
                    output = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {}", path);
                    print_usage();
                    process::exit(1);
                }
            }
        }
        i += 1;
    }

    let Some(input) = input else {
        print_usage();
        process::exit(1);
    };
    let output = output.unwrap_or_else(|| input.with_extension("geojson"));

    println!("Reading: {}", input.display());
    let result = convert(&input, epsg).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let json = result.to_geojson().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    if let Err(e) = fs::write(&output, json) {
        eprintln!("Error: cannot write '{}': {}", output.display(), e);
        process::exit(1);
    }

    println!("Written: {}", output.display());
    println!("  Features: {}", result.features.len());
    if result.filtered > 0 {
        println!("  Filtered (out-of-range coords): {}", result.filtered);
    }
    if !result.skipped.is_empty() {
        println!("  Skipped entity types:");
        for (kind, count) in &result.skipped {
            println!("    {}: {}", kind, count);
        }
    }

    let extent = Extent::from_features(&result.features);
    if let (Some(bbox), Some(center)) = (extent.bbox(), extent.center()) {
        println!(
            "  Bounds: [{:.6}, {:.6}] to [{:.6}, {:.6}]",
            bbox[0], bbox[1], bbox[2], bbox[3]
        );
        println!("  Center: [{:.6}, {:.6}]", center[0], center[1]);
    }
}

fn print_usage() {
    println!("dxf2geo - Convert DXF drawings to GeoJSON overlays");
    println!();
    println!("Usage:");
    println!("  dxf2geo <input.dxf> [output.geojson] [options]");
    println!();
    println!("Options:");
    println!(
        "  --epsg <code>   Source EPSG code (default: {})",
        DEFAULT_EPSG
    );
    println!("  -h, --help      Show this help");
    println!();
    println!("Example:");
    println!("  dxf2geo site.dxf site.geojson --epsg 32638");
}
