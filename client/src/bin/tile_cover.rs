//! Inspect the slippy-tile cover of a GeoJSON AOI polygon.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use clap::Parser;
use client::aoi_file;
use geojson::FeatureCollection;
use tilecover::{TileCover, cover, estimated_area, to_feature_collection};

/// Boundary share above which whole-tile aggregates misstate the AOI too
/// much and per-point queries are needed instead.
const BOUNDARY_SHARE_LIMIT: f64 = 0.05;

/// `tile-cover` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tile-cover",
    about = "Split a GeoJSON AOI into fully-contained and boundary slippy tiles",
    version
)]
struct CliArgs {
    /// Path to a GeoJSON file holding the AOI polygon.
    #[arg(long = "aoi", value_name = "path")]
    aoi_path: PathBuf,
    /// Maximum zoom boundary tiles are subdivided to.
    #[arg(long = "max-zoom", value_name = "zoom", default_value_t = 12)]
    max_zoom: u8,
    /// Write `within.geojson` and `intersect.geojson` for map inspection.
    #[arg(long = "debug-tiles")]
    debug_tiles: bool,
    /// Directory debug overlays are written into.
    #[arg(long = "out-dir", value_name = "path", default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let aoi = aoi_file::load_polygon(&args.aoi_path).map_err(io::Error::other)?;
    let tiles = cover(&aoi, args.max_zoom)
        .map_err(|error| io::Error::other(format!("tile cover failed: {error}")))?;

    let boundary_share = tiles.boundary_share(args.max_zoom);
    println!("within_tiles={}", tiles.within.len());
    println!("intersecting_tiles={}", tiles.intersecting.len());
    println!(
        "within_area={}",
        estimated_area(&tiles.within, args.max_zoom)
    );
    println!(
        "boundary_area={}",
        estimated_area(&tiles.intersecting, args.max_zoom)
    );
    println!("boundary_share={boundary_share:.4}");
    println!("zoom_histogram={}", format_histogram(&tiles));
    println!("cheap_cover={}", boundary_share <= BOUNDARY_SHARE_LIMIT);

    if args.debug_tiles {
        write_overlay(
            &args.out_dir,
            "within.geojson",
            &to_feature_collection(&tiles.within),
        )?;
        write_overlay(
            &args.out_dir,
            "intersect.geojson",
            &to_feature_collection(&tiles.intersecting),
        )?;
    }

    Ok(())
}

fn format_histogram(tiles: &TileCover) -> String {
    tiles
        .zoom_histogram()
        .into_iter()
        .map(|(zoom, count)| format!("{zoom}:{count}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_overlay(
    out_dir: &Path,
    file_name: &str,
    collection: &FeatureCollection,
) -> io::Result<()> {
    let directory = Dir::open_ambient_dir(out_dir, ambient_authority()).map_err(|error| {
        io::Error::other(format!(
            "open output directory '{}': {error}",
            out_dir.display()
        ))
    })?;
    let mut file = directory.create(file_name).map_err(|error| {
        io::Error::other(format!(
            "create '{}': {error}",
            out_dir.join(file_name).display()
        ))
    })?;
    let payload = serde_json::to_string(collection)
        .map_err(|error| io::Error::other(format!("encode '{file_name}': {error}")))?;
    file.write_all(payload.as_bytes()).map_err(|error| {
        io::Error::other(format!(
            "write '{}': {error}",
            out_dir.join(file_name).display()
        ))
    })
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing and report formatting.

    use rstest::rstest;
    use tempfile::tempdir;
    use tilecover::Tile;

    use super::{CliArgs, Parser as _, TileCover, format_histogram, write_overlay};

    #[rstest]
    fn parsing_applies_the_documented_defaults() {
        let args = CliArgs::try_parse_from(["tile-cover", "--aoi", "aoi.geojson"])
            .expect("arguments should parse");

        assert_eq!(args.max_zoom, 12);
        assert!(!args.debug_tiles);
        assert_eq!(args.out_dir, std::path::PathBuf::from("."));
    }

    #[rstest]
    fn histogram_lists_zoom_levels_in_order() {
        let tiles = TileCover {
            within: vec![Tile::new(1, 1, 2), Tile::new(4, 4, 3), Tile::new(5, 4, 3)],
            intersecting: vec![Tile::new(9, 9, 4)],
        };

        assert_eq!(format_histogram(&tiles), "2:1 3:2 4:1");
    }

    #[rstest]
    fn overlay_files_hold_the_feature_collection() {
        let dir = tempdir().expect("temp dir");
        let collection = tilecover::to_feature_collection(&[Tile::new(1, 1, 2)]);

        write_overlay(dir.path(), "within.geojson", &collection).expect("overlay should write");

        let written =
            std::fs::read_to_string(dir.path().join("within.geojson")).expect("file should exist");
        let decoded: geojson::GeoJson = written.parse().expect("file should hold GeoJSON");
        assert!(matches!(decoded, geojson::GeoJson::FeatureCollection(_)));
    }
}
