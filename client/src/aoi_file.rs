//! Loading a drawn AOI polygon from a GeoJSON file.
//!
//! The binaries stand in for a map widget, so they accept the AOI as a
//! GeoJSON file instead of a drawing gesture: a bare polygon geometry, a
//! polygon feature, or the first polygon feature of a collection.

use std::io::Read;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};
use geo_types::Polygon;
use geojson::{Feature, GeoJson};

/// Errors raised while loading an AOI polygon from disk.
#[derive(Debug, thiserror::Error)]
pub enum AoiFileError {
    /// The file could not be read.
    #[error("read AOI file: {message}")]
    Read {
        /// Read failure detail.
        message: String,
    },
    /// The file content is not valid GeoJSON.
    #[error("parse AOI file: {message}")]
    Parse {
        /// Parse failure detail.
        message: String,
    },
    /// The GeoJSON holds no polygon geometry.
    #[error("AOI file contains no polygon geometry")]
    NoPolygon,
}

impl AoiFileError {
    fn read(message: impl Into<String>) -> Self {
        Self::Read {
            message: message.into(),
        }
    }

    fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

/// Load the first polygon found in a GeoJSON file.
///
/// # Errors
///
/// Returns [`AoiFileError::Read`] when the file cannot be opened or read,
/// [`AoiFileError::Parse`] when its content is not GeoJSON, and
/// [`AoiFileError::NoPolygon`] when no polygon geometry is present.
pub fn load_polygon(path: &Path) -> Result<Polygon<f64>, AoiFileError> {
    let raw = read_file(path)?;
    let geojson = raw
        .parse::<GeoJson>()
        .map_err(|error| AoiFileError::parse(format!("'{}': {error}", path.display())))?;
    first_polygon(geojson).ok_or(AoiFileError::NoPolygon)
}

fn read_file(path: &Path) -> Result<String, AoiFileError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| AoiFileError::read(format!("'{}' is not a file path", path.display())))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        AoiFileError::read(format!("open directory '{}': {error}", parent.display()))
    })?;
    let mut file = directory
        .open(Path::new(file_name))
        .map_err(|error| AoiFileError::read(format!("open '{}': {error}", path.display())))?;
    let mut raw = String::new();
    file.read_to_string(&mut raw)
        .map_err(|error| AoiFileError::read(format!("read '{}': {error}", path.display())))?;
    Ok(raw)
}

fn first_polygon(geojson: GeoJson) -> Option<Polygon<f64>> {
    match geojson {
        GeoJson::Geometry(geometry) => polygon_from_value(geometry.value),
        GeoJson::Feature(feature) => feature_polygon(feature),
        GeoJson::FeatureCollection(collection) => {
            collection.features.into_iter().find_map(feature_polygon)
        }
    }
}

fn feature_polygon(feature: Feature) -> Option<Polygon<f64>> {
    feature
        .geometry
        .and_then(|geometry| polygon_from_value(geometry.value))
}

fn polygon_from_value(value: geojson::Value) -> Option<Polygon<f64>> {
    Polygon::try_from(value).ok()
}
