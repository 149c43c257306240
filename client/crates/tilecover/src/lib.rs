//! Slippy-map tile cover computation for AOI polygons.
//!
//! Given one area-of-interest polygon in WGS84, this crate answers the
//! question "which web-mercator tiles does it occupy, and how much of that
//! cover is boundary?". Tiles fully inside the AOI are kept at whatever zoom
//! they are found; tiles crossing the boundary are subdivided down to a
//! caller-chosen maximum zoom. The split between the two lists drives the
//! cheap-path decision upstream: an AOI whose boundary share is tiny can be
//! answered from whole-tile aggregates without any per-point geometry work.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt;

use geo::{BoundingRect, Contains, Intersects};
use geo_types::{Coord, Polygon, Rect};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};

/// Deepest zoom [`cover`] accepts.
///
/// Slippy tile addressing uses `u32` axes, so zoom 30 is the last level where
/// a tile and its children are all representable.
pub const MAX_ZOOM: u8 = 30;

/// Zoom at which [`bounding_tile`] stops descending even for degenerate,
/// point-like extents.
const MAX_BOUNDING_ZOOM: u8 = 28;

/// Errors reported while building a tile cover.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TileCoverError {
    /// The AOI bounds are not a usable lon/lat box.
    #[error("bounds invalid: {message}")]
    InvalidBounds {
        /// Why the bounds were rejected.
        message: String,
    },
    /// The requested maximum zoom exceeds [`MAX_ZOOM`].
    #[error("zoom {requested} out of range (maximum {MAX_ZOOM})")]
    ZoomOutOfRange {
        /// The zoom the caller asked for.
        requested: u8,
    },
}

impl TileCoverError {
    /// Build a [`TileCoverError::InvalidBounds`] from any message.
    #[must_use]
    pub fn invalid_bounds(message: impl Into<String>) -> Self {
        Self::InvalidBounds {
            message: message.into(),
        }
    }
}

/// One slippy-map tile address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile {
    /// Column, counted from the antimeridian eastwards.
    pub x: u32,
    /// Row, counted from the north mercator limit southwards.
    pub y: u32,
    /// Zoom level.
    pub z: u8,
}

impl Tile {
    /// The single zoom-zero tile spanning the whole mercator world.
    pub const ROOT: Self = Self { x: 0, y: 0, z: 0 };

    /// Build a tile address without range checking.
    #[must_use]
    pub const fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Geographic extent of this tile.
    ///
    /// Longitudes are linear in `x`; latitudes follow the spherical-mercator
    /// row formula, so the world extent is clamped at roughly ±85.05113°.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let tiles_per_axis = f64::powi(2.0, i32::from(self.z));
        let row_latitude = |row: f64| -> f64 {
            (PI * (1.0 - 2.0 * (row / tiles_per_axis))).sinh().atan().to_degrees()
        };
        Bounds {
            west: f64::from(self.x) / tiles_per_axis * 360.0 - 180.0,
            south: row_latitude(f64::from(self.y) + 1.0),
            east: (f64::from(self.x) + 1.0) / tiles_per_axis * 360.0 - 180.0,
            north: row_latitude(f64::from(self.y)),
        }
    }

    /// The four tiles this tile splits into at the next zoom.
    ///
    /// Meaningful only below [`MAX_ZOOM`]; deeper addresses are not
    /// representable.
    #[must_use]
    pub const fn children(&self) -> [Self; 4] {
        let (x, y, z) = (self.x * 2, self.y * 2, self.z + 1);
        [
            Self::new(x, y, z),
            Self::new(x + 1, y, z),
            Self::new(x + 1, y + 1, z),
            Self::new(x, y + 1, z),
        ]
    }

    /// The tile containing this one at the previous zoom, or `None` for the
    /// root.
    #[must_use]
    pub const fn parent(&self) -> Option<Self> {
        match self.z {
            0 => None,
            z => Some(Self::new(self.x / 2, self.y / 2, z - 1)),
        }
    }

    /// The ancestor of this tile at zoom `z`, or the tile itself when it is
    /// already at or above that zoom.
    #[must_use]
    pub const fn ancestor_at(&self, z: u8) -> Self {
        if self.z <= z {
            return *self;
        }
        let lift = self.z - z;
        Self::new(self.x >> lift, self.y >> lift, z)
    }

    /// This tile's extent as a closed polygon ring.
    #[must_use]
    pub fn to_polygon(&self) -> Polygon<f64> {
        let bounds = self.bounds();
        Rect::new(
            Coord {
                x: bounds.west,
                y: bounds.south,
            },
            Coord {
                x: bounds.east,
                y: bounds.north,
            },
        )
        .to_polygon()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// A lon/lat bounding box in `west, south, east, north` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Western longitude.
    pub west: f64,
    /// Southern latitude.
    pub south: f64,
    /// Eastern longitude.
    pub east: f64,
    /// Northern latitude.
    pub north: f64,
}

impl Bounds {
    /// Validate and build a bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`TileCoverError::InvalidBounds`] for non-finite values,
    /// inverted or empty extents, or coordinates outside WGS84 ranges.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Result<Self, TileCoverError> {
        if [west, south, east, north].into_iter().any(|value| !value.is_finite()) {
            return Err(TileCoverError::invalid_bounds(
                "bounds must contain finite coordinates",
            ));
        }
        if west >= east || south >= north {
            return Err(TileCoverError::invalid_bounds(
                "bounds must be west, south, east, north with positive extent",
            ));
        }
        if !(-180.0..=180.0).contains(&west) || !(-180.0..=180.0).contains(&east) {
            return Err(TileCoverError::invalid_bounds(
                "longitude must be within [-180, 180]",
            ));
        }
        if !(-90.0..=90.0).contains(&south) || !(-90.0..=90.0).contains(&north) {
            return Err(TileCoverError::invalid_bounds(
                "latitude must be within [-90, 90]",
            ));
        }
        Ok(Self {
            west,
            south,
            east,
            north,
        })
    }

    const fn contains(&self, other: &Self) -> bool {
        self.west <= other.west
            && self.south <= other.south
            && self.east >= other.east
            && self.north >= other.north
    }
}

/// Smallest single tile whose extent contains `bounds`.
///
/// Descends from the root while exactly one child still contains the box.
/// Boxes spanning the prime meridian or the equator stop at low zooms (the
/// worst case being the root tile itself) because every deeper tile grid
/// splits along those lines.
#[must_use]
pub fn bounding_tile(bounds: &Bounds) -> Tile {
    let mut tile = Tile::ROOT;
    while tile.z < MAX_BOUNDING_ZOOM {
        let mut containing = tile
            .children()
            .into_iter()
            .filter(|child| child.bounds().contains(bounds));
        match (containing.next(), containing.next()) {
            (Some(child), None) => tile = child,
            _ => break,
        }
    }
    tile
}

/// The tile lists produced by [`cover`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileCover {
    /// Tiles fully inside the AOI, at whatever zoom containment was decided.
    pub within: Vec<Tile>,
    /// Boundary tiles at the maximum zoom, each partly inside and partly
    /// outside the AOI.
    pub intersecting: Vec<Tile>,
}

impl TileCover {
    /// Share of the cover's estimated area that sits on the AOI boundary.
    ///
    /// This is the ratio used for the cheap-path decision upstream: when the
    /// boundary share is small enough, whole-tile aggregates answer the query
    /// and no per-point geometry is needed. An empty cover reports `0.0`.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "tile-unit areas stay well below 2^53"
    )]
    pub fn boundary_share(&self, max_z: u8) -> f64 {
        let boundary = estimated_area(&self.intersecting, max_z);
        let interior = estimated_area(&self.within, max_z);
        let total = boundary + interior;
        if total == 0 {
            return 0.0;
        }
        boundary as f64 / total as f64
    }

    /// Number of tiles per zoom level across both lists.
    #[must_use]
    pub fn zoom_histogram(&self) -> BTreeMap<u8, usize> {
        let mut histogram = BTreeMap::new();
        for tile in self.within.iter().chain(&self.intersecting) {
            *histogram.entry(tile.z).or_insert(0) += 1;
        }
        histogram
    }
}

/// Split the AOI's tile cover into fully-contained and boundary tiles.
///
/// Fully-contained tiles are recorded at the zoom where containment is first
/// established; boundary tiles are subdivided until `max_z` and recorded
/// there. Tiles disjoint from the AOI are dropped.
///
/// # Errors
///
/// Returns [`TileCoverError::ZoomOutOfRange`] when `max_z` exceeds
/// [`MAX_ZOOM`], and [`TileCoverError::InvalidBounds`] when the polygon has
/// no usable extent.
pub fn cover(aoi: &Polygon<f64>, max_z: u8) -> Result<TileCover, TileCoverError> {
    if max_z > MAX_ZOOM {
        return Err(TileCoverError::ZoomOutOfRange { requested: max_z });
    }
    let rect = aoi
        .bounding_rect()
        .ok_or_else(|| TileCoverError::invalid_bounds("polygon has no extent"))?;
    let bounds = Bounds::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)?;

    // A small AOI can bound deeper than max_z; lift the start tile so
    // subdivision depth stays the caller's choice.
    let root = bounding_tile(&bounds).ancestor_at(max_z);

    let mut tiles = TileCover::default();
    split_tile(root, aoi, max_z, &mut tiles);
    Ok(tiles)
}

fn split_tile(tile: Tile, aoi: &Polygon<f64>, max_z: u8, out: &mut TileCover) {
    let tile_polygon = tile.to_polygon();
    if aoi.contains(&tile_polygon) {
        out.within.push(tile);
    } else if tile_polygon.intersects(aoi) {
        if tile.z < max_z {
            for child in tile.children() {
                split_tile(child, aoi, max_z, out);
            }
        } else {
            out.intersecting.push(tile);
        }
    }
}

/// Estimated area of a tile list in max-zoom tile units.
///
/// A tile at `max_z` counts as one unit, its parent as four, and so on. Tiles
/// deeper than `max_z` (possible only when they were produced elsewhere)
/// saturate at one unit.
#[must_use]
pub fn estimated_area(tiles: &[Tile], max_z: u8) -> u64 {
    tiles
        .iter()
        .map(|tile| 4_u64.pow(u32::from(max_z.saturating_sub(tile.z))))
        .sum()
}

/// Render a tile list as a GeoJSON feature collection for debugging overlays.
#[must_use]
pub fn to_feature_collection(tiles: &[Tile]) -> FeatureCollection {
    let features = tiles
        .iter()
        .map(|tile| {
            let mut properties = JsonObject::new();
            properties.insert("title".to_owned(), JsonValue::String(tile.to_string()));
            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(&tile.to_polygon()))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
