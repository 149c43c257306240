//! Driven port for the map's editable overlay layer group.
//!
//! The workflow mutates this layer group only on the UI thread and only
//! through clear-then-add pairs, so the map never shows two AOIs at once.

use geo_types::Polygon;

/// Port for the layer group that renders the drawn AOI.
#[cfg_attr(test, mockall::automock)]
pub trait OverlayLayer: Send + Sync {
    /// Remove every overlay from the layer group.
    fn clear(&self);

    /// Render `polygon` as the AOI overlay.
    fn add_polygon(&self, polygon: &Polygon<f64>);
}

/// Fixture implementation that ignores overlay mutations.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureOverlayLayer;

impl OverlayLayer for FixtureOverlayLayer {
    fn clear(&self) {}

    fn add_polygon(&self, _polygon: &Polygon<f64>) {}
}
