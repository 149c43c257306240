//! Single-AOI state owned by the workflow controller.
//!
//! The store holds zero or one area of interest. Replacement is the only
//! mutation, so two AOIs can never coexist, and each replacement advances a
//! generation marker that ties in-flight responses to the AOI they were
//! issued for.

use geo_types::Polygon;

/// Marker identifying which drawn AOI a response belongs to.
///
/// Generations advance monotonically on every replacement and are never
/// reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AoiGeneration(u64);

impl AoiGeneration {
    /// Numeric view for trace output.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// The single user-drawn area of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct Aoi {
    polygon: Polygon<f64>,
    generation: AoiGeneration,
}

impl Aoi {
    /// The drawn polygon in WGS84.
    #[must_use]
    pub const fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// Generation this AOI was created under.
    #[must_use]
    pub const fn generation(&self) -> AoiGeneration {
        self.generation
    }
}

/// Holds zero or one current AOI.
///
/// A drawn polygon always replaces the previous one; there is no way to hold
/// two AOIs at once.
#[derive(Debug, Default)]
pub struct AoiStore {
    current: Option<Aoi>,
    generations: u64,
}

impl AoiStore {
    /// Replace the current AOI with a freshly drawn polygon.
    ///
    /// The previous AOI, if any, is discarded in the same step.
    pub fn replace(&mut self, polygon: Polygon<f64>) -> &Aoi {
        self.generations += 1;
        self.current.insert(Aoi {
            polygon,
            generation: AoiGeneration(self.generations),
        })
    }

    /// The current AOI, or `None` when nothing has been drawn.
    #[must_use]
    pub const fn current(&self) -> Option<&Aoi> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for AOI replacement semantics.

    use geo_types::{Polygon, polygon};

    use super::AoiStore;

    fn square(origin: f64) -> Polygon<f64> {
        polygon![
            (x: origin, y: origin),
            (x: origin + 1.0, y: origin),
            (x: origin + 1.0, y: origin + 1.0),
            (x: origin, y: origin + 1.0),
        ]
    }

    #[test]
    fn store_starts_empty() {
        assert!(AoiStore::default().current().is_none());
    }

    #[test]
    fn replace_keeps_only_the_latest_polygon() {
        let mut store = AoiStore::default();
        store.replace(square(0.0));
        store.replace(square(5.0));

        let current = store.current().expect("aoi present");
        assert_eq!(current.polygon(), &square(5.0));
    }

    #[test]
    fn generations_advance_on_every_replacement() {
        let mut store = AoiStore::default();
        let first = store.replace(square(0.0)).generation();
        let second = store.replace(square(1.0)).generation();

        assert_ne!(first, second);
        assert!(second.value() > first.value());
    }
}
