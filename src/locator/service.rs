//! Locator service tying the district index, resolver and grid together.

use tracing::{debug, warn};

use super::{nearest, search};
use crate::districts::{DistrictIndex, DistrictSource};
use crate::grid::LambertGrid;
use crate::models::{GeoPoint, GridCell, Location};
use crate::resolve::{CoordinateResolver, CoordinateTables};

/// District lookup service.
///
/// Owns one lazily loaded [`DistrictIndex`] and one memoizing
/// [`CoordinateResolver`]. Construct it once and share it (e.g. behind an
/// `Arc`); nothing here is process-global.
pub struct Locator {
    index: DistrictIndex,
    resolver: CoordinateResolver,
    grid: LambertGrid,
}

impl Locator {
    pub fn new(index: DistrictIndex, resolver: CoordinateResolver) -> Self {
        Self {
            index,
            resolver,
            grid: LambertGrid::kma(),
        }
    }

    /// Locator over `source` with the reference coordinate tables
    pub fn with_source<S: DistrictSource + 'static>(source: S) -> Self {
        Self::new(
            DistrictIndex::new(source),
            CoordinateResolver::new(CoordinateTables::korea()),
        )
    }

    /// Search districts by free text. Blank queries return nothing without
    /// touching the index.
    pub async fn search(&self, query: &str) -> Vec<Location> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let districts = self.index.load().await;
        if districts.is_empty() {
            warn!("No district data available; search for '{}' skipped", query);
            return Vec::new();
        }

        search::search(districts, &self.resolver, query)
    }

    /// Identifier of the district closest to `(lat, lon)`, if any.
    pub async fn nearest(&self, lat: f64, lon: f64) -> Option<String> {
        let districts = self.index.load().await;
        let found = nearest::nearest(districts, &self.resolver, GeoPoint::new(lat, lon));
        debug!("Nearest district to ({}, {}): {:?}", lat, lon, found);
        found.map(String::from)
    }

    pub fn resolve(&self, id: &str) -> GeoPoint {
        self.resolver.resolve(id)
    }

    /// Forecast grid cell for `(lat, lon)`.
    pub fn grid_for(&self, lat: f64, lon: f64) -> GridCell {
        self.grid.project(lat, lon)
    }

    pub fn index(&self) -> &DistrictIndex {
        &self.index
    }

    pub fn resolver(&self) -> &CoordinateResolver {
        &self.resolver
    }
}
