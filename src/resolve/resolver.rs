//! Memoizing coordinate resolver.

use std::sync::{Mutex, MutexGuard, PoisonError};

use hashbrown::HashMap;
use tracing::trace;

use super::CoordinateTables;
use crate::models::{DistrictAddress, GeoPoint};

/// Resolves district identifiers to representative coordinates.
///
/// Results are cached per identifier for the resolver's lifetime. The
/// district dataset is small and static, so the cache is never evicted.
#[derive(Debug, Default)]
pub struct CoordinateResolver {
    tables: CoordinateTables,
    cache: Mutex<HashMap<String, GeoPoint>>,
}

impl CoordinateResolver {
    pub fn new(tables: CoordinateTables) -> Self {
        Self {
            tables,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Representative coordinate for `id`. Never fails; unknown provinces
    /// resolve to the fallback point.
    pub fn resolve(&self, id: &str) -> GeoPoint {
        if let Some(point) = self.cache().get(id) {
            return *point;
        }

        let point = self.tables.lookup(&DistrictAddress::parse(id));
        trace!("Resolved {} to ({}, {})", id, point.lat, point.lon);

        // Two threads may race on the same id; both compute the same point.
        self.cache().insert(id.to_string(), point);
        point
    }

    pub fn tables(&self) -> &CoordinateTables {
        &self.tables
    }

    /// Mutable tables. Already cached identifiers keep their points.
    pub fn tables_mut(&mut self) -> &mut CoordinateTables {
        &mut self.tables
    }

    /// Number of cached identifiers
    pub fn cached(&self) -> usize {
        self.cache().len()
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<String, GeoPoint>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
