//! Free-text district search.

use std::cmp::Ordering;

use hashbrown::HashSet;
use tracing::debug;

use crate::models::{full_name, DistrictAddress, Location};
use crate::resolve::CoordinateResolver;

/// Maximum number of results returned by [`search`].
pub const MAX_RESULTS: usize = 10;

/// Search `districts` for `query`.
///
/// Matching is a case-insensitive substring test against the identifier, its
/// space-joined full name, and each hierarchy level. Only the first
/// [`MAX_RESULTS`] matches in index order are resolved. Exact full-name
/// matches sort first, the rest by full name.
pub fn search(districts: &[String], resolver: &CoordinateResolver, query: &str) -> Vec<Location> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let candidates: Vec<&str> = districts
        .iter()
        .map(String::as_str)
        .filter(|id| matches(id, &query))
        .filter(|id| seen.insert(*id))
        .take(MAX_RESULTS)
        .collect();

    debug!("Search '{}': {} candidates", query, candidates.len());

    let mut locations: Vec<Location> = candidates
        .into_iter()
        .map(|id| Location::new(id, resolver.resolve(id)))
        .collect();

    locations.sort_by(|a, b| {
        let a_exact = a.full_name.to_lowercase() == query;
        let b_exact = b.full_name.to_lowercase() == query;
        b_exact
            .cmp(&a_exact)
            .then_with(|| collate(&a.full_name, &b.full_name))
    });

    locations
}

fn matches(id: &str, query: &str) -> bool {
    let contains = |s: &str| s.to_lowercase().contains(query);
    let address = DistrictAddress::parse(id);

    contains(id)
        || contains(&full_name(id))
        || contains(address.province)
        || contains(address.county)
        || address.neighborhood.is_some_and(contains)
}

/// Case-insensitive ordering; names differing only in case put lowercase
/// first. Hangul sorts as it would under Korean collation, but accented Latin
/// does not (`f` sorts before `éa`).
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
