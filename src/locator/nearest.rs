//! Reverse lookup: the district closest to a coordinate.

use tracing::debug;

use crate::models::{DistrictAddress, DistrictLevel, GeoPoint};
use crate::resolve::CoordinateResolver;

/// Find the district in `districts` closest to `point`.
///
/// The province is chosen first by its label point. Within that province the
/// finest level present is searched: neighborhoods, else counties, else the
/// first province-only entry. Distances are Euclidean in degree space, and
/// the first of equally distant candidates wins.
pub fn nearest<'a>(
    districts: &'a [String],
    resolver: &CoordinateResolver,
    point: GeoPoint,
) -> Option<&'a str> {
    if districts.is_empty() {
        return None;
    }

    let province = resolver.tables().nearest_province(&point)?;

    let in_province: Vec<(&str, DistrictLevel)> = districts
        .iter()
        .filter_map(|id| {
            let address = DistrictAddress::parse(id);
            (address.province == province).then(|| (id.as_str(), address.level()))
        })
        .collect();

    debug!(
        "Nearest district to ({}, {}): province {} with {} entries",
        point.lat,
        point.lon,
        province,
        in_province.len()
    );

    for level in DistrictLevel::finest_first() {
        let mut candidates = in_province
            .iter()
            .filter(|(_, l)| l == level)
            .map(|(id, _)| *id)
            .peekable();

        if candidates.peek().is_none() {
            continue;
        }

        return match level {
            DistrictLevel::Province => candidates.next(),
            _ => closest(candidates, resolver, &point),
        };
    }

    None
}

fn closest<'a>(
    candidates: impl Iterator<Item = &'a str>,
    resolver: &CoordinateResolver,
    point: &GeoPoint,
) -> Option<&'a str> {
    let mut nearest = None;
    let mut nearest_distance = f64::INFINITY;

    for id in candidates {
        let distance = resolver.resolve(id).degree_distance(point);
        if distance < nearest_distance {
            nearest_distance = distance;
            nearest = Some(id);
        }
    }

    nearest
}
