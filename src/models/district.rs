//! District identifier parsing and search result records.

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Separator between hierarchy levels in a district identifier.
pub const SEPARATOR: char = '-';

/// Granularity of a district identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistrictLevel {
    /// Province / metropolitan city (시도)
    Province,
    /// County / city district (시군구)
    County,
    /// Neighbourhood / town (읍면동)
    Neighborhood,
}

impl DistrictLevel {
    /// All levels, finest first
    pub fn finest_first() -> &'static [DistrictLevel] {
        &[
            DistrictLevel::Neighborhood,
            DistrictLevel::County,
            DistrictLevel::Province,
        ]
    }
}

/// Borrowed view of a district identifier split into its hierarchy levels.
///
/// Missing levels come back as `""` (county) or `None` (neighborhood) rather
/// than failing, so any string parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistrictAddress<'a> {
    pub province: &'a str,
    pub county: &'a str,
    pub neighborhood: Option<&'a str>,
}

impl<'a> DistrictAddress<'a> {
    pub fn parse(id: &'a str) -> Self {
        let mut parts = id.split(SEPARATOR);
        Self {
            province: parts.next().unwrap_or(""),
            county: parts.next().unwrap_or(""),
            neighborhood: parts.next().filter(|n| !n.is_empty()),
        }
    }

    pub fn level(&self) -> DistrictLevel {
        if self.neighborhood.is_some() {
            DistrictLevel::Neighborhood
        } else if !self.county.is_empty() {
            DistrictLevel::County
        } else {
            DistrictLevel::Province
        }
    }

    /// Most specific non-empty level name
    pub fn display_name(&self) -> &'a str {
        match self.neighborhood {
            Some(n) => n,
            None if !self.county.is_empty() => self.county,
            None => self.province,
        }
    }

    /// True for 특별시, 광역시 and 특별자치시 provinces.
    pub fn is_metropolitan(&self) -> bool {
        ["특별시", "광역시", "특별자치시"]
            .iter()
            .any(|suffix| self.province.contains(suffix))
    }

    fn levels(&self) -> impl Iterator<Item = &'a str> {
        [Some(self.province), Some(self.county), self.neighborhood]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
    }
}

/// Space-joined form of an identifier (`서울특별시-종로구` → `서울특별시 종로구`).
pub fn full_name(id: &str) -> String {
    id.replace(SEPARATOR, " ")
}

/// Human-readable form of an identifier: present levels joined by spaces.
pub fn format_for_display(id: Option<&str>) -> Option<String> {
    let id = id.filter(|id| !id.is_empty())?;
    let address = DistrictAddress::parse(id);
    Some(address.levels().collect::<Vec<_>>().join(" "))
}

/// A search hit with its representative coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// District identifier
    pub id: String,
    /// Display name (finest level)
    pub name: String,
    pub full_name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(id: &str, point: GeoPoint) -> Self {
        let address = DistrictAddress::parse(id);
        Self {
            id: id.to_string(),
            name: address.display_name().to_string(),
            full_name: full_name(id),
            lat: point.lat,
            lon: point.lon,
        }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        let full = DistrictAddress::parse("서울특별시-종로구-청운동");
        assert_eq!(full.province, "서울특별시");
        assert_eq!(full.county, "종로구");
        assert_eq!(full.neighborhood, Some("청운동"));
        assert_eq!(full.level(), DistrictLevel::Neighborhood);

        let county = DistrictAddress::parse("경기도-수원시");
        assert_eq!(county.neighborhood, None);
        assert_eq!(county.level(), DistrictLevel::County);

        let province = DistrictAddress::parse("제주특별자치도");
        assert_eq!(province.county, "");
        assert_eq!(province.level(), DistrictLevel::Province);
    }

    #[test]
    fn test_parse_degrades_gracefully() {
        let empty = DistrictAddress::parse("");
        assert_eq!(empty.province, "");
        assert_eq!(empty.county, "");
        assert_eq!(empty.neighborhood, None);

        let trailing = DistrictAddress::parse("부산광역시-해운대구-");
        assert_eq!(trailing.neighborhood, None);
        assert_eq!(trailing.level(), DistrictLevel::County);
    }

    #[test]
    fn test_display_name_and_full_name() {
        let loc = Location::new("서울특별시-종로구", GeoPoint::new(37.5735, 126.9788));
        assert_eq!(loc.name, "종로구");
        assert_eq!(loc.full_name, "서울특별시 종로구");

        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(json["fullName"], "서울특별시 종로구");
    }

    #[test]
    fn test_format_for_display() {
        assert_eq!(
            format_for_display(Some("경상북도-포항시-장량동")).as_deref(),
            Some("경상북도 포항시 장량동")
        );
        assert_eq!(format_for_display(Some("")), None);
        assert_eq!(format_for_display(None), None);
    }

    #[test]
    fn test_is_metropolitan() {
        assert!(DistrictAddress::parse("세종특별자치시").is_metropolitan());
        assert!(DistrictAddress::parse("대구광역시-중구").is_metropolitan());
        assert!(!DistrictAddress::parse("전라남도-여수시").is_metropolitan());
    }
}
