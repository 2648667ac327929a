//! Hand-curated label coordinates for provinces and Seoul's districts.
//!
//! These are label positions, not centroids.

use hashbrown::HashMap;

use crate::models::{DistrictAddress, GeoPoint};

/// 서울특별시, the only province with county-level coordinates.
pub const SEOUL: &str = "서울특별시";

/// Fallback for unrecognised provinces (Seoul City Hall).
pub const CAPITAL: GeoPoint = GeoPoint::new(37.5665, 126.978);

/// Province label points. Order matters: the nearest-province scan keeps the
/// first of equally distant entries, so current names precede legacy ones.
pub const PROVINCES: &[(&str, GeoPoint)] = &[
    ("서울특별시", GeoPoint::new(37.5665, 126.978)),
    ("부산광역시", GeoPoint::new(35.1796, 129.0756)),
    ("대구광역시", GeoPoint::new(35.8714, 128.6014)),
    ("인천광역시", GeoPoint::new(37.4563, 126.7052)),
    ("광주광역시", GeoPoint::new(35.1595, 126.8526)),
    ("대전광역시", GeoPoint::new(36.3504, 127.3845)),
    ("울산광역시", GeoPoint::new(35.5384, 129.3114)),
    ("세종특별자치시", GeoPoint::new(36.48, 127.289)),
    ("경기도", GeoPoint::new(37.4138, 127.5183)),
    ("강원특별자치도", GeoPoint::new(37.8228, 128.1555)),
    ("강원도", GeoPoint::new(37.8228, 128.1555)),
    ("충청북도", GeoPoint::new(36.8, 127.7)),
    ("충청남도", GeoPoint::new(36.5184, 126.8)),
    ("전북특별자치도", GeoPoint::new(35.7175, 127.153)),
    ("전라북도", GeoPoint::new(35.7175, 127.153)),
    ("전라남도", GeoPoint::new(34.8679, 126.991)),
    ("경상북도", GeoPoint::new(36.4919, 128.8889)),
    ("경상남도", GeoPoint::new(35.4606, 128.2132)),
    ("제주특별자치도", GeoPoint::new(33.4996, 126.5312)),
    ("제주도", GeoPoint::new(33.4996, 126.5312)),
];

/// Label points for Seoul's 25 autonomous districts (구).
pub const SEOUL_COUNTIES: &[(&str, GeoPoint)] = &[
    ("강남구", GeoPoint::new(37.5172, 127.0473)),
    ("강동구", GeoPoint::new(37.5301, 127.1238)),
    ("강북구", GeoPoint::new(37.6398, 127.0253)),
    ("강서구", GeoPoint::new(37.5509, 126.8495)),
    ("관악구", GeoPoint::new(37.4784, 126.9516)),
    ("광진구", GeoPoint::new(37.5384, 127.0821)),
    ("구로구", GeoPoint::new(37.4954, 126.8874)),
    ("금천구", GeoPoint::new(37.4519, 126.9020)),
    ("노원구", GeoPoint::new(37.6542, 127.0568)),
    ("도봉구", GeoPoint::new(37.6688, 127.0471)),
    ("동대문구", GeoPoint::new(37.5744, 127.0396)),
    ("동작구", GeoPoint::new(37.5124, 126.9393)),
    ("마포구", GeoPoint::new(37.5663, 126.9019)),
    ("서대문구", GeoPoint::new(37.5791, 126.9368)),
    ("서초구", GeoPoint::new(37.4837, 127.0324)),
    ("성동구", GeoPoint::new(37.5633, 127.0366)),
    ("성북구", GeoPoint::new(37.5894, 127.0167)),
    ("송파구", GeoPoint::new(37.5145, 127.1058)),
    ("양천구", GeoPoint::new(37.5170, 126.8664)),
    ("영등포구", GeoPoint::new(37.5264, 126.8962)),
    ("용산구", GeoPoint::new(37.5326, 126.9905)),
    ("은평구", GeoPoint::new(37.6027, 126.9291)),
    ("종로구", GeoPoint::new(37.5735, 126.9788)),
    ("중구", GeoPoint::new(37.5640, 126.9970)),
    ("중랑구", GeoPoint::new(37.6064, 127.0926)),
];

/// Lookup tables backing the coordinate resolver.
#[derive(Debug, Clone)]
pub struct CoordinateTables {
    /// Province label points, in scan order
    pub provinces: Vec<(String, GeoPoint)>,
    /// Province whose counties have their own entries
    pub county_province: String,
    pub counties: HashMap<String, GeoPoint>,
    /// Used when the province is not in `provinces`
    pub fallback: GeoPoint,
}

impl CoordinateTables {
    /// Reference tables for South Korea.
    pub fn korea() -> Self {
        Self {
            provinces: PROVINCES
                .iter()
                .map(|(name, point)| (name.to_string(), *point))
                .collect(),
            county_province: SEOUL.to_string(),
            counties: SEOUL_COUNTIES
                .iter()
                .map(|(name, point)| (name.to_string(), *point))
                .collect(),
            fallback: CAPITAL,
        }
    }

    pub fn province(&self, name: &str) -> Option<GeoPoint> {
        self.provinces
            .iter()
            .find(|(province, _)| province == name)
            .map(|(_, point)| *point)
    }

    /// County entry, only for the covered province.
    ///
    /// Counties in any other province have no entry here and fall back to
    /// their province's point.
    pub fn county(&self, province: &str, county: &str) -> Option<GeoPoint> {
        if province != self.county_province || county.is_empty() {
            return None;
        }
        self.counties.get(county).copied()
    }

    /// Uncached lookup: county table, then province table, then the fallback.
    pub fn lookup(&self, address: &DistrictAddress<'_>) -> GeoPoint {
        self.county(address.province, address.county)
            .or_else(|| self.province(address.province))
            .unwrap_or(self.fallback)
    }

    /// Province whose label point is closest in degree space.
    ///
    /// Ties keep the earlier table entry.
    pub fn nearest_province(&self, point: &GeoPoint) -> Option<&str> {
        let mut nearest = None;
        let mut nearest_distance = f64::INFINITY;
        for (name, province_point) in &self.provinces {
            let distance = point.degree_distance(province_point);
            if distance < nearest_distance {
                nearest_distance = distance;
                nearest = Some(name.as_str());
            }
        }
        nearest
    }
}

impl Default for CoordinateTables {
    fn default() -> Self {
        Self::korea()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_tiers() {
        let tables = CoordinateTables::korea();

        let gangnam = tables.lookup(&DistrictAddress::parse("서울특별시-강남구-역삼동"));
        assert_eq!(gangnam, GeoPoint::new(37.5172, 127.0473));

        let busan = tables.lookup(&DistrictAddress::parse("부산광역시-해운대구"));
        assert_eq!(busan, GeoPoint::new(35.1796, 129.0756));

        let unknown = tables.lookup(&DistrictAddress::parse("평안남도-평양시"));
        assert_eq!(unknown, CAPITAL);
    }

    #[test]
    fn test_county_table_only_covers_seoul() {
        let tables = CoordinateTables::korea();
        // 중구 exists in several cities; only Seoul's has its own point.
        assert_eq!(
            tables.county("서울특별시", "중구"),
            Some(GeoPoint::new(37.5640, 126.9970))
        );
        assert_eq!(tables.county("대구광역시", "중구"), None);
        assert_eq!(
            tables.lookup(&DistrictAddress::parse("대구광역시-중구")),
            GeoPoint::new(35.8714, 128.6014)
        );
    }

    #[test]
    fn test_nearest_province() {
        let tables = CoordinateTables::korea();
        assert_eq!(
            tables.nearest_province(&GeoPoint::new(35.10, 129.03)),
            Some("부산광역시")
        );
        assert_eq!(
            tables.nearest_province(&GeoPoint::new(37.5172, 127.0473)),
            Some("서울특별시")
        );
    }

    #[test]
    fn test_nearest_province_prefers_first_of_tie() {
        let tables = CoordinateTables::korea();
        assert_eq!(
            tables.nearest_province(&GeoPoint::new(37.8228, 128.1555)),
            Some("강원특별자치도")
        );
        assert_eq!(
            tables.nearest_province(&GeoPoint::new(33.4996, 126.5312)),
            Some("제주특별자치도")
        );
    }

    #[test]
    fn test_nearest_province_empty_table() {
        let tables = CoordinateTables {
            provinces: Vec::new(),
            ..CoordinateTables::korea()
        };
        assert_eq!(tables.nearest_province(&CAPITAL), None);
    }
}
