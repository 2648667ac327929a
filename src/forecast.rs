//! Time references and condition codes for the KMA village forecast service.
//!
//! Nothing here performs a request; these are the parameters a fetcher pairs
//! with a [`GridCell`].

use chrono::{Duration, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::GridCell;

/// Hours at which short-term forecasts are issued.
pub const FORECAST_HOURS: [u32; 8] = [2, 5, 8, 11, 14, 17, 20, 23];

/// Current wall-clock time in Korea (UTC+9, no DST).
pub fn kst_now() -> NaiveDateTime {
    Utc::now().naive_utc() + Duration::hours(9)
}

/// Base date/time pair as the provider expects it (`YYYYMMDD`, `HHMM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseTime {
    pub date: String,
    pub time: String,
}

impl BaseTime {
    fn at(at: NaiveDateTime, minute: u32) -> Self {
        Self {
            date: at.format("%Y%m%d").to_string(),
            time: format!("{:02}{:02}", at.hour(), minute),
        }
    }
}

/// Base time for current-conditions (nowcast) data.
///
/// Observations are published at half past each hour, so before :30 the
/// previous hour's release is the latest one.
pub fn nowcast_base(now: NaiveDateTime) -> BaseTime {
    if now.minute() < 30 {
        BaseTime::at(now - Duration::hours(1), 30)
    } else {
        BaseTime::at(now, 30)
    }
}

/// Base time for the short-term forecast: the latest issue hour at or
/// before `now`, or 23:00 the previous day before the first issue.
pub fn forecast_base(now: NaiveDateTime) -> BaseTime {
    match FORECAST_HOURS.iter().rev().find(|h| now.hour() >= **h) {
        Some(hour) => BaseTime {
            date: now.format("%Y%m%d").to_string(),
            time: format!("{:02}00", hour),
        },
        None => BaseTime::at((now - Duration::days(1)).with_hour(23).unwrap_or(now), 0),
    }
}

/// Query parameters identifying one forecast tile at one base time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridQuery {
    pub cell: GridCell,
    pub base: BaseTime,
}

impl GridQuery {
    pub fn new(cell: GridCell, base: BaseTime) -> Self {
        Self { cell, base }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("dataType", "JSON".to_string()),
            ("base_date", self.base.date.clone()),
            ("base_time", self.base.time.clone()),
            ("nx", self.cell.nx.to_string()),
            ("ny", self.cell.ny.to_string()),
        ]
    }
}

/// Sky condition derived from the provider's SKY and PTY codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sky {
    Clear,
    MostlyCloudy,
    Overcast,
    Rain,
    RainSnow,
    Snow,
    Shower,
}

impl Sky {
    /// Precipitation (PTY) takes precedence over cloud cover (SKY).
    /// Unknown codes read as clear.
    pub fn from_codes(sky: &str, pty: &str) -> Self {
        match (pty, sky) {
            ("1", _) => Sky::Rain,
            ("2", _) => Sky::RainSnow,
            ("3", _) => Sky::Snow,
            ("4", _) => Sky::Shower,
            (_, "3") => Sky::MostlyCloudy,
            (_, "4") => Sky::Overcast,
            _ => Sky::Clear,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Sky::Clear => "맑음",
            Sky::MostlyCloudy => "구름많음",
            Sky::Overcast => "흐림",
            Sky::Rain => "비",
            Sky::RainSnow => "비/눈",
            Sky::Snow => "눈",
            Sky::Shower => "소나기",
        }
    }

    /// Icon code in the OpenWeather naming scheme
    pub fn icon(&self) -> &'static str {
        match self {
            Sky::Clear => "01d",
            Sky::MostlyCloudy => "03d",
            Sky::Overcast => "04d",
            Sky::Rain | Sky::Shower => "10d",
            Sky::RainSnow | Sky::Snow => "13d",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn base(date: &str, time: &str) -> BaseTime {
        BaseTime {
            date: date.to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn test_nowcast_base() {
        assert_eq!(nowcast_base(at(2024, 5, 10, 14, 45)), base("20240510", "1430"));
        assert_eq!(nowcast_base(at(2024, 5, 10, 14, 30)), base("20240510", "1430"));
        assert_eq!(nowcast_base(at(2024, 5, 10, 14, 29)), base("20240510", "1330"));
        assert_eq!(nowcast_base(at(2024, 5, 10, 0, 30)), base("20240510", "0030"));
    }

    #[test]
    fn test_nowcast_base_rolls_back_a_day() {
        assert_eq!(nowcast_base(at(2024, 5, 10, 0, 29)), base("20240509", "2330"));
        assert_eq!(nowcast_base(at(2024, 1, 1, 0, 0)), base("20231231", "2330"));
    }

    #[test]
    fn test_forecast_base() {
        assert_eq!(forecast_base(at(2024, 5, 10, 2, 0)), base("20240510", "0200"));
        assert_eq!(forecast_base(at(2024, 5, 10, 4, 59)), base("20240510", "0200"));
        assert_eq!(forecast_base(at(2024, 5, 10, 13, 10)), base("20240510", "1100"));
        assert_eq!(forecast_base(at(2024, 5, 10, 23, 59)), base("20240510", "2300"));
    }

    #[test]
    fn test_forecast_base_rolls_back_a_day() {
        assert_eq!(forecast_base(at(2024, 3, 1, 1, 59)), base("20240229", "2300"));
        assert_eq!(forecast_base(at(2024, 3, 1, 0, 0)), base("20240229", "2300"));
    }

    #[test]
    fn test_query_pairs() {
        let query = GridQuery::new(GridCell::new(60, 127), base("20240510", "1400"));
        let pairs = query.query_pairs();
        assert!(pairs.contains(&("nx", "60".to_string())));
        assert!(pairs.contains(&("ny", "127".to_string())));
        assert!(pairs.contains(&("base_time", "1400".to_string())));
    }

    #[test]
    fn test_query_pairs_have_unique_keys() {
        let cell = GridCell::new(98, 76);
        let now = at(2024, 5, 10, 0, 10);

        let nowcast: std::collections::BTreeMap<_, _> =
            GridQuery::new(cell, nowcast_base(now)).query_pairs().into_iter().collect();
        assert_eq!(nowcast.len(), 5);
        assert_eq!(nowcast["dataType"], "JSON");
        assert_eq!(nowcast["base_date"], "20240509");
        assert_eq!(nowcast["base_time"], "2330");

        let forecast = GridQuery::new(cell, forecast_base(now));
        assert_eq!(forecast.base, base("20240509", "2300"));
        assert!(forecast.query_pairs().contains(&("nx", "98".to_string())));
    }

    #[test]
    fn test_sky_codes() {
        assert_eq!(Sky::from_codes("1", "0"), Sky::Clear);
        assert_eq!(Sky::from_codes("3", "0"), Sky::MostlyCloudy);
        assert_eq!(Sky::from_codes("4", "0"), Sky::Overcast);
        assert_eq!(Sky::from_codes("4", "1"), Sky::Rain);
        assert_eq!(Sky::from_codes("1", "3"), Sky::Snow);
        assert_eq!(Sky::from_codes("", ""), Sky::Clear);

        assert_eq!(Sky::from_codes("4", "4").description(), "소나기");
        assert_eq!(Sky::from_codes("4", "4").icon(), "10d");
        assert_eq!(Sky::from_codes("1", "2").icon(), "13d");
    }
}
