//! Lambert Conformal Conic projection onto the KMA forecast grid.
//!
//! The short-term forecast service addresses its data by integer grid cells
//! on a 5 km Lambert Conformal Conic grid with standard parallels at 30°N and
//! 60°N, centred on 38°N 126°E at cell (43, 136).

use std::f64::consts::PI;

use crate::models::{GeoPoint, GridCell};

const DEG_TO_RAD: f64 = PI / 180.0;
const RAD_TO_DEG: f64 = 180.0 / PI;

/// Projection parameters for a Lambert Conformal Conic grid.
///
/// Derived terms (cone constant, scale factor, origin radius) are computed
/// once in [`LambertGrid::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambertGrid {
    /// Origin longitude in radians
    olon: f64,
    /// Origin cell X
    xo: f64,
    /// Origin cell Y
    yo: f64,
    /// Earth radius in grid units
    re: f64,
    /// Cone constant
    sn: f64,
    /// Scale factor
    sf: f64,
    /// Radius at the origin latitude
    ro: f64,
}

impl LambertGrid {
    pub fn new(params: GridParams) -> Self {
        let re = params.earth_radius_km / params.grid_km;
        let slat1 = params.slat1 * DEG_TO_RAD;
        let slat2 = params.slat2 * DEG_TO_RAD;
        let olon = params.olon * DEG_TO_RAD;
        let olat = params.olat * DEG_TO_RAD;

        let sn = (slat1.cos() / slat2.cos()).ln()
            / ((PI * 0.25 + slat2 * 0.5).tan() / (PI * 0.25 + slat1 * 0.5).tan()).ln();
        let sf = (PI * 0.25 + slat1 * 0.5).tan().powf(sn) * slat1.cos() / sn;
        let ro = re * sf / (PI * 0.25 + olat * 0.5).tan().powf(sn);

        Self {
            olon,
            xo: params.xo,
            yo: params.yo,
            re,
            sn,
            sf,
            ro,
        }
    }

    pub fn kma() -> Self {
        Self::new(GridParams::KMA)
    }

    /// Project a WGS84 point onto the grid.
    ///
    /// Total for finite input: points outside the grid extent still get a
    /// (possibly negative) cell. Rounding is `floor(v + 0.5)`, which the
    /// provider's indexing depends on.
    pub fn project(&self, lat: f64, lon: f64) -> GridCell {
        let ra = self.re * self.sf / (PI * 0.25 + lat * DEG_TO_RAD * 0.5).tan().powf(self.sn);

        let mut theta = lon * DEG_TO_RAD - self.olon;
        if theta > PI {
            theta -= 2.0 * PI;
        }
        if theta < -PI {
            theta += 2.0 * PI;
        }
        theta *= self.sn;

        let nx = (ra * theta.sin() + self.xo + 0.5).floor();
        let ny = (self.ro - ra * theta.cos() + self.yo + 0.5).floor();

        GridCell::new(nx as i32, ny as i32)
    }

    /// Geodetic position of a cell's center (inverse projection).
    pub fn cell_center(&self, cell: GridCell) -> GeoPoint {
        let xn = f64::from(cell.nx) - self.xo;
        let yn = self.ro - f64::from(cell.ny) + self.yo;

        let mut ra = (xn * xn + yn * yn).sqrt();
        if self.sn < 0.0 {
            ra = -ra;
        }
        let lat = 2.0 * (self.re * self.sf / ra).powf(1.0 / self.sn).atan() - PI * 0.5;
        let theta = xn.atan2(yn);
        let lon = theta / self.sn + self.olon;

        GeoPoint::new(lat * RAD_TO_DEG, lon * RAD_TO_DEG)
    }
}

impl Default for LambertGrid {
    fn default() -> Self {
        Self::kma()
    }
}

/// Raw grid constants, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    pub earth_radius_km: f64,
    pub grid_km: f64,
    /// First standard parallel
    pub slat1: f64,
    /// Second standard parallel
    pub slat2: f64,
    pub olon: f64,
    pub olat: f64,
    pub xo: f64,
    pub yo: f64,
}

impl GridParams {
    /// The KMA short-term forecast grid.
    pub const KMA: GridParams = GridParams {
        earth_radius_km: 6371.00877,
        grid_km: 5.0,
        slat1: 30.0,
        slat2: 60.0,
        olon: 126.0,
        olat: 38.0,
        xo: 43.0,
        yo: 136.0,
    };
}

/// Project onto the KMA forecast grid.
pub fn project(lat: f64, lon: f64) -> GridCell {
    LambertGrid::kma().project(lat, lon)
}
