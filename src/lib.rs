//! Dongne - Korean district lookup and KMA forecast-grid resolution
//!
//! This library provides the projection, district index, coordinate resolver,
//! and search/reverse lookup shared by the query server.

pub mod districts;
pub mod forecast;
pub mod grid;
pub mod locator;
pub mod models;
pub mod resolve;

pub use districts::{DistrictIndex, DistrictSource, LoadError};
pub use grid::{project, LambertGrid};
pub use locator::Locator;
pub use models::{format_for_display, DistrictAddress, GeoPoint, GridCell, Location};
pub use resolve::{CoordinateResolver, CoordinateTables};
