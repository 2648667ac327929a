//! Core data models for district lookup and grid projection.

pub mod district;
pub mod point;

pub use district::{format_for_display, full_name, DistrictAddress, DistrictLevel, Location, SEPARATOR};
pub use point::{GeoPoint, GridCell};
