//! Representative coordinates for district identifiers.

mod resolver;
mod tables;

pub use resolver::CoordinateResolver;
pub use tables::{CoordinateTables, CAPITAL, PROVINCES, SEOUL, SEOUL_COUNTIES};
