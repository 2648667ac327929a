//! District identifier list and the sources it is loaded from.

mod index;
mod source;

pub use index::DistrictIndex;
pub use source::{from_location, parse_districts, DistrictSource, FileSource, HttpSource, LoadError, StaticSource};
