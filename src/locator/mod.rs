//! District search and reverse lookup over a loaded district list.

pub mod nearest;
pub mod search;
mod service;

pub use search::MAX_RESULTS;
pub use service::Locator;
