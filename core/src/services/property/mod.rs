//! Listing search, lookup and creation.

pub mod filter;

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::PropertyServiceConfig;
pub use filter::{PropertyFilter, PropertyQuery, SimilarCriteria, SortOrder};
pub use service::PropertyService;
