//! Catalog repository module for categories, amenities and location counts.

mod r#trait;
pub use r#trait::CatalogRepository;

mod mock;
pub use mock::MockCatalogRepository;
