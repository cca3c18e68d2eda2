//! Postgres repository implementations

mod catalog_repository;
mod property_repository;
mod user_repository;

pub use catalog_repository::PgCatalogRepository;
pub use property_repository::PgPropertyRepository;
pub use user_repository::PgUserRepository;
