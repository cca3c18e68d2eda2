//! Repository traits and their in-memory mock implementations.
//!
//! SQL-backed implementations live in the infrastructure crate; the mocks
//! here back service unit tests and API integration tests.

pub mod catalog;
pub mod property;
pub mod user;

pub use catalog::{CatalogRepository, MockCatalogRepository};
pub use property::{MockPropertyRepository, PropertyRepository};
pub use user::{MockUserRepository, UserRepository};
