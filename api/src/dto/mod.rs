//! Request and response DTOs for the HTTP layer.
//!
//! Requests reject unknown fields and carry `validator` rules mirroring the
//! frontend contract; responses re-shape domain types into the camelCase
//! wire format.

pub mod auth;
pub mod property;
