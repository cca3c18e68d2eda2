//! Request handlers, grouped by resource.

pub mod amenities;
pub mod auth;
pub mod error;
pub mod properties;

pub use error::ApiError;
