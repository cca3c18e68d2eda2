//! Shared utilities and common types for the Manzil server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Validation helpers (email, password, phone)
//! - Pagination types

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig,
    MailConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{Page, Pagination};
pub use utils::validation;
