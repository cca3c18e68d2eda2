//! # Infrastructure Layer
//!
//! Concrete implementations behind the `mz_core` abstractions: Postgres
//! repositories via SQLx and SMTP mail delivery via lettre.

/// Database module - Postgres implementations using SQLx
pub mod database;

/// Mail module - SMTP delivery
pub mod mail;

// Re-export commonly used types
pub use database::connection::{DatabasePool, PoolStatistics};
pub use database::postgres::{PgCatalogRepository, PgPropertyRepository, PgUserRepository};
pub use mail::SmtpMailer;
