//! Business services containing domain logic and use cases.

pub mod auth;
pub mod mailer;
pub mod property;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use mailer::{Mailer, MockMailer, SentEmail};
pub use property::{PropertyQuery, PropertyService, PropertyServiceConfig, SortOrder};
pub use token::{TokenService, TokenServiceConfig};
