//! Value objects shared between services and the API layer.

pub mod auth;
pub mod metadata;

pub use auth::{AuthSession, OtpResent, RegistrationStarted};
pub use metadata::{CategoryTree, CityCount, CommunityCount, ListingMetadata};
