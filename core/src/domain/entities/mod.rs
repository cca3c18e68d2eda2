//! Domain entities for the Manzil marketplace.

pub mod catalog;
pub mod property;
pub mod token;
pub mod user;

pub use catalog::{Amenity, Category, SubCategory};
pub use property::{
    CategoryType, CompletionStatus, OwnershipType, Property, PropertyDraft, PropertyPurpose,
    RentFrequency, Urgency,
};
pub use token::AccessClaims;
pub use user::User;
