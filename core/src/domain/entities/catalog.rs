//! Category, sub-category and amenity entities.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::property::CategoryType;

/// Top-level listing category (Residential, Commercial)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub sort_order: i32,
}

/// Second-level classification nested under a [`Category`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub id: Uuid,
    pub name: String,
    pub sort_order: i32,
    pub category_id: Uuid,
}

impl SubCategory {
    /// Whether this sub-category belongs to the given category
    pub fn belongs_to(&self, category_id: Uuid) -> bool {
        self.category_id == category_id
    }
}

/// Amenity attachable to listings (Balcony, Shared Pool, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: Uuid,
    pub name: String,
}
