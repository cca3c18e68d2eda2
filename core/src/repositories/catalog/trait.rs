//! Catalog repository trait covering lookup data for forms and filters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::catalog::{Amenity, Category, SubCategory};
use crate::domain::value_objects::metadata::{CategoryTree, CityCount, CommunityCount};
use crate::errors::DomainError;

/// Contract for catalog lookups.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// All amenities, ordered by name
    async fn list_amenities(&self) -> Result<Vec<Amenity>, DomainError>;

    /// All categories with sub-categories nested, ordered by sort order
    async fn list_categories(&self) -> Result<Vec<CategoryTree>, DomainError>;

    /// Finds a category by id
    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, DomainError>;

    /// Finds a sub-category by id
    async fn find_sub_category(&self, id: Uuid) -> Result<Option<SubCategory>, DomainError>;

    /// Listing counts grouped by city, most listings first
    async fn city_counts(&self) -> Result<Vec<CityCount>, DomainError>;

    /// Listing counts grouped by community, most listings first
    async fn community_counts(&self) -> Result<Vec<CommunityCount>, DomainError>;
}
