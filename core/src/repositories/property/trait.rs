//! Property repository trait defining the interface for listing persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::property::{Property, PropertyPurpose};
use crate::errors::DomainError;
use crate::services::property::filter::{PropertyFilter, SimilarCriteria};

/// Contract for listing persistence and retrieval.
///
/// Reads return listings with category, sub-category and amenities attached.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Runs a filtered, paginated search; returns the page plus the total
    /// match count
    async fn search(&self, filter: &PropertyFilter) -> Result<(Vec<Property>, u64), DomainError>;

    /// Finds a listing by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, DomainError>;

    /// Finds listings similar to a base listing, newest first
    async fn find_similar(&self, criteria: &SimilarCriteria) -> Result<Vec<Property>, DomainError>;

    /// Returns the newest listings, optionally restricted to a purpose
    async fn find_featured(
        &self,
        purpose: Option<PropertyPurpose>,
        limit: u32,
    ) -> Result<Vec<Property>, DomainError>;

    /// Persists a new listing, connecting amenities by name and creating
    /// the ones that do not exist yet
    async fn create(
        &self,
        property: Property,
        amenity_names: &[String],
    ) -> Result<Property, DomainError>;
}
