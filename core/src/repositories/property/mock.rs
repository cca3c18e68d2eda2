//! Mock implementation of PropertyRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::catalog::Amenity;
use crate::domain::entities::property::{Property, PropertyPurpose};
use crate::errors::DomainError;
use crate::services::property::filter::{PropertyFilter, SimilarCriteria, SortOrder};

use super::r#trait::PropertyRepository;

/// In-memory property repository for tests.
///
/// Searches run through the same predicate logic the SQL repository
/// expresses in WHERE clauses.
pub struct MockPropertyRepository {
    properties: Arc<RwLock<Vec<Property>>>,
    amenities: Arc<RwLock<HashMap<String, Amenity>>>,
}

impl MockPropertyRepository {
    pub fn new() -> Self {
        Self {
            properties: Arc::new(RwLock::new(Vec::new())),
            amenities: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seeds a listing directly
    pub async fn insert(&self, property: Property) {
        self.properties.write().await.push(property);
    }

    pub async fn count(&self) -> usize {
        self.properties.read().await.len()
    }

    fn sort_newest_first(items: &mut [Property]) {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}

impl Default for MockPropertyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertyRepository for MockPropertyRepository {
    async fn search(&self, filter: &PropertyFilter) -> Result<(Vec<Property>, u64), DomainError> {
        let properties = self.properties.read().await;
        let mut matched: Vec<Property> = properties
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        match filter.sort {
            SortOrder::Newest => Self::sort_newest_first(&mut matched),
            SortOrder::Oldest => matched.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        }

        let total = matched.len() as u64;
        let page: Vec<Property> = matched
            .into_iter()
            .skip(filter.pagination.offset() as usize)
            .take(filter.pagination.limit as usize)
            .collect();

        Ok((page, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, DomainError> {
        let properties = self.properties.read().await;
        Ok(properties.iter().find(|p| p.id == id).cloned())
    }

    async fn find_similar(&self, criteria: &SimilarCriteria) -> Result<Vec<Property>, DomainError> {
        let properties = self.properties.read().await;
        let mut matched: Vec<Property> = properties
            .iter()
            .filter(|p| criteria.matches(p))
            .cloned()
            .collect();

        Self::sort_newest_first(&mut matched);
        matched.truncate(criteria.limit as usize);
        Ok(matched)
    }

    async fn find_featured(
        &self,
        purpose: Option<PropertyPurpose>,
        limit: u32,
    ) -> Result<Vec<Property>, DomainError> {
        let properties = self.properties.read().await;
        let mut matched: Vec<Property> = properties
            .iter()
            .filter(|p| purpose.map_or(true, |wanted| p.purpose == wanted))
            .cloned()
            .collect();

        Self::sort_newest_first(&mut matched);
        matched.truncate(limit as usize);
        Ok(matched)
    }

    async fn create(
        &self,
        mut property: Property,
        amenity_names: &[String],
    ) -> Result<Property, DomainError> {
        let mut amenities = self.amenities.write().await;
        property.amenities = amenity_names
            .iter()
            .map(|name| {
                amenities
                    .entry(name.clone())
                    .or_insert_with(|| Amenity {
                        id: Uuid::new_v4(),
                        name: name.clone(),
                    })
                    .clone()
            })
            .collect();
        drop(amenities);

        self.properties.write().await.push(property.clone());
        Ok(property)
    }
}
