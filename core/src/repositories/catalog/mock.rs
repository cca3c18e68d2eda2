//! Mock implementation of CatalogRepository for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::catalog::{Amenity, Category, SubCategory};
use crate::domain::entities::property::CategoryType;
use crate::domain::value_objects::metadata::{CategoryTree, CityCount, CommunityCount};
use crate::errors::DomainError;

use super::r#trait::CatalogRepository;

#[derive(Default)]
struct CatalogState {
    categories: Vec<Category>,
    sub_categories: Vec<SubCategory>,
    amenities: Vec<Amenity>,
    city_counts: Vec<CityCount>,
    community_counts: Vec<CommunityCount>,
}

/// In-memory catalog repository for tests
pub struct MockCatalogRepository {
    state: Arc<RwLock<CatalogState>>,
}

impl MockCatalogRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(CatalogState::default())),
        }
    }

    /// Seeds a category and returns it
    pub async fn add_category(&self, name: &str, category_type: CategoryType) -> Category {
        let mut state = self.state.write().await;
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category_type,
            sort_order: state.categories.len() as i32 + 1,
        };
        state.categories.push(category.clone());
        category
    }

    /// Seeds a sub-category under a category and returns it
    pub async fn add_sub_category(&self, category_id: Uuid, name: &str) -> SubCategory {
        let mut state = self.state.write().await;
        let sub = SubCategory {
            id: Uuid::new_v4(),
            name: name.to_string(),
            sort_order: state.sub_categories.len() as i32 + 1,
            category_id,
        };
        state.sub_categories.push(sub.clone());
        sub
    }

    pub async fn add_amenity(&self, name: &str) -> Amenity {
        let mut state = self.state.write().await;
        let amenity = Amenity {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        state.amenities.push(amenity.clone());
        amenity
    }

    pub async fn set_city_counts(&self, counts: Vec<CityCount>) {
        self.state.write().await.city_counts = counts;
    }

    pub async fn set_community_counts(&self, counts: Vec<CommunityCount>) {
        self.state.write().await.community_counts = counts;
    }
}

impl Default for MockCatalogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogRepository for MockCatalogRepository {
    async fn list_amenities(&self) -> Result<Vec<Amenity>, DomainError> {
        let state = self.state.read().await;
        let mut amenities = state.amenities.clone();
        amenities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(amenities)
    }

    async fn list_categories(&self) -> Result<Vec<CategoryTree>, DomainError> {
        let state = self.state.read().await;
        let mut categories = state.categories.clone();
        categories.sort_by_key(|c| c.sort_order);

        Ok(categories
            .into_iter()
            .map(|category| {
                let mut subs: Vec<SubCategory> = state
                    .sub_categories
                    .iter()
                    .filter(|s| s.category_id == category.id)
                    .cloned()
                    .collect();
                subs.sort_by_key(|s| s.sort_order);
                CategoryTree {
                    category,
                    sub_categories: subs,
                }
            })
            .collect())
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        let state = self.state.read().await;
        Ok(state.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_sub_category(&self, id: Uuid) -> Result<Option<SubCategory>, DomainError> {
        let state = self.state.read().await;
        Ok(state.sub_categories.iter().find(|s| s.id == id).cloned())
    }

    async fn city_counts(&self) -> Result<Vec<CityCount>, DomainError> {
        Ok(self.state.read().await.city_counts.clone())
    }

    async fn community_counts(&self) -> Result<Vec<CommunityCount>, DomainError> {
        Ok(self.state.read().await.community_counts.clone())
    }
}
