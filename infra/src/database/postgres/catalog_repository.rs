//! Postgres implementation of the CatalogRepository trait.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use mz_core::domain::entities::catalog::{Amenity, Category, SubCategory};
use mz_core::domain::entities::property::CategoryType;
use mz_core::domain::value_objects::metadata::{CategoryTree, CityCount, CommunityCount};
use mz_core::errors::DomainError;
use mz_core::repositories::CatalogRepository;

/// Postgres implementation of CatalogRepository
pub struct PgCatalogRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_category(row: &PgRow) -> Result<Category, DomainError> {
        let read = |e: sqlx::Error| DomainError::Database {
            message: format!("Failed to read category row: {}", e),
        };

        let category_type: String = row.try_get("type").map_err(read)?;
        Ok(Category {
            id: row.try_get("id").map_err(read)?,
            name: row.try_get("name").map_err(read)?,
            category_type: CategoryType::from_str(&category_type).map_err(|e| {
                DomainError::Database {
                    message: format!("Invalid category type: {}", e),
                }
            })?,
            sort_order: row.try_get("sort_order").map_err(read)?,
        })
    }

    fn row_to_sub_category(row: &PgRow) -> Result<SubCategory, DomainError> {
        let read = |e: sqlx::Error| DomainError::Database {
            message: format!("Failed to read sub-category row: {}", e),
        };

        Ok(SubCategory {
            id: row.try_get("id").map_err(read)?,
            name: row.try_get("name").map_err(read)?,
            sort_order: row.try_get("sort_order").map_err(read)?,
            category_id: row.try_get("category_id").map_err(read)?,
        })
    }

    fn row_to_amenity(row: &PgRow) -> Result<Amenity, DomainError> {
        let read = |e: sqlx::Error| DomainError::Database {
            message: format!("Failed to read amenity row: {}", e),
        };

        Ok(Amenity {
            id: row.try_get("id").map_err(read)?,
            name: row.try_get("name").map_err(read)?,
        })
    }

    fn row_to_count(row: &PgRow) -> Result<(String, i64), DomainError> {
        let read = |e: sqlx::Error| DomainError::Database {
            message: format!("Failed to read count row: {}", e),
        };

        Ok((
            row.try_get("name").map_err(read)?,
            row.try_get("count").map_err(read)?,
        ))
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_amenities(&self) -> Result<Vec<Amenity>, DomainError> {
        let rows = sqlx::query("SELECT id, name FROM amenities ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to list amenities: {}", e),
            })?;

        rows.iter().map(Self::row_to_amenity).collect()
    }

    async fn list_categories(&self) -> Result<Vec<CategoryTree>, DomainError> {
        let category_rows = sqlx::query(
            "SELECT id, name, type, sort_order FROM categories ORDER BY sort_order ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Database {
            message: format!("Failed to list categories: {}", e),
        })?;

        let sub_rows = sqlx::query(
            "SELECT id, name, sort_order, category_id FROM sub_categories ORDER BY sort_order ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Database {
            message: format!("Failed to list sub-categories: {}", e),
        })?;

        let mut subs: Vec<SubCategory> = Vec::with_capacity(sub_rows.len());
        for row in &sub_rows {
            subs.push(Self::row_to_sub_category(row)?);
        }

        let mut trees = Vec::with_capacity(category_rows.len());
        for row in &category_rows {
            let category = Self::row_to_category(row)?;
            let sub_categories = subs
                .iter()
                .filter(|s| s.category_id == category.id)
                .cloned()
                .collect();
            trees.push(CategoryTree {
                category,
                sub_categories,
            });
        }

        Ok(trees)
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        let result = sqlx::query(
            "SELECT id, name, type, sort_order FROM categories WHERE id = $1 LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Database {
            message: format!("Failed to find category: {}", e),
        })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_category(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_sub_category(&self, id: Uuid) -> Result<Option<SubCategory>, DomainError> {
        let result = sqlx::query(
            "SELECT id, name, sort_order, category_id FROM sub_categories WHERE id = $1 LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Database {
            message: format!("Failed to find sub-category: {}", e),
        })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_sub_category(&row)?)),
            None => Ok(None),
        }
    }

    async fn city_counts(&self) -> Result<Vec<CityCount>, DomainError> {
        let rows = sqlx::query(
            "SELECT city AS name, COUNT(*) AS count FROM properties GROUP BY city ORDER BY count DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Database {
            message: format!("Failed to count listings by city: {}", e),
        })?;

        rows.iter()
            .map(|row| Self::row_to_count(row).map(|(name, count)| CityCount { name, count }))
            .collect()
    }

    async fn community_counts(&self) -> Result<Vec<CommunityCount>, DomainError> {
        let rows = sqlx::query(
            "SELECT community AS name, COUNT(*) AS count FROM properties GROUP BY community ORDER BY count DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Database {
            message: format!("Failed to count listings by community: {}", e),
        })?;

        rows.iter()
            .map(|row| Self::row_to_count(row).map(|(name, count)| CommunityCount { name, count }))
            .collect()
    }
}
