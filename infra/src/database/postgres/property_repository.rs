//! Postgres implementation of the PropertyRepository trait.
//!
//! Listings are read with their category and sub-category joined in; the
//! amenities for a result set are loaded in one follow-up query and grouped
//! in memory. Search translates a [`PropertyFilter`] into a dynamic WHERE
//! clause with `QueryBuilder`.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use mz_core::domain::entities::catalog::{Amenity, Category, SubCategory};
use mz_core::domain::entities::property::{Property, PropertyPurpose};
use mz_core::errors::DomainError;
use mz_core::repositories::PropertyRepository;
use mz_core::services::property::filter::{PropertyFilter, SimilarCriteria, SortOrder};

/// Shared SELECT for listing reads. Category and sub-category columns are
/// aliased so row mapping never collides with the foreign key columns.
const SELECT_PROPERTY: &str = r#"
SELECT
    p.id, p.owner_id, p.reference_no, p.title, p.description, p.purpose,
    p.price, p.bedrooms, p.bathrooms, p.area_sqft, p.rent_frequency,
    p.furnished, p.completion, p.handover_date, p.city, p.community,
    p.location, p.notes, p.urgency, p.developer_name, p.ownership,
    p.balcony_size_sqft, p.parking_available, p.building_name,
    p.total_floors, p.swimming_pools, p.total_parking_spaces,
    p.total_building_area_sqft, p.elevators, p.contact_name,
    p.contact_email, p.contact_phone, p.cover_image_url, p.image_urls,
    p.created_at, p.updated_at,
    c.id AS category_id, c.name AS category_name,
    c.type AS category_type, c.sort_order AS category_sort_order,
    s.id AS sub_category_id, s.name AS sub_category_name,
    s.sort_order AS sub_category_sort_order,
    s.category_id AS sub_category_parent_id
FROM properties p
JOIN categories c ON c.id = p.category_id
JOIN sub_categories s ON s.id = p.sub_category_id
"#;

const COUNT_PROPERTIES: &str = r#"
SELECT COUNT(*) AS count
FROM properties p
JOIN categories c ON c.id = p.category_id
JOIN sub_categories s ON s.id = p.sub_category_id
"#;

/// Postgres implementation of PropertyRepository
pub struct PgPropertyRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PgPropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a Property entity; amenities are attached
    /// separately
    fn row_to_property(row: &PgRow) -> Result<Property, DomainError> {
        let read = |e: sqlx::Error| DomainError::Database {
            message: format!("Failed to read property row: {}", e),
        };

        let purpose: String = row.try_get("purpose").map_err(read)?;
        let category_type: String = row.try_get("category_type").map_err(read)?;
        let rent_frequency: Option<String> = row.try_get("rent_frequency").map_err(read)?;
        let completion: Option<String> = row.try_get("completion").map_err(read)?;
        let urgency: Option<String> = row.try_get("urgency").map_err(read)?;
        let ownership: Option<String> = row.try_get("ownership").map_err(read)?;

        Ok(Property {
            id: row.try_get("id").map_err(read)?,
            owner_id: row.try_get("owner_id").map_err(read)?,
            reference_no: row.try_get("reference_no").map_err(read)?,
            title: row.try_get("title").map_err(read)?,
            description: row.try_get("description").map_err(read)?,
            purpose: parse_enum(&purpose, "purpose")?,
            category: Category {
                id: row.try_get("category_id").map_err(read)?,
                name: row.try_get("category_name").map_err(read)?,
                category_type: parse_enum(&category_type, "category type")?,
                sort_order: row.try_get("category_sort_order").map_err(read)?,
            },
            sub_category: SubCategory {
                id: row.try_get("sub_category_id").map_err(read)?,
                name: row.try_get("sub_category_name").map_err(read)?,
                sort_order: row.try_get("sub_category_sort_order").map_err(read)?,
                category_id: row.try_get("sub_category_parent_id").map_err(read)?,
            },
            price: row.try_get("price").map_err(read)?,
            bedrooms: row.try_get("bedrooms").map_err(read)?,
            bathrooms: row.try_get("bathrooms").map_err(read)?,
            area_sqft: row.try_get("area_sqft").map_err(read)?,
            rent_frequency: parse_opt_enum(rent_frequency, "rent frequency")?,
            furnished: row.try_get("furnished").map_err(read)?,
            completion: parse_opt_enum(completion, "completion status")?,
            handover_date: row.try_get("handover_date").map_err(read)?,
            city: row.try_get("city").map_err(read)?,
            community: row.try_get("community").map_err(read)?,
            location: row.try_get("location").map_err(read)?,
            notes: row.try_get("notes").map_err(read)?,
            urgency: parse_opt_enum(urgency, "urgency")?,
            developer_name: row.try_get("developer_name").map_err(read)?,
            ownership: parse_opt_enum(ownership, "ownership type")?,
            balcony_size_sqft: row.try_get("balcony_size_sqft").map_err(read)?,
            parking_available: row.try_get("parking_available").map_err(read)?,
            building_name: row.try_get("building_name").map_err(read)?,
            total_floors: row.try_get("total_floors").map_err(read)?,
            swimming_pools: row.try_get("swimming_pools").map_err(read)?,
            total_parking_spaces: row.try_get("total_parking_spaces").map_err(read)?,
            total_building_area_sqft: row.try_get("total_building_area_sqft").map_err(read)?,
            elevators: row.try_get("elevators").map_err(read)?,
            contact_name: row.try_get("contact_name").map_err(read)?,
            contact_email: row.try_get("contact_email").map_err(read)?,
            contact_phone: row.try_get("contact_phone").map_err(read)?,
            cover_image_url: row.try_get("cover_image_url").map_err(read)?,
            image_urls: row.try_get("image_urls").map_err(read)?,
            amenities: Vec::new(),
            created_at: row.try_get("created_at").map_err(read)?,
            updated_at: row.try_get("updated_at").map_err(read)?,
        })
    }

    /// Appends the WHERE clause a filter describes
    fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &PropertyFilter) {
        builder.push(" WHERE 1=1");

        // Every keyword must match at least one of the text columns
        for keyword in &filter.keywords {
            let pattern = format!("%{}%", escape_like(keyword));
            builder.push(" AND (p.title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR p.description ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR p.city ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR p.community ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        if let Some(purpose) = filter.purpose {
            builder.push(" AND p.purpose = ");
            builder.push_bind(purpose.as_str());
        }

        if let Some(category_type) = filter.category_type {
            builder.push(" AND c.type = ");
            builder.push_bind(category_type.as_str());
        }

        if !filter.sub_category_ids.is_empty() {
            builder.push(" AND p.sub_category_id = ANY(");
            builder.push_bind(filter.sub_category_ids.clone());
            builder.push(")");
        }

        if let Some(city) = &filter.city {
            builder.push(" AND p.city = ");
            builder.push_bind(city.clone());
        }

        if let Some(community) = &filter.community {
            builder.push(" AND p.community = ");
            builder.push_bind(community.clone());
        }

        if let Some(frequency) = filter.rent_frequency {
            builder.push(" AND p.rent_frequency = ");
            builder.push_bind(frequency.as_str());
        }

        if !filter.bedrooms.is_empty() {
            builder.push(" AND (");
            let mut thresholds = builder.separated(" OR ");
            for threshold in &filter.bedrooms {
                thresholds.push("p.bedrooms >= ");
                thresholds.push_bind_unseparated(*threshold);
            }
            builder.push(")");
        }

        if !filter.bathrooms.is_empty() {
            builder.push(" AND (");
            let mut thresholds = builder.separated(" OR ");
            for threshold in &filter.bathrooms {
                thresholds.push("p.bathrooms >= ");
                thresholds.push_bind_unseparated(*threshold);
            }
            builder.push(")");
        }

        if let Some(min_price) = filter.min_price {
            builder.push(" AND p.price >= ");
            builder.push_bind(min_price);
        }

        if let Some(max_price) = filter.max_price {
            builder.push(" AND p.price <= ");
            builder.push_bind(max_price);
        }

        if let Some(min_area) = filter.min_area_sqft {
            builder.push(" AND p.area_sqft >= ");
            builder.push_bind(min_area);
        }

        if let Some(max_area) = filter.max_area_sqft {
            builder.push(" AND p.area_sqft <= ");
            builder.push_bind(max_area);
        }
    }

    /// Loads the amenities for a result set in one query and attaches them
    async fn attach_amenities(&self, properties: &mut [Property]) -> Result<(), DomainError> {
        if properties.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = properties.iter().map(|p| p.id).collect();
        let rows = sqlx::query(
            r#"
            SELECT pa.property_id, a.id, a.name
            FROM property_amenities pa
            JOIN amenities a ON a.id = pa.amenity_id
            WHERE pa.property_id = ANY($1)
            ORDER BY a.name ASC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Database {
            message: format!("Failed to load amenities: {}", e),
        })?;

        let read = |e: sqlx::Error| DomainError::Database {
            message: format!("Failed to read amenity row: {}", e),
        };

        let mut by_property: HashMap<Uuid, Vec<Amenity>> = HashMap::new();
        for row in &rows {
            let property_id: Uuid = row.try_get("property_id").map_err(read)?;
            let amenity = Amenity {
                id: row.try_get("id").map_err(read)?,
                name: row.try_get("name").map_err(read)?,
            };
            by_property.entry(property_id).or_default().push(amenity);
        }

        for property in properties.iter_mut() {
            if let Some(amenities) = by_property.remove(&property.id) {
                property.amenities = amenities;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl PropertyRepository for PgPropertyRepository {
    async fn search(&self, filter: &PropertyFilter) -> Result<(Vec<Property>, u64), DomainError> {
        let mut count_builder = QueryBuilder::new(COUNT_PROPERTIES);
        Self::push_filters(&mut count_builder, filter);
        let count_row = count_builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to count listings: {}", e),
            })?;
        let total: i64 = count_row.try_get("count").map_err(|e| DomainError::Database {
            message: format!("Failed to read listing count: {}", e),
        })?;

        let mut builder = QueryBuilder::new(SELECT_PROPERTY);
        Self::push_filters(&mut builder, filter);
        builder.push(match filter.sort {
            SortOrder::Newest => " ORDER BY p.created_at DESC",
            SortOrder::Oldest => " ORDER BY p.created_at ASC",
        });
        builder.push(" LIMIT ");
        builder.push_bind(filter.pagination.limit_i64());
        builder.push(" OFFSET ");
        builder.push_bind(filter.pagination.offset_i64());

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to search listings: {}", e),
            })?;

        let mut properties = rows
            .iter()
            .map(Self::row_to_property)
            .collect::<Result<Vec<_>, _>>()?;
        self.attach_amenities(&mut properties).await?;

        Ok((properties, total as u64))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, DomainError> {
        let query = format!("{SELECT_PROPERTY} WHERE p.id = $1 LIMIT 1");

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find listing: {}", e),
            })?;

        match result {
            Some(row) => {
                let mut properties = vec![Self::row_to_property(&row)?];
                self.attach_amenities(&mut properties).await?;
                Ok(properties.pop())
            }
            None => Ok(None),
        }
    }

    async fn find_similar(&self, criteria: &SimilarCriteria) -> Result<Vec<Property>, DomainError> {
        let mut builder = QueryBuilder::new(SELECT_PROPERTY);
        builder.push(" WHERE p.id <> ");
        builder.push_bind(criteria.exclude_id);
        builder.push(" AND p.purpose = ");
        builder.push_bind(criteria.purpose.as_str());
        builder.push(" AND p.category_id = ");
        builder.push_bind(criteria.category_id);
        if let Some(sub_category_id) = criteria.sub_category_id {
            builder.push(" AND p.sub_category_id = ");
            builder.push_bind(sub_category_id);
        }
        builder.push(" AND p.price >= ");
        builder.push_bind(criteria.min_price);
        builder.push(" AND p.price <= ");
        builder.push_bind(criteria.max_price);
        builder.push(" AND (p.community = ");
        builder.push_bind(criteria.community.clone());
        builder.push(" OR p.city = ");
        builder.push_bind(criteria.city.clone());
        builder.push(") ORDER BY p.created_at DESC LIMIT ");
        builder.push_bind(criteria.limit as i64);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find similar listings: {}", e),
            })?;

        let mut properties = rows
            .iter()
            .map(Self::row_to_property)
            .collect::<Result<Vec<_>, _>>()?;
        self.attach_amenities(&mut properties).await?;

        Ok(properties)
    }

    async fn find_featured(
        &self,
        purpose: Option<PropertyPurpose>,
        limit: u32,
    ) -> Result<Vec<Property>, DomainError> {
        let mut builder = QueryBuilder::new(SELECT_PROPERTY);
        if let Some(purpose) = purpose {
            builder.push(" WHERE p.purpose = ");
            builder.push_bind(purpose.as_str());
        }
        builder.push(" ORDER BY p.created_at DESC LIMIT ");
        builder.push_bind(limit as i64);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to load featured listings: {}", e),
            })?;

        let mut properties = rows
            .iter()
            .map(Self::row_to_property)
            .collect::<Result<Vec<_>, _>>()?;
        self.attach_amenities(&mut properties).await?;

        Ok(properties)
    }

    async fn create(
        &self,
        mut property: Property,
        amenity_names: &[String],
    ) -> Result<Property, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| DomainError::Database {
            message: format!("Failed to open transaction: {}", e),
        })?;

        let insert = r#"
            INSERT INTO properties (
                id, owner_id, category_id, sub_category_id, reference_no,
                title, description, purpose, price, bedrooms, bathrooms,
                area_sqft, rent_frequency, furnished, completion,
                handover_date, city, community, location, notes, urgency,
                developer_name, ownership, balcony_size_sqft,
                parking_available, building_name, total_floors,
                swimming_pools, total_parking_spaces,
                total_building_area_sqft, elevators, contact_name,
                contact_email, contact_phone, cover_image_url, image_urls,
                created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26,
                $27, $28, $29, $30, $31, $32, $33, $34, $35, $36, $37, $38
            )
        "#;

        sqlx::query(insert)
            .bind(property.id)
            .bind(property.owner_id)
            .bind(property.category.id)
            .bind(property.sub_category.id)
            .bind(&property.reference_no)
            .bind(&property.title)
            .bind(&property.description)
            .bind(property.purpose.as_str())
            .bind(property.price)
            .bind(property.bedrooms)
            .bind(property.bathrooms)
            .bind(property.area_sqft)
            .bind(property.rent_frequency.map(|f| f.as_str()))
            .bind(property.furnished)
            .bind(property.completion.map(|c| c.as_str()))
            .bind(property.handover_date)
            .bind(&property.city)
            .bind(&property.community)
            .bind(&property.location)
            .bind(&property.notes)
            .bind(property.urgency.map(|u| u.as_str()))
            .bind(&property.developer_name)
            .bind(property.ownership.map(|o| o.as_str()))
            .bind(property.balcony_size_sqft)
            .bind(property.parking_available)
            .bind(&property.building_name)
            .bind(property.total_floors)
            .bind(property.swimming_pools)
            .bind(property.total_parking_spaces)
            .bind(property.total_building_area_sqft)
            .bind(property.elevators)
            .bind(&property.contact_name)
            .bind(&property.contact_email)
            .bind(&property.contact_phone)
            .bind(&property.cover_image_url)
            .bind(&property.image_urls)
            .bind(property.created_at)
            .bind(property.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to create listing: {}", e),
            })?;

        // Connect amenities by name, creating missing ones
        let mut amenities = Vec::with_capacity(amenity_names.len());
        for name in amenity_names {
            let row = sqlx::query(
                r#"
                INSERT INTO amenities (id, name) VALUES ($1, $2)
                ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
                RETURNING id, name
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(name)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to connect amenity: {}", e),
            })?;

            let amenity = Amenity {
                id: row.try_get("id").map_err(|e| DomainError::Database {
                    message: format!("Failed to read amenity row: {}", e),
                })?,
                name: row.try_get("name").map_err(|e| DomainError::Database {
                    message: format!("Failed to read amenity row: {}", e),
                })?,
            };

            sqlx::query(
                "INSERT INTO property_amenities (property_id, amenity_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(property.id)
            .bind(amenity.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to link amenity: {}", e),
            })?;

            amenities.push(amenity);
        }

        tx.commit().await.map_err(|e| DomainError::Database {
            message: format!("Failed to commit listing: {}", e),
        })?;

        property.amenities = amenities;
        Ok(property)
    }
}

/// Parse a TEXT column into one of the domain enums
fn parse_enum<T>(value: &str, what: &str) -> Result<T, DomainError>
where
    T: FromStr<Err = String>,
{
    T::from_str(value).map_err(|e| DomainError::Database {
        message: format!("Invalid {} in row: {}", what, e),
    })
}

fn parse_opt_enum<T>(value: Option<String>, what: &str) -> Result<Option<T>, DomainError>
where
    T: FromStr<Err = String>,
{
    value.map(|v| parse_enum(&v, what)).transpose()
}

/// Escape LIKE wildcards so keywords match literally
fn escape_like(keyword: &str) -> String {
    keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mz_core::domain::entities::property::{CompletionStatus, RentFrequency};

    #[test]
    fn test_escape_like_handles_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_parse_enum_round_trips_column_values() {
        let purpose: PropertyPurpose = parse_enum("rent", "purpose").unwrap();
        assert_eq!(purpose, PropertyPurpose::Rent);

        let completion: Option<CompletionStatus> =
            parse_opt_enum(Some("off_plan".to_string()), "completion status").unwrap();
        assert_eq!(completion, Some(CompletionStatus::OffPlan));

        let none: Option<RentFrequency> = parse_opt_enum(None, "rent frequency").unwrap();
        assert_eq!(none, None);
    }

    #[test]
    fn test_parse_enum_rejects_unknown_values() {
        let result: Result<PropertyPurpose, _> = parse_enum("lease", "purpose");
        assert!(result.is_err());
    }
}
