//! Property search, creation and listing DTOs.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use mz_core::domain::entities::catalog::{Amenity, Category, SubCategory};
use mz_core::domain::entities::property::{
    CategoryType, CompletionStatus, OwnershipType, Property, PropertyDraft, PropertyPurpose,
    RentFrequency, Urgency,
};
use mz_core::services::property::PropertyQuery;

/// Query parameters for GET /properties.
///
/// CSV fields (`subCategoryIds`, `bedrooms`, `bathrooms`) stay raw strings;
/// the core filter builder owns the tokenizing rules.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub purpose: Option<PropertyPurpose>,
    pub category_type: Option<CategoryType>,
    pub sub_category_ids: Option<String>,
    pub city: Option<String>,
    pub community: Option<String>,
    pub rent_frequency: Option<RentFrequency>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,

    #[validate(range(min = 0))]
    pub min_price: Option<i64>,
    #[validate(range(min = 0))]
    pub max_price: Option<i64>,
    #[validate(range(min = 0))]
    pub exact_price: Option<i64>,
    #[validate(range(min = 0))]
    pub min_area_sqft: Option<i32>,
    #[validate(range(min = 0))]
    pub max_area_sqft: Option<i32>,

    pub sort: Option<String>,

    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1))]
    pub limit: Option<u32>,
}

impl From<SearchQuery> for PropertyQuery {
    fn from(query: SearchQuery) -> Self {
        PropertyQuery {
            q: query.q,
            purpose: query.purpose,
            category_type: query.category_type,
            sub_category_ids: query.sub_category_ids,
            city: query.city,
            community: query.community,
            rent_frequency: query.rent_frequency,
            bedrooms: query.bedrooms,
            bathrooms: query.bathrooms,
            min_price: query.min_price,
            max_price: query.max_price,
            exact_price: query.exact_price,
            min_area_sqft: query.min_area_sqft,
            max_area_sqft: query.max_area_sqft,
            sort: query.sort,
            page: query.page,
            limit: query.limit,
        }
    }
}

/// Query parameters for GET /properties/featured
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct FeaturedQuery {
    pub purpose: Option<PropertyPurpose>,
    #[validate(range(min = 1))]
    pub limit: Option<u32>,
}

/// Query parameters for GET /properties/{id}/similar
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct SimilarQuery {
    pub limit: Option<u32>,
}

/// Request body for POST /properties
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub purpose: PropertyPurpose,
    pub category_id: Uuid,
    pub sub_category_id: Option<Uuid>,
    pub reference_no: Option<String>,
    pub completion: Option<CompletionStatus>,

    #[validate(custom = "iso_date")]
    pub handover_date: Option<String>,

    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(range(min = 0))]
    pub bedrooms: i32,
    #[validate(range(min = 0))]
    pub bathrooms: i32,
    #[validate(range(min = 0))]
    pub area_sqft: i32,

    pub rent_frequency: Option<RentFrequency>,
    pub furnished: Option<bool>,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, message = "Community is required"))]
    pub community: String,

    pub location: Option<String>,
    pub notes: Option<String>,
    pub urgency: Option<Urgency>,
    pub developer_name: Option<String>,
    pub ownership: Option<OwnershipType>,

    #[validate(range(min = 0))]
    pub balcony_size_sqft: Option<i32>,
    pub parking_available: Option<bool>,
    pub building_name: Option<String>,
    #[validate(range(min = 0))]
    pub total_floors: Option<i32>,
    #[validate(range(min = 0))]
    pub swimming_pools: Option<i32>,
    #[validate(range(min = 0))]
    pub total_parking_spaces: Option<i32>,
    #[validate(range(min = 0))]
    pub total_building_area_sqft: Option<i32>,
    #[validate(range(min = 0))]
    pub elevators: Option<i32>,

    pub contact_name: Option<String>,
    /// Accepted for wire compatibility; the owner's account email always wins
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,

    #[validate(url(message = "coverImageUrl must be a valid URL"))]
    pub cover_image_url: String,

    #[validate(custom = "all_urls")]
    pub image_urls: Vec<String>,

    pub amenity_names: Option<Vec<String>>,
}

impl CreatePropertyRequest {
    /// Converts the validated request into a draft for the property service
    pub fn into_draft(self) -> PropertyDraft {
        let handover_date = self.handover_date.as_deref().and_then(parse_iso_date);
        PropertyDraft {
            title: self.title,
            description: self.description,
            purpose: self.purpose,
            category_id: self.category_id,
            sub_category_id: self.sub_category_id,
            reference_no: self.reference_no,
            price: self.price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            area_sqft: self.area_sqft,
            rent_frequency: self.rent_frequency,
            furnished: self.furnished.unwrap_or(false),
            completion: self.completion,
            handover_date,
            city: self.city,
            community: self.community,
            location: self.location,
            notes: self.notes,
            urgency: self.urgency,
            developer_name: self.developer_name,
            ownership: self.ownership,
            balcony_size_sqft: self.balcony_size_sqft,
            parking_available: self.parking_available,
            building_name: self.building_name,
            total_floors: self.total_floors,
            swimming_pools: self.swimming_pools,
            total_parking_spaces: self.total_parking_spaces,
            total_building_area_sqft: self.total_building_area_sqft,
            elevators: self.elevators,
            contact_name: self.contact_name,
            contact_phone: self.contact_phone,
            cover_image_url: self.cover_image_url,
            image_urls: self.image_urls,
            amenity_names: self.amenity_names.unwrap_or_default(),
        }
    }
}

/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date
fn parse_iso_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn iso_date(raw: &str) -> Result<(), ValidationError> {
    if parse_iso_date(raw).is_some() {
        return Ok(());
    }
    let mut error = ValidationError::new("iso_date");
    error.message = Some("handoverDate must be an ISO 8601 date".into());
    Err(error)
}

fn all_urls(urls: &[String]) -> Result<(), ValidationError> {
    if urls.iter().all(validator::validate_url) {
        return Ok(());
    }
    let mut error = ValidationError::new("url");
    error.message = Some("imageUrls must contain only valid URLs".into());
    Err(error)
}

/// A full listing as every property endpoint returns it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub reference_no: Option<String>,
    pub title: String,
    pub description: String,
    pub purpose: PropertyPurpose,
    pub category_id: Uuid,
    pub sub_category_id: Uuid,
    pub price: i64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area_sqft: i32,
    pub rent_frequency: Option<RentFrequency>,
    pub furnished: bool,
    pub completion: Option<CompletionStatus>,
    pub handover_date: Option<DateTime<Utc>>,
    pub city: String,
    pub community: String,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub urgency: Option<Urgency>,
    pub developer_name: Option<String>,
    pub ownership: Option<OwnershipType>,
    pub balcony_size_sqft: Option<i32>,
    pub parking_available: Option<bool>,
    pub building_name: Option<String>,
    pub total_floors: Option<i32>,
    pub swimming_pools: Option<i32>,
    pub total_parking_spaces: Option<i32>,
    pub total_building_area_sqft: Option<i32>,
    pub elevators: Option<i32>,
    pub contact_name: Option<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub cover_image_url: String,
    pub image_urls: Vec<String>,
    pub category: Category,
    pub sub_category: SubCategory,
    pub amenities: Vec<Amenity>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Property> for ListingResponse {
    fn from(property: Property) -> Self {
        Self {
            id: property.id,
            owner_id: property.owner_id,
            reference_no: property.reference_no,
            title: property.title,
            description: property.description,
            purpose: property.purpose,
            category_id: property.category.id,
            sub_category_id: property.sub_category.id,
            price: property.price,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            area_sqft: property.area_sqft,
            rent_frequency: property.rent_frequency,
            furnished: property.furnished,
            completion: property.completion,
            handover_date: property.handover_date,
            city: property.city,
            community: property.community,
            location: property.location,
            notes: property.notes,
            urgency: property.urgency,
            developer_name: property.developer_name,
            ownership: property.ownership,
            balcony_size_sqft: property.balcony_size_sqft,
            parking_available: property.parking_available,
            building_name: property.building_name,
            total_floors: property.total_floors,
            swimming_pools: property.swimming_pools,
            total_parking_spaces: property.total_parking_spaces,
            total_building_area_sqft: property.total_building_area_sqft,
            elevators: property.elevators,
            contact_name: property.contact_name,
            contact_email: property.contact_email,
            contact_phone: property.contact_phone,
            cover_image_url: property.cover_image_url,
            image_urls: property.image_urls,
            category: property.category,
            sub_category: property.sub_category,
            amenities: property.amenities,
            created_at: property.created_at,
            updated_at: property.updated_at,
        }
    }
}
