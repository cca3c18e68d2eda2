//! Search filter construction.
//!
//! Raw query parameters arrive as loose optional fields; this module
//! normalizes them into a [`PropertyFilter`] the repositories can execute.
//! Malformed CSV tokens are dropped rather than rejected, and over-long
//! token lists are truncated.

use uuid::Uuid;

use mz_shared::types::Pagination;

use crate::domain::entities::property::{
    CategoryType, Property, PropertyPurpose, RentFrequency,
};

/// Free-text search considers at most this many whitespace-separated tokens
pub const MAX_KEYWORDS: usize = 8;

/// Upper bound on sub-category ids accepted per search
pub const MAX_SUB_CATEGORY_IDS: usize = 25;

/// Upper bound on bedroom/bathroom thresholds accepted per search
pub const MAX_ROOM_FILTERS: usize = 10;

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

/// Raw search parameters as the API layer hands them over.
///
/// CSV fields (`sub_category_ids`, `bedrooms`, `bathrooms`) stay unparsed
/// here; [`PropertyFilter::from_query`] owns the tokenizing rules.
#[derive(Debug, Clone, Default)]
pub struct PropertyQuery {
    pub q: Option<String>,
    pub purpose: Option<PropertyPurpose>,
    pub category_type: Option<CategoryType>,
    pub sub_category_ids: Option<String>,
    pub city: Option<String>,
    pub community: Option<String>,
    pub rent_frequency: Option<RentFrequency>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub exact_price: Option<i64>,
    pub min_area_sqft: Option<i32>,
    pub max_area_sqft: Option<i32>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Normalized search filter executed by property repositories
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    /// Every keyword must match title, description, city or community
    pub keywords: Vec<String>,
    pub purpose: Option<PropertyPurpose>,
    pub category_type: Option<CategoryType>,
    pub sub_category_ids: Vec<Uuid>,
    pub city: Option<String>,
    pub community: Option<String>,
    pub rent_frequency: Option<RentFrequency>,
    /// Thresholds ORed together as `bedrooms >= n`
    pub bedrooms: Vec<i32>,
    /// Thresholds ORed together as `bathrooms >= n`
    pub bathrooms: Vec<i32>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_area_sqft: Option<i32>,
    pub max_area_sqft: Option<i32>,
    pub sort: SortOrder,
    pub pagination: Pagination,
}

impl PropertyFilter {
    /// Builds a filter from raw query parameters.
    pub fn from_query(query: PropertyQuery) -> Self {
        let keywords = query
            .q
            .as_deref()
            .map(|q| {
                q.split_whitespace()
                    .take(MAX_KEYWORDS)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let sub_category_ids = query
            .sub_category_ids
            .as_deref()
            .map(parse_csv_ids)
            .unwrap_or_default();

        let bedrooms = query
            .bedrooms
            .as_deref()
            .map(parse_room_thresholds)
            .unwrap_or_default();
        let bathrooms = query
            .bathrooms
            .as_deref()
            .map(parse_room_thresholds)
            .unwrap_or_default();

        // exactPrice pins both bounds; otherwise a reversed range is swapped
        let (min_price, max_price) = match query.exact_price {
            Some(exact) => (Some(exact), Some(exact)),
            None => match (query.min_price, query.max_price) {
                (Some(min), Some(max)) if min > max => (Some(max), Some(min)),
                other => other,
            },
        };

        let sort = query
            .sort
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        Self {
            keywords,
            purpose: query.purpose,
            category_type: query.category_type,
            sub_category_ids,
            city: query.city,
            community: query.community,
            rent_frequency: query.rent_frequency,
            bedrooms,
            bathrooms,
            min_price,
            max_price,
            min_area_sqft: query.min_area_sqft,
            max_area_sqft: query.max_area_sqft,
            sort,
            pagination: Pagination::new(query.page.unwrap_or(1), query.limit.unwrap_or(20)),
        }
    }

    /// Whether a property satisfies every active constraint.
    ///
    /// Mirrors the SQL the Postgres repository generates; the in-memory
    /// repository runs searches through this.
    pub fn matches(&self, property: &Property) -> bool {
        if !self.keywords.iter().all(|kw| {
            let kw = kw.to_lowercase();
            property.title.to_lowercase().contains(&kw)
                || property.description.to_lowercase().contains(&kw)
                || property.city.to_lowercase().contains(&kw)
                || property.community.to_lowercase().contains(&kw)
        }) {
            return false;
        }

        if let Some(purpose) = self.purpose {
            if property.purpose != purpose {
                return false;
            }
        }
        if let Some(category_type) = self.category_type {
            if property.category.category_type != category_type {
                return false;
            }
        }
        if !self.sub_category_ids.is_empty()
            && !self.sub_category_ids.contains(&property.sub_category.id)
        {
            return false;
        }
        if let Some(city) = &self.city {
            if &property.city != city {
                return false;
            }
        }
        if let Some(community) = &self.community {
            if &property.community != community {
                return false;
            }
        }
        if let Some(freq) = self.rent_frequency {
            if property.rent_frequency != Some(freq) {
                return false;
            }
        }
        if !self.bedrooms.is_empty() && !self.bedrooms.iter().any(|&n| property.bedrooms >= n) {
            return false;
        }
        if !self.bathrooms.is_empty() && !self.bathrooms.iter().any(|&n| property.bathrooms >= n) {
            return false;
        }
        if let Some(min) = self.min_price {
            if property.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if property.price > max {
                return false;
            }
        }
        if let Some(min) = self.min_area_sqft {
            if property.area_sqft < min {
                return false;
            }
        }
        if let Some(max) = self.max_area_sqft {
            if property.area_sqft > max {
                return false;
            }
        }

        true
    }
}

/// Criteria for the similar-properties lookup, derived from a base listing
#[derive(Debug, Clone)]
pub struct SimilarCriteria {
    pub exclude_id: Uuid,
    pub purpose: PropertyPurpose,
    pub category_id: Uuid,
    pub sub_category_id: Option<Uuid>,
    /// Price band, inclusive on both ends
    pub min_price: i64,
    pub max_price: i64,
    /// Match when either the community or the city coincides
    pub city: String,
    pub community: String,
    pub limit: u32,
}

impl SimilarCriteria {
    /// Derives criteria from a base listing: same purpose, category and
    /// sub-category, price within 75%..125%, same community or city.
    pub fn for_property(base: &Property, limit: u32) -> Self {
        let price = base.price as f64;
        let min_price = ((price * 0.75).floor() as i64).max(0);
        let max_price = (price * 1.25).ceil() as i64;

        Self {
            exclude_id: base.id,
            purpose: base.purpose,
            category_id: base.category.id,
            sub_category_id: Some(base.sub_category.id),
            min_price,
            max_price,
            city: base.city.clone(),
            community: base.community.clone(),
            limit,
        }
    }

    /// In-memory counterpart of the SQL the Postgres repository generates.
    pub fn matches(&self, property: &Property) -> bool {
        property.id != self.exclude_id
            && property.purpose == self.purpose
            && property.category.id == self.category_id
            && self
                .sub_category_id
                .map_or(true, |id| property.sub_category.id == id)
            && property.price >= self.min_price
            && property.price <= self.max_price
            && (property.community == self.community || property.city == self.city)
    }
}

fn parse_csv_ids(csv: &str) -> Vec<Uuid> {
    csv.split(',')
        .filter_map(|token| Uuid::parse_str(token.trim()).ok())
        .take(MAX_SUB_CATEGORY_IDS)
        .collect()
}

fn parse_room_thresholds(csv: &str) -> Vec<i32> {
    csv.split(',')
        .filter_map(|token| token.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.floor() as i32)
        .take(MAX_ROOM_FILTERS)
        .collect()
}
