//! Main property service implementation

use std::sync::Arc;

use uuid::Uuid;

use mz_shared::types::Page;

use crate::domain::entities::catalog::Amenity;
use crate::domain::entities::property::{Property, PropertyDraft, PropertyPurpose};
use crate::domain::value_objects::metadata::ListingMetadata;
use crate::errors::{DomainResult, PropertyError};
use crate::repositories::{CatalogRepository, PropertyRepository, UserRepository};
use crate::services::mailer::{templates, Mailer};
use crate::services::property::filter::{PropertyFilter, PropertyQuery, SimilarCriteria};

use super::config::PropertyServiceConfig;

/// Property service covering search, lookups and listing creation
pub struct PropertyService<P, C, U, M>
where
    P: PropertyRepository,
    C: CatalogRepository,
    U: UserRepository,
    M: Mailer,
{
    /// Listing persistence
    property_repository: Arc<P>,
    /// Category, sub-category and amenity lookups
    catalog_repository: Arc<C>,
    /// Owner lookups for listing creation
    user_repository: Arc<U>,
    /// Outbound email
    mailer: Arc<M>,
    /// Service configuration
    config: PropertyServiceConfig,
}

impl<P, C, U, M> PropertyService<P, C, U, M>
where
    P: PropertyRepository,
    C: CatalogRepository,
    U: UserRepository,
    M: Mailer,
{
    pub fn new(
        property_repository: Arc<P>,
        catalog_repository: Arc<C>,
        user_repository: Arc<U>,
        mailer: Arc<M>,
        config: PropertyServiceConfig,
    ) -> Self {
        Self {
            property_repository,
            catalog_repository,
            user_repository,
            mailer,
            config,
        }
    }

    /// Runs a filtered, paginated search
    pub async fn search(&self, query: PropertyQuery) -> DomainResult<Page<Property>> {
        let filter = PropertyFilter::from_query(query);
        let (items, total) = self.property_repository.search(&filter).await?;
        Ok(Page::new(items, filter.pagination, total))
    }

    /// Loads a single listing
    pub async fn get(&self, id: Uuid) -> DomainResult<Property> {
        self.property_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| PropertyError::NotFound.into())
    }

    /// Finds listings similar to a base listing.
    ///
    /// An unknown base id yields an empty list rather than an error, so the
    /// widget on a stale detail page degrades quietly.
    pub async fn similar(&self, id: Uuid, limit: Option<u32>) -> DomainResult<Vec<Property>> {
        let take = limit
            .map(|l| l.clamp(1, self.config.max_similar_limit))
            .unwrap_or(self.config.default_similar_limit);

        let base = match self.property_repository.find_by_id(id).await? {
            Some(base) => base,
            None => return Ok(Vec::new()),
        };

        let criteria = SimilarCriteria::for_property(&base, take);
        self.property_repository.find_similar(&criteria).await
    }

    /// Aggregated lookup data for search filters and the listing form
    pub async fn metadata(&self) -> DomainResult<ListingMetadata> {
        let amenities = self.catalog_repository.list_amenities().await?;
        let categories = self.catalog_repository.list_categories().await?;
        let cities = self.catalog_repository.city_counts().await?;
        let communities = self.catalog_repository.community_counts().await?;

        Ok(ListingMetadata {
            purposes: vec![PropertyPurpose::Rent, PropertyPurpose::Sale],
            categories,
            amenities,
            cities,
            communities,
        })
    }

    /// All amenities, sorted by name
    pub async fn amenities(&self) -> DomainResult<Vec<Amenity>> {
        self.catalog_repository.list_amenities().await
    }

    /// Newest listings, optionally restricted to a purpose
    pub async fn featured(
        &self,
        purpose: Option<PropertyPurpose>,
        limit: Option<u32>,
    ) -> DomainResult<Vec<Property>> {
        let take = limit.unwrap_or(self.config.default_featured_limit);
        self.property_repository.find_featured(purpose, take).await
    }

    /// Validates and stores a new listing, then emails the owner a summary.
    ///
    /// This method:
    /// 1. Resolves the owner and the category pair, rejecting mismatches
    /// 2. Enforces the purpose and category business rules
    /// 3. Persists the listing with amenities connected by name
    /// 4. Sends the submission summary email; a mail failure is logged and
    ///    swallowed because the listing is already stored
    pub async fn create(&self, owner_id: Uuid, draft: PropertyDraft) -> DomainResult<Property> {
        // Step 1: Resolve owner, category and sub-category
        let owner = self
            .user_repository
            .find_by_id(owner_id)
            .await?
            .ok_or(PropertyError::InvalidUser)?;
        let category = self
            .catalog_repository
            .find_category(draft.category_id)
            .await?
            .ok_or(PropertyError::InvalidCategory)?;

        let sub_category_id = draft
            .sub_category_id
            .ok_or(PropertyError::SubCategoryRequired)?;
        let sub_category = self
            .catalog_repository
            .find_sub_category(sub_category_id)
            .await?
            .filter(|sub| sub.belongs_to(category.id))
            .ok_or(PropertyError::InvalidSubCategory)?;

        // Step 2: Business rules
        match draft.purpose {
            PropertyPurpose::Sale if draft.rent_frequency.is_some() => {
                return Err(PropertyError::RentFrequencyNotAllowed.into());
            }
            PropertyPurpose::Rent if draft.rent_frequency.is_none() => {
                return Err(PropertyError::RentFrequencyRequired.into());
            }
            _ => {}
        }

        if category.category_type.is_commercial() {
            if draft.bedrooms != 0 || draft.bathrooms != 0 {
                return Err(PropertyError::CommercialRoomsNotAllowed.into());
            }
        } else if draft.bedrooms < 0 || draft.bathrooms < 0 {
            return Err(PropertyError::InvalidRooms.into());
        }

        if draft.area_sqft <= 0 {
            return Err(PropertyError::InvalidArea.into());
        }
        if draft.price <= 0 {
            return Err(PropertyError::InvalidPrice.into());
        }

        // Step 3: Persist
        let amenity_names = draft.amenity_names.clone();
        let property = Property::new(&owner, category, sub_category, draft);
        let created = self
            .property_repository
            .create(property, &amenity_names)
            .await?;

        tracing::info!(property_id = %created.id, "listing created");

        // Step 4: Confirmation email, best effort
        if let Err(e) = self.send_submission_email(&owner.email, &created).await {
            tracing::error!(property_id = %created.id, error = %e, "property submission email failed");
        }

        Ok(created)
    }

    async fn send_submission_email(
        &self,
        to: &str,
        created: &Property,
    ) -> DomainResult<()> {
        let purpose_label = match created.purpose {
            PropertyPurpose::Rent => "For rent",
            PropertyPurpose::Sale => "For sale",
        };
        let price_label = created.price_label();
        let type_label = created.sub_category.name.as_str();
        let location_line = created.location_line();
        let property_url = format!("{}/properties/{}", self.config.frontend_origin, created.id);

        let listing = templates::SubmittedListing {
            title: &created.title,
            purpose_label,
            price_label: &price_label,
            type_label,
            location_line: &location_line,
            beds: created.bedrooms,
            baths: created.bathrooms,
            area_sqft: created.area_sqft,
            property_url: &property_url,
            reference_no: created.reference_no.as_deref(),
        };

        self.mailer
            .send_html(
                to,
                templates::SUBMITTED_SUBJECT,
                &templates::property_submitted_email(&listing),
            )
            .await
    }
}
