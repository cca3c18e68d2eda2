//! Tests for `PropertyService` covering search, similar listings, metadata
//! and the listing creation rules.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::catalog::{Category, SubCategory};
use crate::domain::entities::property::{CategoryType, PropertyDraft, PropertyPurpose, RentFrequency};
use crate::domain::entities::user::User;
use crate::domain::value_objects::metadata::{CityCount, CommunityCount};
use crate::errors::{DomainError, PropertyError};
use crate::repositories::{MockCatalogRepository, MockPropertyRepository, MockUserRepository};
use crate::services::mailer::{templates, MockMailer};
use crate::services::property::{PropertyQuery, PropertyService, PropertyServiceConfig};

struct Setup {
    service: PropertyService<MockPropertyRepository, MockCatalogRepository, MockUserRepository, MockMailer>,
    properties: Arc<MockPropertyRepository>,
    mailer: Arc<MockMailer>,
    owner: User,
    residential: Category,
    apartment: SubCategory,
    commercial: Category,
    office: SubCategory,
}

async fn setup() -> Setup {
    let properties = Arc::new(MockPropertyRepository::new());
    let catalog = Arc::new(MockCatalogRepository::new());
    let users = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockMailer::new());

    let residential = catalog
        .add_category("Residential", CategoryType::Residential)
        .await;
    let apartment = catalog.add_sub_category(residential.id, "Apartment").await;
    let commercial = catalog
        .add_category("Commercial", CategoryType::Commercial)
        .await;
    let office = catalog.add_sub_category(commercial.id, "Office").await;

    catalog.add_amenity("Balcony").await;
    catalog.add_amenity("Central A/C").await;
    catalog
        .set_city_counts(vec![CityCount {
            name: "Dubai".to_string(),
            count: 3,
        }])
        .await;
    catalog
        .set_community_counts(vec![CommunityCount {
            name: "Dubai Marina".to_string(),
            count: 2,
        }])
        .await;

    let mut owner = User::new("owner@example.com".to_string(), "hash".to_string())
        .with_profile(Some("Lina Haddad".to_string()), Some("+971501112233".to_string()));
    owner.mark_email_verified();
    users.insert(owner.clone()).await;

    let service = PropertyService::new(
        Arc::clone(&properties),
        Arc::clone(&catalog),
        Arc::clone(&users),
        Arc::clone(&mailer),
        PropertyServiceConfig::default(),
    );

    Setup {
        service,
        properties,
        mailer,
        owner,
        residential,
        apartment,
        commercial,
        office,
    }
}

/// Yearly rental apartment in Dubai Marina
fn draft(category_id: Uuid, sub_category_id: Uuid) -> PropertyDraft {
    PropertyDraft {
        title: "Bright 2BR with marina view".to_string(),
        description: "Spacious two bedroom apartment close to the tram".to_string(),
        purpose: PropertyPurpose::Rent,
        category_id,
        sub_category_id: Some(sub_category_id),
        reference_no: None,
        price: 85_000,
        bedrooms: 2,
        bathrooms: 2,
        area_sqft: 1_150,
        rent_frequency: Some(RentFrequency::Yearly),
        furnished: true,
        completion: None,
        handover_date: None,
        city: "Dubai".to_string(),
        community: "Dubai Marina".to_string(),
        location: Some("Marina Promenade".to_string()),
        notes: None,
        urgency: None,
        developer_name: None,
        ownership: None,
        balcony_size_sqft: None,
        parking_available: Some(true),
        building_name: None,
        total_floors: None,
        swimming_pools: None,
        total_parking_spaces: None,
        total_building_area_sqft: None,
        elevators: None,
        contact_name: None,
        contact_phone: None,
        cover_image_url: "https://cdn.example.com/cover.jpg".to_string(),
        image_urls: vec!["https://cdn.example.com/1.jpg".to_string()],
        amenity_names: Vec::new(),
    }
}

fn sale_draft(category_id: Uuid, sub_category_id: Uuid) -> PropertyDraft {
    let mut d = draft(category_id, sub_category_id);
    d.purpose = PropertyPurpose::Sale;
    d.rent_frequency = None;
    d.price = 1_000_000;
    d
}

// === Search ===

#[tokio::test]
async fn test_search_paginates_and_reports_has_more() {
    let s = setup().await;
    for i in 0..25 {
        let mut d = draft(s.residential.id, s.apartment.id);
        d.title = format!("Listing {}", i);
        s.service.create(s.owner.id, d).await.unwrap();
    }

    let first = s
        .service
        .search(PropertyQuery {
            page: Some(1),
            limit: Some(20),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(first.items.len(), 20);
    assert_eq!(first.total, 25);
    assert!(first.has_more);

    let second = s
        .service
        .search(PropertyQuery {
            page: Some(2),
            limit: Some(20),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(second.items.len(), 5);
    assert_eq!(second.page, 2);
    assert!(!second.has_more);
}

#[tokio::test]
async fn test_search_filters_by_purpose_and_city() {
    let s = setup().await;
    s.service
        .create(s.owner.id, draft(s.residential.id, s.apartment.id))
        .await
        .unwrap();
    let mut abu_dhabi = sale_draft(s.residential.id, s.apartment.id);
    abu_dhabi.city = "Abu Dhabi".to_string();
    abu_dhabi.community = "Al Reem Island".to_string();
    s.service.create(s.owner.id, abu_dhabi).await.unwrap();

    let rentals = s
        .service
        .search(PropertyQuery {
            purpose: Some(PropertyPurpose::Rent),
            city: Some("Dubai".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rentals.total, 1);
    assert_eq!(rentals.items[0].city, "Dubai");

    // City matching is exact, not case-insensitive
    let mismatch = s
        .service
        .search(PropertyQuery {
            city: Some("dubai".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(mismatch.total, 0);
}

// === Detail ===

#[tokio::test]
async fn test_get_returns_listing() {
    let s = setup().await;
    let created = s
        .service
        .create(s.owner.id, draft(s.residential.id, s.apartment.id))
        .await
        .unwrap();

    let loaded = s.service.get(created.id).await.unwrap();
    assert_eq!(loaded.id, created.id);
    assert_eq!(loaded.title, "Bright 2BR with marina view");
}

#[tokio::test]
async fn test_get_unknown_id_is_not_found() {
    let s = setup().await;
    let result = s.service.get(Uuid::new_v4()).await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::Property(PropertyError::NotFound)
    );
}

// === Similar listings ===

#[tokio::test]
async fn test_similar_unknown_base_returns_empty() {
    let s = setup().await;
    let similar = s.service.similar(Uuid::new_v4(), None).await.unwrap();
    assert!(similar.is_empty());
}

#[tokio::test]
async fn test_similar_matches_price_band_and_location() {
    let s = setup().await;
    let base = s
        .service
        .create(s.owner.id, sale_draft(s.residential.id, s.apartment.id))
        .await
        .unwrap();

    // In band (75%..125% of 1,000,000), same community
    let mut in_band = sale_draft(s.residential.id, s.apartment.id);
    in_band.title = "Comparable 2BR".to_string();
    in_band.price = 900_000;
    let keeper = s.service.create(s.owner.id, in_band).await.unwrap();

    // Too expensive
    let mut pricey = sale_draft(s.residential.id, s.apartment.id);
    pricey.price = 2_000_000;
    s.service.create(s.owner.id, pricey).await.unwrap();

    // Different city and community
    let mut elsewhere = sale_draft(s.residential.id, s.apartment.id);
    elsewhere.price = 950_000;
    elsewhere.city = "Abu Dhabi".to_string();
    elsewhere.community = "Al Reem Island".to_string();
    s.service.create(s.owner.id, elsewhere).await.unwrap();

    // Different purpose
    s.service
        .create(s.owner.id, draft(s.residential.id, s.apartment.id))
        .await
        .unwrap();

    let similar = s.service.similar(base.id, None).await.unwrap();
    assert_eq!(similar.len(), 1);
    assert_eq!(similar[0].id, keeper.id);
}

#[tokio::test]
async fn test_similar_limit_is_clamped() {
    let s = setup().await;
    let base = s
        .service
        .create(s.owner.id, sale_draft(s.residential.id, s.apartment.id))
        .await
        .unwrap();
    for i in 0..15 {
        let mut d = sale_draft(s.residential.id, s.apartment.id);
        d.title = format!("Comparable {}", i);
        d.price = 900_000 + i * 10_000;
        s.service.create(s.owner.id, d).await.unwrap();
    }

    let capped = s.service.similar(base.id, Some(50)).await.unwrap();
    assert_eq!(capped.len(), 12);

    let defaulted = s.service.similar(base.id, None).await.unwrap();
    assert_eq!(defaulted.len(), 6);
}

// === Metadata and featured ===

#[tokio::test]
async fn test_metadata_composes_catalog() {
    let s = setup().await;
    let metadata = s.service.metadata().await.unwrap();

    assert_eq!(
        metadata.purposes,
        vec![PropertyPurpose::Rent, PropertyPurpose::Sale]
    );
    assert_eq!(metadata.categories.len(), 2);
    assert_eq!(metadata.categories[0].category.name, "Residential");
    assert_eq!(metadata.categories[0].sub_categories[0].name, "Apartment");
    assert_eq!(metadata.amenities.len(), 2);
    assert_eq!(metadata.cities[0].name, "Dubai");
    assert_eq!(metadata.cities[0].count, 3);
    assert_eq!(metadata.communities[0].name, "Dubai Marina");
}

#[tokio::test]
async fn test_amenities_listed_alphabetically() {
    let s = setup().await;
    let amenities = s.service.amenities().await.unwrap();

    let names: Vec<&str> = amenities.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Balcony", "Central A/C"]);
}

#[tokio::test]
async fn test_featured_defaults_to_eight_newest() {
    let s = setup().await;
    for i in 0..10 {
        let mut d = draft(s.residential.id, s.apartment.id);
        d.title = format!("Listing {}", i);
        s.service.create(s.owner.id, d).await.unwrap();
    }

    let featured = s.service.featured(None, None).await.unwrap();
    assert_eq!(featured.len(), 8);

    let sales = s
        .service
        .featured(Some(PropertyPurpose::Sale), None)
        .await
        .unwrap();
    assert!(sales.is_empty());
}

// === Creation ===

#[tokio::test]
async fn test_create_fills_contact_from_owner_profile() {
    let s = setup().await;
    let created = s
        .service
        .create(s.owner.id, draft(s.residential.id, s.apartment.id))
        .await
        .unwrap();

    assert_eq!(created.owner_id, s.owner.id);
    assert_eq!(created.contact_name.as_deref(), Some("Lina Haddad"));
    assert_eq!(created.contact_email, "owner@example.com");
    assert_eq!(created.contact_phone.as_deref(), Some("+971501112233"));
    assert_eq!(s.properties.count().await, 1);
}

#[tokio::test]
async fn test_create_connects_amenities_by_name() {
    let s = setup().await;
    let mut d = draft(s.residential.id, s.apartment.id);
    d.amenity_names = vec!["Balcony".to_string(), "Shared Pool".to_string()];
    let created = s.service.create(s.owner.id, d).await.unwrap();

    let names: Vec<&str> = created.amenities.iter().map(|a| a.name.as_str()).collect();
    assert!(names.contains(&"Balcony"));
    assert!(names.contains(&"Shared Pool"));
}

#[tokio::test]
async fn test_create_rejects_unknown_owner() {
    let s = setup().await;
    let result = s
        .service
        .create(Uuid::new_v4(), draft(s.residential.id, s.apartment.id))
        .await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::Property(PropertyError::InvalidUser)
    );
}

#[tokio::test]
async fn test_create_rejects_unknown_category() {
    let s = setup().await;
    let result = s
        .service
        .create(s.owner.id, draft(Uuid::new_v4(), s.apartment.id))
        .await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::Property(PropertyError::InvalidCategory)
    );
}

#[tokio::test]
async fn test_create_requires_sub_category() {
    let s = setup().await;
    let mut d = draft(s.residential.id, s.apartment.id);
    d.sub_category_id = None;
    let result = s.service.create(s.owner.id, d).await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::Property(PropertyError::SubCategoryRequired)
    );
}

#[tokio::test]
async fn test_create_rejects_sub_category_of_other_category() {
    let s = setup().await;
    // Office belongs to Commercial, not Residential
    let result = s
        .service
        .create(s.owner.id, draft(s.residential.id, s.office.id))
        .await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::Property(PropertyError::InvalidSubCategory)
    );
}

#[tokio::test]
async fn test_create_rejects_rent_frequency_on_sale() {
    let s = setup().await;
    let mut d = sale_draft(s.residential.id, s.apartment.id);
    d.rent_frequency = Some(RentFrequency::Monthly);
    let result = s.service.create(s.owner.id, d).await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::Property(PropertyError::RentFrequencyNotAllowed)
    );
}

#[tokio::test]
async fn test_create_requires_rent_frequency_for_rent() {
    let s = setup().await;
    let mut d = draft(s.residential.id, s.apartment.id);
    d.rent_frequency = None;
    let result = s.service.create(s.owner.id, d).await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::Property(PropertyError::RentFrequencyRequired)
    );
}

#[tokio::test]
async fn test_create_rejects_rooms_on_commercial() {
    let s = setup().await;
    let mut d = draft(s.commercial.id, s.office.id);
    d.bedrooms = 1;
    d.bathrooms = 0;
    let result = s.service.create(s.owner.id, d).await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::Property(PropertyError::CommercialRoomsNotAllowed)
    );

    let mut zeroed = draft(s.commercial.id, s.office.id);
    zeroed.bedrooms = 0;
    zeroed.bathrooms = 0;
    assert!(s.service.create(s.owner.id, zeroed).await.is_ok());
}

#[tokio::test]
async fn test_create_rejects_negative_rooms() {
    let s = setup().await;
    let mut d = draft(s.residential.id, s.apartment.id);
    d.bathrooms = -1;
    let result = s.service.create(s.owner.id, d).await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::Property(PropertyError::InvalidRooms)
    );
}

#[tokio::test]
async fn test_create_rejects_non_positive_area() {
    let s = setup().await;
    let mut d = draft(s.residential.id, s.apartment.id);
    d.area_sqft = 0;
    let result = s.service.create(s.owner.id, d).await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::Property(PropertyError::InvalidArea)
    );
}

#[tokio::test]
async fn test_create_rejects_non_positive_price() {
    let s = setup().await;
    let mut d = draft(s.residential.id, s.apartment.id);
    d.price = 0;
    let result = s.service.create(s.owner.id, d).await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::Property(PropertyError::InvalidPrice)
    );
}

#[tokio::test]
async fn test_create_sends_submission_summary_email() {
    let s = setup().await;
    let mut d = draft(s.residential.id, s.apartment.id);
    d.reference_no = Some("MZ-2024-0042".to_string());
    let created = s.service.create(s.owner.id, d).await.unwrap();

    assert_eq!(s.mailer.sent_count().await, 1);
    let email = s.mailer.last().await.unwrap();
    assert_eq!(email.to, "owner@example.com");
    assert_eq!(email.subject, templates::SUBMITTED_SUBJECT);
    assert!(email.html.contains("Bright 2BR with marina view"));
    assert!(email.html.contains("AED 85,000 / yearly"));
    assert!(email.html.contains("Dubai Marina, Dubai"));
    assert!(email.html.contains("MZ-2024-0042"));
    assert!(email
        .html
        .contains(&format!("/properties/{}", created.id)));
}

#[tokio::test]
async fn test_create_survives_mail_failure() {
    let s = setup().await;
    s.mailer.set_should_fail(true).await;

    let result = s
        .service
        .create(s.owner.id, draft(s.residential.id, s.apartment.id))
        .await;

    assert!(result.is_ok());
    assert_eq!(s.properties.count().await, 1);
}
