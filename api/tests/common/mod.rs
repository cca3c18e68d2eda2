//! Shared fixtures for the HTTP integration tests: a mock-backed
//! application state plus helpers for seeding data and reading captured
//! email.

// Each test binary compiles this module; not every binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use uuid::Uuid;

use mz_api::app::AppState;
use mz_core::domain::entities::catalog::{Category, SubCategory};
use mz_core::domain::entities::property::{
    CategoryType, PropertyDraft, PropertyPurpose, RentFrequency,
};
use mz_core::domain::entities::user::User;
use mz_core::repositories::{MockCatalogRepository, MockPropertyRepository, MockUserRepository};
use mz_core::services::auth::{AuthService, AuthServiceConfig};
use mz_core::services::mailer::MockMailer;
use mz_core::services::property::{PropertyService, PropertyServiceConfig};
use mz_core::services::token::{TokenService, TokenServiceConfig};

pub type MockState =
    AppState<MockPropertyRepository, MockCatalogRepository, MockUserRepository, MockMailer>;

pub struct TestContext {
    pub state: web::Data<MockState>,
    pub users: Arc<MockUserRepository>,
    pub properties: Arc<MockPropertyRepository>,
    pub catalog: Arc<MockCatalogRepository>,
    pub mailer: Arc<MockMailer>,
}

/// Builds the full service graph over in-memory repositories.
pub fn context() -> TestContext {
    let properties = Arc::new(MockPropertyRepository::new());
    let catalog = Arc::new(MockCatalogRepository::new());
    let users = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockMailer::new());

    let token_service = Arc::new(TokenService::new(TokenServiceConfig::new(
        "integration-test-secret",
        3600,
    )));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&users),
        Arc::clone(&token_service),
        Arc::clone(&mailer),
        AuthServiceConfig {
            otp_secret: "otp-secret".to_string(),
            // low bcrypt cost keeps the suite fast
            bcrypt_cost: 4,
            ..Default::default()
        },
    ));

    let property_service = Arc::new(PropertyService::new(
        Arc::clone(&properties),
        Arc::clone(&catalog),
        Arc::clone(&users),
        Arc::clone(&mailer),
        PropertyServiceConfig::default(),
    ));

    let state = web::Data::new(AppState {
        auth_service,
        property_service,
        token_service: Arc::clone(&token_service),
    });

    TestContext {
        state,
        users,
        properties,
        catalog,
        mailer,
    }
}

pub struct SeededCatalog {
    pub residential: Category,
    pub apartment: SubCategory,
    pub commercial: Category,
    pub office: SubCategory,
}

/// Two categories with one sub-category each, plus a couple of amenities.
pub async fn seed_catalog(ctx: &TestContext) -> SeededCatalog {
    let residential = ctx
        .catalog
        .add_category("Residential", CategoryType::Residential)
        .await;
    let apartment = ctx
        .catalog
        .add_sub_category(residential.id, "Apartment")
        .await;
    let commercial = ctx
        .catalog
        .add_category("Commercial", CategoryType::Commercial)
        .await;
    let office = ctx.catalog.add_sub_category(commercial.id, "Office").await;

    ctx.catalog.add_amenity("Balcony").await;
    ctx.catalog.add_amenity("Central A/C").await;

    SeededCatalog {
        residential,
        apartment,
        commercial,
        office,
    }
}

/// Inserts an already-verified account and mints an access token for it,
/// bypassing the OTP round trip.
pub async fn authenticated_user(ctx: &TestContext, email: &str) -> (Uuid, String) {
    let mut user = User::new(email.to_string(), "not-a-real-hash".to_string())
        .with_profile(Some("Lina Haddad".to_string()), Some("+971501112233".to_string()));
    user.mark_email_verified();
    let id = user.id;
    ctx.users.insert(user).await;

    let token = ctx
        .state
        .token_service
        .generate_access_token(id, email)
        .expect("token generation");
    (id, token)
}

/// Yearly rental apartment draft in Dubai Marina
pub fn draft(category_id: Uuid, sub_category_id: Uuid) -> PropertyDraft {
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
        location: None,
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

/// Pulls the 4 digit code back out of the captured OTP email
pub fn extract_otp(html: &str) -> String {
    let start = html.find("letter-spacing:10px").expect("otp block missing");
    let rest = &html[start..];
    let after = &rest[rest.find('>').expect("otp block malformed") + 1..];
    after[..after.find('<').expect("otp block malformed")]
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect()
}

/// Pulls the raw reset token back out of the captured reset email link
pub fn extract_reset_token(html: &str) -> String {
    let start = html.find("&token=").expect("reset link missing") + "&token=".len();
    let rest = &html[start..];
    rest[..rest.find('"').expect("reset link malformed")].to_string()
}
