//! Property listing entity and its classification enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::{Amenity, Category, SubCategory};
use super::user::User;

/// Listing purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyPurpose {
    Rent,
    Sale,
}

impl PropertyPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyPurpose::Rent => "rent",
            PropertyPurpose::Sale => "sale",
        }
    }
}

impl std::fmt::Display for PropertyPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PropertyPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rent" => Ok(PropertyPurpose::Rent),
            "sale" => Ok(PropertyPurpose::Sale),
            _ => Err(format!("Invalid purpose: {}", s)),
        }
    }
}

/// Top-level category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Residential,
    Commercial,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Residential => "residential",
            CategoryType::Commercial => "commercial",
        }
    }

    pub fn is_commercial(&self) -> bool {
        matches!(self, CategoryType::Commercial)
    }
}

impl std::fmt::Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CategoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "residential" => Ok(CategoryType::Residential),
            "commercial" => Ok(CategoryType::Commercial),
            _ => Err(format!("Invalid category type: {}", s)),
        }
    }
}

/// Billing period for rental listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentFrequency {
    Yearly,
    Monthly,
    Weekly,
    Daily,
}

impl RentFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentFrequency::Yearly => "yearly",
            RentFrequency::Monthly => "monthly",
            RentFrequency::Weekly => "weekly",
            RentFrequency::Daily => "daily",
        }
    }
}

impl std::fmt::Display for RentFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RentFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yearly" => Ok(RentFrequency::Yearly),
            "monthly" => Ok(RentFrequency::Monthly),
            "weekly" => Ok(RentFrequency::Weekly),
            "daily" => Ok(RentFrequency::Daily),
            _ => Err(format!("Invalid rent frequency: {}", s)),
        }
    }
}

/// How soon the owner wants to close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    #[serde(rename = "this_month")]
    ThisMonth,
    #[serde(rename = "within_2_months")]
    WithinTwoMonths,
    #[serde(rename = "flexible")]
    Flexible,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::ThisMonth => "this_month",
            Urgency::WithinTwoMonths => "within_2_months",
            Urgency::Flexible => "flexible",
        }
    }
}

impl std::str::FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "this_month" => Ok(Urgency::ThisMonth),
            "within_2_months" => Ok(Urgency::WithinTwoMonths),
            "flexible" => Ok(Urgency::Flexible),
            _ => Err(format!("Invalid urgency: {}", s)),
        }
    }
}

/// Construction status of the unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    Ready,
    OffPlan,
}

impl CompletionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionStatus::Ready => "ready",
            CompletionStatus::OffPlan => "off_plan",
        }
    }
}

impl std::str::FromStr for CompletionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ready" => Ok(CompletionStatus::Ready),
            "off_plan" => Ok(CompletionStatus::OffPlan),
            _ => Err(format!("Invalid completion status: {}", s)),
        }
    }
}

/// Ownership model offered with the unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnershipType {
    Freehold,
    Leasehold,
}

impl OwnershipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnershipType::Freehold => "freehold",
            OwnershipType::Leasehold => "leasehold",
        }
    }
}

impl std::str::FromStr for OwnershipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "freehold" => Ok(OwnershipType::Freehold),
            "leasehold" => Ok(OwnershipType::Leasehold),
            _ => Err(format!("Invalid ownership type: {}", s)),
        }
    }
}

/// A published property listing.
///
/// Category, sub-category and amenities are carried denormalized so a single
/// repository read yields the full shape every endpoint returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub owner_id: Uuid,

    /// Free-form listing reference supplied by the owner
    pub reference_no: Option<String>,

    pub title: String,
    pub description: String,
    pub purpose: PropertyPurpose,
    pub category: Category,
    pub sub_category: SubCategory,

    /// Price in whole AED (per rent period for rentals)
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
    /// Free-form location detail (street, landmark)
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
    pub amenities: Vec<Amenity>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a listing.
///
/// Carries raw category references; the service resolves and validates them
/// before constructing a [`Property`].
#[derive(Debug, Clone)]
pub struct PropertyDraft {
    pub title: String,
    pub description: String,
    pub purpose: PropertyPurpose,
    pub category_id: Uuid,
    pub sub_category_id: Option<Uuid>,
    pub reference_no: Option<String>,
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
    pub contact_phone: Option<String>,
    pub cover_image_url: String,
    pub image_urls: Vec<String>,
    pub amenity_names: Vec<String>,
}

impl Property {
    /// Builds a new listing from a validated draft.
    ///
    /// Contact details prefer the owner's profile over draft values; the
    /// contact email is always the owner's. Rent frequency is only kept for
    /// rental listings.
    pub fn new(owner: &User, category: Category, sub_category: SubCategory, draft: PropertyDraft) -> Self {
        let now = Utc::now();
        let rent_frequency = match draft.purpose {
            PropertyPurpose::Rent => draft.rent_frequency,
            PropertyPurpose::Sale => None,
        };

        Self {
            id: Uuid::new_v4(),
            owner_id: owner.id,
            reference_no: draft.reference_no,
            title: draft.title,
            description: draft.description,
            purpose: draft.purpose,
            category,
            sub_category,
            price: draft.price,
            bedrooms: draft.bedrooms,
            bathrooms: draft.bathrooms,
            area_sqft: draft.area_sqft,
            rent_frequency,
            furnished: draft.furnished,
            completion: draft.completion,
            handover_date: draft.handover_date,
            city: draft.city,
            community: draft.community,
            location: draft.location,
            notes: draft.notes,
            urgency: draft.urgency,
            developer_name: draft.developer_name,
            ownership: draft.ownership,
            balcony_size_sqft: draft.balcony_size_sqft,
            parking_available: draft.parking_available,
            building_name: draft.building_name,
            total_floors: draft.total_floors,
            swimming_pools: draft.swimming_pools,
            total_parking_spaces: draft.total_parking_spaces,
            total_building_area_sqft: draft.total_building_area_sqft,
            elevators: draft.elevators,
            contact_name: owner.name.clone().or(draft.contact_name),
            contact_email: owner.email.clone(),
            contact_phone: owner.phone.clone().or(draft.contact_phone),
            cover_image_url: draft.cover_image_url,
            image_urls: draft.image_urls,
            amenities: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the listing belongs to a commercial category
    pub fn is_commercial(&self) -> bool {
        self.category.category_type.is_commercial()
    }

    /// "community, city" line used in notification emails
    pub fn location_line(&self) -> String {
        format!("{}, {}", self.community, self.city)
    }

    /// Price label used in notification emails, e.g. `AED 85,000 / yearly`
    pub fn price_label(&self) -> String {
        let formatted = format_thousands(self.price);
        match (self.purpose, self.rent_frequency) {
            (PropertyPurpose::Rent, Some(freq)) => format!("AED {} / {}", formatted, freq),
            _ => format!("AED {}", formatted),
        }
    }
}

/// Group digits with comma separators (1250000 -> "1,250,000")
pub(crate) fn format_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
