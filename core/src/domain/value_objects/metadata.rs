//! Aggregated lookup data served to listing forms and search filters.

use serde::{Deserialize, Serialize};

use crate::domain::entities::catalog::{Amenity, Category, SubCategory};
use crate::domain::entities::property::PropertyPurpose;

/// A category with its sub-categories nested, as the metadata endpoint
/// returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTree {
    #[serde(flatten)]
    pub category: Category,
    pub sub_categories: Vec<SubCategory>,
}

/// Number of listings in a city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityCount {
    pub name: String,
    pub count: i64,
}

/// Number of listings in a community
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityCount {
    pub name: String,
    pub count: i64,
}

/// Everything a client needs to render search filters and the listing form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingMetadata {
    pub purposes: Vec<PropertyPurpose>,
    pub categories: Vec<CategoryTree>,
    pub amenities: Vec<Amenity>,
    pub cities: Vec<CityCount>,
    pub communities: Vec<CommunityCount>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::property::CategoryType;
    use uuid::Uuid;

    #[test]
    fn test_category_tree_flattens_category_fields() {
        let category_id = Uuid::new_v4();
        let tree = CategoryTree {
            category: Category {
                id: category_id,
                name: "Residential".to_string(),
                category_type: CategoryType::Residential,
                sort_order: 1,
            },
            sub_categories: vec![SubCategory {
                id: Uuid::new_v4(),
                name: "Apartment".to_string(),
                sort_order: 1,
                category_id,
            }],
        };

        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["name"], "Residential");
        assert_eq!(json["type"], "residential");
        assert_eq!(json["subCategories"][0]["name"], "Apartment");
    }
}
