//! Property models, search filter and insert payload

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Property entity
///
/// `cost_per_night` is stored in cents.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Property {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
}

/// A property together with its average review rating
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct PropertyListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    /// `None` when the property has no reviews
    pub average_rating: Option<f64>,
}

/// Optional filters for a property search
///
/// Prices are whole currency units per night, compared against
/// `cost_per_night / 100`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyFilter {
    pub owner_id: Option<i32>,
    pub city: Option<String>,
    pub minimum_price_per_night: Option<i32>,
    pub maximum_price_per_night: Option<i32>,
    pub minimum_rating: Option<f64>,
}

impl PropertyFilter {
    /// City filter, ignoring blank input from empty form fields
    pub fn city(&self) -> Option<&str> {
        self.city
            .as_deref()
            .map(str::trim)
            .filter(|city| !city.is_empty())
    }
}

/// New property creation payload
///
/// Every column is optional here; an absent value is inserted as NULL and the
/// schema decides whether that is acceptable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewProperty {
    pub owner_id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_photo_url: Option<String>,
    pub cover_photo_url: Option<String>,
    pub cost_per_night: Option<i32>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub post_code: Option<String>,
    pub country: Option<String>,
    pub parking_spaces: Option<i32>,
    pub number_of_bathrooms: Option<i32>,
    pub number_of_bedrooms: Option<i32>,
}
