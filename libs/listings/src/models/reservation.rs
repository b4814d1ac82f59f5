//! Reservation models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::property::Property;

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Reservation {
    pub id: i32,
    pub guest_id: i32,
    pub property_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A guest's reservation with the reserved property and its rating
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct GuestReservation {
    pub reservation_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    /// `None` when the property has no reviews
    pub average_rating: Option<f64>,
}
