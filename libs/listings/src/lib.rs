//! Data-access layer for the LightBnB listing application
//!
//! Route handlers get a [`QueryService`] built once at startup. Each call
//! issues a single parameterized statement through the shared pool and
//! returns either the mapped rows or a [`DatabaseError`] that tells "not
//! found" apart from a failed query.
//!
//! ```rust,no_run
//! use common::database::DatabaseConfig;
//! use listings::{PropertyFilter, QueryService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = QueryService::connect(&DatabaseConfig::from_env()?).await?;
//!     let filter = PropertyFilter {
//!         city: Some("Vancouver".to_string()),
//!         ..Default::default()
//!     };
//!     for listing in service.properties.search(&filter, Some(5)).await? {
//!         println!("{} {:?}", listing.property.title, listing.average_rating);
//!     }
//!     Ok(())
//! }
//! ```

pub mod executor;
pub mod models;
pub mod repositories;
pub mod service;
pub mod sql;

#[cfg(test)]
mod test_utils;

pub use common::error::{DatabaseError, DatabaseResult};
pub use executor::{PgExecutor, QueryExecutor};
pub use models::{
    GuestReservation, NewProperty, NewUser, Property, PropertyFilter, PropertyListing,
    Reservation, User,
};
pub use repositories::{DEFAULT_LIMIT, PropertyRepository, ReservationRepository, UserRepository};
pub use service::QueryService;
pub use sql::{SelectBuilder, SqlParam, Statement};
