//! Property repository for database operations

use common::error::{DatabaseError, DatabaseResult};
use tracing::{error, info};

use crate::executor::QueryExecutor;
use crate::models::{NewProperty, Property, PropertyFilter, PropertyListing};
use crate::repositories::DEFAULT_LIMIT;
use crate::sql::{SelectBuilder, Statement, insert_returning};

const SEARCH_HEAD: &str = "SELECT properties.*, AVG(property_reviews.rating)::float8 AS average_rating
FROM properties
LEFT JOIN property_reviews ON properties.id = property_reviews.property_id";

/// Insertable columns, in binding order
const INSERT_COLUMNS: [&str; 14] = [
    "owner_id",
    "title",
    "description",
    "thumbnail_photo_url",
    "cover_photo_url",
    "cost_per_night",
    "street",
    "city",
    "province",
    "post_code",
    "country",
    "parking_spaces",
    "number_of_bathrooms",
    "number_of_bedrooms",
];

fn search_statement(filter: &PropertyFilter, limit: i64) -> Statement {
    let mut query = SelectBuilder::new(SEARCH_HEAD);

    if let Some(owner_id) = filter.owner_id {
        query.and_where(owner_id, |p| format!("properties.owner_id = {}", p));
    }
    if let Some(city) = filter.city() {
        query.and_where(format!("%{}%", city), |p| {
            format!("properties.city ILIKE {}", p)
        });
    }
    if let Some(minimum) = filter.minimum_price_per_night {
        query.and_where(minimum, |p| {
            format!("properties.cost_per_night / 100 > {}", p)
        });
    }
    if let Some(maximum) = filter.maximum_price_per_night {
        query.and_where(maximum, |p| {
            format!("properties.cost_per_night / 100 < {}", p)
        });
    }

    query.group_by("properties.id");

    if let Some(rating) = filter.minimum_rating {
        query.and_having(rating, |p| {
            format!("AVG(property_reviews.rating) >= {}", p)
        });
    }

    query
        .order_by("properties.cost_per_night ASC")
        .limit(limit);

    query.build()
}

fn create_statement(property: &NewProperty) -> Statement {
    insert_returning(
        "properties",
        &INSERT_COLUMNS,
        vec![
            property.owner_id.into(),
            property.title.clone().into(),
            property.description.clone().into(),
            property.thumbnail_photo_url.clone().into(),
            property.cover_photo_url.clone().into(),
            property.cost_per_night.into(),
            property.street.clone().into(),
            property.city.clone().into(),
            property.province.clone().into(),
            property.post_code.clone().into(),
            property.country.clone().into(),
            property.parking_spaces.into(),
            property.number_of_bathrooms.into(),
            property.number_of_bedrooms.into(),
        ],
    )
}

/// Property repository
#[derive(Clone)]
pub struct PropertyRepository<E> {
    executor: E,
}

impl<E: QueryExecutor> PropertyRepository<E> {
    /// Create a new property repository
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Search properties, cheapest first, with their average rating
    ///
    /// Only the filters that are set constrain the result. `limit` defaults
    /// to 10 rows.
    pub async fn search(
        &self,
        filter: &PropertyFilter,
        limit: Option<u32>,
    ) -> DatabaseResult<Vec<PropertyListing>> {
        let limit = i64::from(limit.unwrap_or(DEFAULT_LIMIT));
        info!(?filter, limit, "Searching properties");

        let listings = self
            .executor
            .fetch_all::<PropertyListing>(&search_statement(filter, limit))
            .await
            .inspect_err(|e| error!("Failed to search properties: {}", e))?;

        info!("Found {} properties", listings.len());
        Ok(listings)
    }

    /// Create a new property and return the stored row
    pub async fn create(&self, property: &NewProperty) -> DatabaseResult<Property> {
        info!("Creating property {:?} for owner {:?}", property.title, property.owner_id);

        self.executor
            .fetch_optional::<Property>(&create_statement(property))
            .await
            .and_then(|row| row.ok_or(DatabaseError::NotFound))
            .inspect_err(|e| error!("Failed to create property: {}", e))
    }
}
