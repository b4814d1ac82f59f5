//! Reservation repository for database operations

use common::error::DatabaseResult;
use tracing::{error, info};

use crate::executor::QueryExecutor;
use crate::models::GuestReservation;
use crate::repositories::DEFAULT_LIMIT;
use crate::sql::Statement;

// Reviews are outer-joined: a reservation for an unreviewed property is still
// listed, with a NULL average.
const GUEST_RESERVATIONS_SQL: &str = r#"
SELECT reservations.id AS reservation_id,
       reservations.start_date,
       reservations.end_date,
       properties.*,
       AVG(property_reviews.rating)::float8 AS average_rating
FROM reservations
JOIN properties ON reservations.property_id = properties.id
LEFT JOIN property_reviews ON properties.id = property_reviews.property_id
WHERE reservations.guest_id = $1
GROUP BY properties.id, reservations.id
ORDER BY reservations.start_date ASC
LIMIT $2
"#;

fn for_guest_statement(guest_id: i32, limit: i64) -> Statement {
    Statement::new(GUEST_RESERVATIONS_SQL, vec![guest_id.into(), limit.into()])
}

/// Reservation repository
#[derive(Clone)]
pub struct ReservationRepository<E> {
    executor: E,
}

impl<E: QueryExecutor> ReservationRepository<E> {
    /// Create a new reservation repository
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Get a guest's reservations, earliest first, with property ratings
    pub async fn for_guest(
        &self,
        guest_id: i32,
        limit: Option<u32>,
    ) -> DatabaseResult<Vec<GuestReservation>> {
        let limit = i64::from(limit.unwrap_or(DEFAULT_LIMIT));
        info!("Getting up to {} reservations for guest {}", limit, guest_id);

        self.executor
            .fetch_all::<GuestReservation>(&for_guest_statement(guest_id, limit))
            .await
            .inspect_err(|e| error!("Failed to get reservations for guest {}: {}", guest_id, e))
    }
}
