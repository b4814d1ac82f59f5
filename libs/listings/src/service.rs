//! Query service handed to the route handlers

use common::database::{DatabaseConfig, init_pool};
use common::error::DatabaseResult;

use crate::executor::{PgExecutor, QueryExecutor};
use crate::repositories::{PropertyRepository, ReservationRepository, UserRepository};

/// All repositories, sharing one executor
#[derive(Clone)]
pub struct QueryService<E = PgExecutor> {
    pub users: UserRepository<E>,
    pub properties: PropertyRepository<E>,
    pub reservations: ReservationRepository<E>,
}

impl<E: QueryExecutor + Clone> QueryService<E> {
    pub fn new(executor: E) -> Self {
        Self {
            users: UserRepository::new(executor.clone()),
            properties: PropertyRepository::new(executor.clone()),
            reservations: ReservationRepository::new(executor),
        }
    }
}

impl QueryService<PgExecutor> {
    /// Open the pool described by `config` and build the service on it
    pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<Self> {
        let pool = init_pool(config).await?;
        Ok(Self::new(PgExecutor::new(pool)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropertyFilter;
    use crate::test_utils::{RecordingExecutor, sample_user};

    #[tokio::test]
    async fn repositories_share_one_executor() {
        let executor = RecordingExecutor::new();
        executor.reply_rows(vec![sample_user(1)]);
        let service = QueryService::new(executor.clone());

        service.users.find_by_id(1).await.unwrap();
        service.reservations.for_guest(1, Some(2)).await.unwrap();
        service
            .properties
            .search(&PropertyFilter::default(), None)
            .await
            .unwrap();

        let statements = executor.statements();
        assert_eq!(statements.len(), 3);
        assert!(statements[0].sql().contains("FROM users"));
        assert!(statements[1].sql().contains("FROM reservations"));
        assert!(statements[2].sql().contains("FROM properties"));
    }

    #[tokio::test]
    async fn concurrent_calls_are_independent() {
        let executor = RecordingExecutor::new();
        let service = QueryService::new(executor.clone());

        let (first, second) = tokio::join!(
            service.users.find_by_email("a@example.com"),
            service.users.find_by_email("b@example.com"),
        );
        assert!(first.unwrap_err().is_not_found());
        assert!(second.unwrap_err().is_not_found());
        assert_eq!(executor.statements().len(), 2);
    }
}
