//! Query execution against the connection pool
//!
//! Repositories never touch the pool directly. They hand a [`Statement`] to a
//! [`QueryExecutor`], which lets tests swap the database for a recorder.

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres};
use tracing::debug;

use crate::sql::{SqlParam, Statement};

/// Runs statements and decodes the resulting rows
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run `statement` and decode every returned row
    async fn fetch_all<T>(&self, statement: &Statement) -> DatabaseResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static;

    /// Run `statement` and decode the first returned row, if any
    async fn fetch_optional<T>(&self, statement: &Statement) -> DatabaseResult<Option<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static;
}

/// Executor backed by the shared PostgreSQL pool
#[derive(Clone)]
pub struct PgExecutor {
    pool: PgPool,
}

impl PgExecutor {
    /// Create a new executor over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn bind_params<'q, T>(
    mut query: QueryAs<'q, Postgres, T, PgArguments>,
    params: &[SqlParam],
) -> QueryAs<'q, Postgres, T, PgArguments> {
    for param in params {
        query = match param {
            SqlParam::Int(value) => query.bind(*value),
            SqlParam::BigInt(value) => query.bind(*value),
            SqlParam::Float(value) => query.bind(*value),
            SqlParam::Text(value) => query.bind(value.clone()),
        };
    }
    query
}

#[async_trait]
impl QueryExecutor for PgExecutor {
    async fn fetch_all<T>(&self, statement: &Statement) -> DatabaseResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        debug!(sql = statement.sql(), params = ?statement.params(), "fetch_all");

        let query = bind_params(sqlx::query_as::<_, T>(statement.sql()), statement.params());
        query.fetch_all(&self.pool).await.map_err(DatabaseError::from)
    }

    async fn fetch_optional<T>(&self, statement: &Statement) -> DatabaseResult<Option<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        debug!(sql = statement.sql(), params = ?statement.params(), "fetch_optional");

        let query = bind_params(sqlx::query_as::<_, T>(statement.sql()), statement.params());
        query
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)
    }
}
