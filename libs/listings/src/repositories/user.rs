//! User repository for database operations

use common::error::{DatabaseError, DatabaseResult};
use tracing::{error, info};

use crate::executor::QueryExecutor;
use crate::models::{NewUser, User};
use crate::sql::{Statement, insert_returning};

const USER_COLUMNS: &str = "id, name, email, password";

fn find_by_email_statement(email: &str) -> Statement {
    Statement::new(
        format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS),
        vec![email.into()],
    )
}

fn find_by_id_statement(id: i32) -> Statement {
    Statement::new(
        format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS),
        vec![id.into()],
    )
}

fn create_statement(new_user: &NewUser) -> Statement {
    insert_returning(
        "users",
        &["name", "email", "password"],
        vec![
            new_user.name.as_str().into(),
            new_user.email.as_str().into(),
            new_user.password.as_str().into(),
        ],
    )
}

/// User repository
#[derive(Clone)]
pub struct UserRepository<E> {
    executor: E,
}

impl<E: QueryExecutor> UserRepository<E> {
    /// Create a new user repository
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Find a user by exact email
    pub async fn find_by_email(&self, email: &str) -> DatabaseResult<User> {
        info!("Finding user by email: {}", email);

        self.executor
            .fetch_optional::<User>(&find_by_email_statement(email))
            .await
            .and_then(|row| row.ok_or(DatabaseError::NotFound))
            .inspect_err(|e| error!("Failed to find user by email {}: {}", email, e))
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i32) -> DatabaseResult<User> {
        info!("Finding user by ID: {}", id);

        self.executor
            .fetch_optional::<User>(&find_by_id_statement(id))
            .await
            .and_then(|row| row.ok_or(DatabaseError::NotFound))
            .inspect_err(|e| error!("Failed to find user {}: {}", id, e))
    }

    /// Create a new user and return the stored row
    pub async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        info!("Creating new user: {}", new_user.email);

        self.executor
            .fetch_optional::<User>(&create_statement(new_user))
            .await
            .and_then(|row| row.ok_or(DatabaseError::NotFound))
            .inspect_err(|e| error!("Failed to create user {}: {}", new_user.email, e))
    }
}
