//! Test doubles shared by the unit tests

use std::any::Any;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::FromRow;
use sqlx::postgres::PgRow;

use crate::executor::QueryExecutor;
use crate::models::{Property, User};
use crate::sql::Statement;

enum Reply {
    Rows(Box<dyn Any + Send>),
    Error(DatabaseError),
}

/// Executor that records statements and answers from a script
///
/// Replies are consumed in order, one per statement. When the script runs
/// out every query returns no rows.
#[derive(Clone, Default)]
pub struct RecordingExecutor {
    statements: Arc<Mutex<Vec<Statement>>>,
    replies: Arc<Mutex<VecDeque<Reply>>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_rows<T: Send + 'static>(&self, rows: Vec<T>) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Rows(Box::new(rows)));
        self
    }

    pub fn reply_error(&self, err: DatabaseError) -> &Self {
        self.replies.lock().unwrap().push_back(Reply::Error(err));
        self
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.statements.lock().unwrap().clone()
    }

    pub fn last_statement(&self) -> Statement {
        self.statements
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no statement was executed")
    }

    fn answer<T: 'static>(&self, statement: &Statement) -> DatabaseResult<Vec<T>> {
        self.statements.lock().unwrap().push(statement.clone());

        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Rows(rows)) => Ok(*rows
                .downcast::<Vec<T>>()
                .expect("scripted rows do not match the decoded row type")),
            Some(Reply::Error(err)) => Err(err),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl QueryExecutor for RecordingExecutor {
    async fn fetch_all<T>(&self, statement: &Statement) -> DatabaseResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        self.answer(statement)
    }

    async fn fetch_optional<T>(&self, statement: &Statement) -> DatabaseResult<Option<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        Ok(self.answer(statement)?.into_iter().next())
    }
}

pub fn sample_user(id: i32) -> User {
    User {
        id,
        name: "Eva Stanley".to_string(),
        email: "sebastianguerra@ymail.com".to_string(),
        password: "password".to_string(),
    }
}

pub fn sample_property(id: i32, cost_per_night: i32) -> Property {
    Property {
        id,
        owner_id: 1,
        title: "Speed lamp".to_string(),
        description: Some("description".to_string()),
        thumbnail_photo_url: "https://images.example.com/thumb.jpeg".to_string(),
        cover_photo_url: "https://images.example.com/cover.jpeg".to_string(),
        cost_per_night,
        street: "536 Namsub Highway".to_string(),
        city: "Sotboske".to_string(),
        province: "Quebec".to_string(),
        post_code: "28142".to_string(),
        country: "Canada".to_string(),
        parking_spaces: 6,
        number_of_bathrooms: 4,
        number_of_bedrooms: 8,
    }
}
