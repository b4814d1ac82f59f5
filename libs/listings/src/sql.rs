//! Parameterized statement construction
//!
//! Statements are plain data: SQL text with `$n` placeholders plus the values
//! bound to them, in placeholder order. Placeholders are handed out as values
//! are bound, so the numbering can never drift from the parameter list.

/// A value bound to a positional placeholder
///
/// NULLs are typed so the database sees the same parameter type whether or
/// not a value is present.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(Option<i32>),
    BigInt(i64),
    Float(f64),
    Text(Option<String>),
}

impl From<i32> for SqlParam {
    fn from(value: i32) -> Self {
        SqlParam::Int(Some(value))
    }
}

impl From<Option<i32>> for SqlParam {
    fn from(value: Option<i32>) -> Self {
        SqlParam::Int(value)
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::BigInt(value)
    }
}

impl From<f64> for SqlParam {
    fn from(value: f64) -> Self {
        SqlParam::Float(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(Some(value.to_string()))
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(Some(value))
    }
}

impl From<Option<String>> for SqlParam {
    fn from(value: Option<String>) -> Self {
        SqlParam::Text(value)
    }
}

/// A rendered SQL statement and its bound parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<SqlParam>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }
}

/// Builder for SELECT statements with optional predicates
///
/// The head (`SELECT … FROM … JOIN …`) is fixed; everything after it is
/// assembled from the parts that were actually requested. `WHERE` and
/// `HAVING` only appear when they carry at least one predicate.
#[derive(Debug)]
pub struct SelectBuilder {
    head: String,
    conditions: Vec<String>,
    group_by: Option<String>,
    having: Vec<String>,
    order_by: Option<String>,
    limit: Option<String>,
    params: Vec<SqlParam>,
}

impl SelectBuilder {
    pub fn new(head: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            conditions: Vec::new(),
            group_by: None,
            having: Vec::new(),
            order_by: None,
            limit: None,
            params: Vec::new(),
        }
    }

    fn bind(&mut self, param: impl Into<SqlParam>) -> String {
        self.params.push(param.into());
        format!("${}", self.params.len())
    }

    /// Add a WHERE predicate; `predicate` receives the placeholder for `param`
    pub fn and_where<F>(&mut self, param: impl Into<SqlParam>, predicate: F) -> &mut Self
    where
        F: FnOnce(&str) -> String,
    {
        let placeholder = self.bind(param);
        self.conditions.push(predicate(&placeholder));
        self
    }

    pub fn group_by(&mut self, columns: impl Into<String>) -> &mut Self {
        self.group_by = Some(columns.into());
        self
    }

    /// Add a HAVING predicate; `predicate` receives the placeholder for `param`
    pub fn and_having<F>(&mut self, param: impl Into<SqlParam>, predicate: F) -> &mut Self
    where
        F: FnOnce(&str) -> String,
    {
        let placeholder = self.bind(param);
        self.having.push(predicate(&placeholder));
        self
    }

    pub fn order_by(&mut self, ordering: impl Into<String>) -> &mut Self {
        self.order_by = Some(ordering.into());
        self
    }

    pub fn limit(&mut self, limit: i64) -> &mut Self {
        let placeholder = self.bind(limit);
        self.limit = Some(placeholder);
        self
    }

    pub fn build(self) -> Statement {
        let mut sql = self.head;

        if !self.conditions.is_empty() {
            sql.push_str("\nWHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
        if let Some(group_by) = self.group_by {
            sql.push_str("\nGROUP BY ");
            sql.push_str(&group_by);
        }
        if !self.having.is_empty() {
            sql.push_str("\nHAVING ");
            sql.push_str(&self.having.join(" AND "));
        }
        if let Some(order_by) = self.order_by {
            sql.push_str("\nORDER BY ");
            sql.push_str(&order_by);
        }
        if let Some(limit) = self.limit {
            sql.push_str("\nLIMIT ");
            sql.push_str(&limit);
        }

        Statement::new(sql, self.params)
    }
}

/// Render `INSERT INTO table (columns) VALUES ($1, …) RETURNING *`
///
/// `values` must line up with `columns` one to one.
pub fn insert_returning(table: &str, columns: &[&str], values: Vec<SqlParam>) -> Statement {
    debug_assert_eq!(columns.len(), values.len(), "column/value count mismatch");

    let placeholders = (1..=values.len())
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!(
        "INSERT INTO {} ({})\nVALUES ({})\nRETURNING *",
        table,
        columns.join(", "),
        placeholders
    );

    Statement::new(sql, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_select_has_no_where_or_having() {
        let mut builder = SelectBuilder::new("SELECT * FROM properties");
        builder.group_by("properties.id").order_by("cost_per_night ASC");
        let statement = builder.build();

        assert_eq!(
            statement.sql(),
            "SELECT * FROM properties\nGROUP BY properties.id\nORDER BY cost_per_night ASC"
        );
        assert!(statement.params().is_empty());
        assert!(!statement.sql().contains("WHERE"));
        assert!(!statement.sql().contains("HAVING"));
    }

    #[test]
    fn predicates_are_joined_with_and_and_numbered_in_order() {
        let mut builder = SelectBuilder::new("SELECT * FROM properties");
        builder
            .and_where(3_i32, |p| format!("owner_id = {}", p))
            .and_where("%van%", |p| format!("city ILIKE {}", p))
            .group_by("properties.id")
            .and_having(4.0, |p| format!("AVG(rating) >= {}", p))
            .limit(10);
        let statement = builder.build();

        assert_eq!(
            statement.sql(),
            "SELECT * FROM properties\n\
             WHERE owner_id = $1 AND city ILIKE $2\n\
             GROUP BY properties.id\n\
             HAVING AVG(rating) >= $3\n\
             LIMIT $4"
        );
        assert_eq!(
            statement.params(),
            &[
                SqlParam::Int(Some(3)),
                SqlParam::Text(Some("%van%".to_string())),
                SqlParam::Float(4.0),
                SqlParam::BigInt(10),
            ]
        );
    }

    #[test]
    fn having_without_where_starts_numbering_at_one() {
        let mut builder = SelectBuilder::new("SELECT 1");
        builder.and_having(2.5, |p| format!("x >= {}", p)).limit(5);
        let statement = builder.build();

        assert_eq!(statement.sql(), "SELECT 1\nHAVING x >= $1\nLIMIT $2");
        assert_eq!(statement.params().len(), 2);
    }

    #[test]
    fn insert_returning_numbers_every_column() {
        let statement = insert_returning(
            "users",
            &["name", "email", "password"],
            vec!["Ada".into(), "ada@example.com".into(), SqlParam::Text(None)],
        );

        assert_eq!(
            statement.sql(),
            "INSERT INTO users (name, email, password)\nVALUES ($1, $2, $3)\nRETURNING *"
        );
        assert_eq!(statement.params()[2], SqlParam::Text(None));
    }
}
