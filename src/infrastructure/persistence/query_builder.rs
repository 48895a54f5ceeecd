use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;
use sqlx::types::BigDecimal;

use crate::application::errors::QueryError;

/// A typed positional bind value; `None` binds SQL `NULL`
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(Option<String>),
    Integer(Option<i32>),
    Numeric(Option<BigDecimal>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(Some(value.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(Some(value))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(Some(value))
    }
}

/// Output of [`QueryBuilder::partial_update`]
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    /// `"col"=$1, "col2"=$2`
    pub set_clause: String,
    /// Bound in order; `values[i]` fills placeholder `i + 1`
    pub values: Vec<FieldValue>,
}

impl PartialUpdate {
    /// Placeholder index available for the caller's trailing `WHERE` key
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Common SQL query fragments to reduce duplication and ensure consistency
pub struct QueryBuilder;

impl QueryBuilder {
    /// Column list returned by every company query
    pub const COMPANY_COLUMNS: &'static str = "handle, name, description, num_employees, logo_url";

    /// Column list returned by every job query; equity is rendered as decimal text
    pub const JOB_COLUMNS: &'static str =
        "id, title, salary, equity::TEXT AS equity, company_handle";

    /// Build the `SET` clause of a partial update.
    ///
    /// Each key is mapped through `column_map`, falling back to the key
    /// itself, and numbered from `$1` in input order.
    pub fn partial_update(
        fields: &[(&str, FieldValue)],
        column_map: &[(&str, &str)],
    ) -> Result<PartialUpdate, QueryError> {
        if fields.is_empty() {
            return Err(QueryError::NoFieldsProvided);
        }

        let set_clause = fields
            .iter()
            .enumerate()
            .map(|(idx, (key, _))| {
                let column = column_map
                    .iter()
                    .find(|(external, _)| external == key)
                    .map(|(_, column)| *column)
                    .unwrap_or(*key);
                format!("\"{}\"=${}", column, idx + 1)
            })
            .collect::<Vec<_>>()
            .join(", ");

        Ok(PartialUpdate {
            set_clause,
            values: fields.iter().map(|(_, value)| value.clone()).collect(),
        })
    }

    /// Escape `LIKE` metacharacters so user input matches literally
    pub fn escape_like(input: &str) -> String {
        let mut escaped = String::with_capacity(input.len());
        for c in input.chars() {
            if matches!(c, '%' | '_' | '\\') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }
}

/// Incrementally built `WHERE` clause with positional values and an ordering
#[derive(Debug, Clone)]
pub struct FilterQuery {
    where_clause: String,
    values: Vec<FieldValue>,
    order_by: &'static str,
}

impl FilterQuery {
    pub fn new(order_by: &'static str) -> Self {
        Self {
            where_clause: "WHERE 1=1".to_string(),
            values: Vec::new(),
            order_by,
        }
    }

    /// Append ` AND <predicate> $n`
    pub fn push(&mut self, predicate: &str, value: FieldValue) {
        self.values.push(value);
        self.where_clause
            .push_str(&format!(" AND {} ${}", predicate, self.values.len()));
    }

    /// Append a predicate that binds nothing
    pub fn push_literal(&mut self, predicate: &str) {
        self.where_clause.push_str(&format!(" AND {}", predicate));
    }

    pub fn order_by(&mut self, column: &'static str) {
        self.order_by = column;
    }

    pub fn where_clause(&self) -> &str {
        &self.where_clause
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Full statement selecting `columns` from `table`
    pub fn to_sql(&self, columns: &str, table: &str) -> String {
        format!(
            "SELECT {} FROM {} {} ORDER BY {}",
            columns, table, self.where_clause, self.order_by
        )
    }

    pub fn into_values(self) -> Vec<FieldValue> {
        self.values
    }
}

/// Bind `values` in order onto a runtime `query_as`
pub fn bind_values<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    values: Vec<FieldValue>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in values {
        query = match value {
            FieldValue::Text(v) => query.bind(v),
            FieldValue::Integer(v) => query.bind(v),
            FieldValue::Numeric(v) => query.bind(v),
        };
    }
    query
}
