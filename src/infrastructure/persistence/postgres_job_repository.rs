use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::map_constraint_error;
use super::query_builder::{bind_values, FieldValue, FilterQuery, QueryBuilder};
use crate::application::dto::{JobFilter, UpdateJobRequest};
use crate::application::errors::QueryError;
use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::entities::{Job, NewJob};
use crate::domain::value_objects::Equity;

/// External field name to `jobs` column
const COLUMN_MAP: &[(&str, &str)] = &[
    ("title", "title"),
    ("salary", "salary"),
    ("equity", "equity"),
    ("companyHandle", "company_handle"),
];

pub struct PostgresJobRepository {
    pool: PgPool,
}

impl PostgresJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn patch_fields(patch: &UpdateJobRequest) -> Vec<(&'static str, FieldValue)> {
    let mut fields = Vec::new();
    if let Some(title) = &patch.title {
        fields.push(("title", FieldValue::from(title.as_str())));
    }
    if let Some(salary) = patch.salary {
        fields.push(("salary", FieldValue::Integer(salary)));
    }
    if let Some(equity) = &patch.equity {
        fields.push((
            "equity",
            FieldValue::Numeric(equity.as_ref().map(|e| e.as_decimal().clone())),
        ));
    }
    fields
}

/// Filter query for `jobs`, ordered by id.
///
/// At least one criterion is required. `has_equity == Some(false)` counts as
/// a criterion but does not restrict the result.
pub(crate) fn job_filter_query(filter: &JobFilter) -> Result<FilterQuery, QueryError> {
    filter.check_not_empty()?;

    let mut query = FilterQuery::new("id");

    if let Some(title) = &filter.title {
        query.push(
            "title ILIKE",
            FieldValue::from(format!("%{}%", QueryBuilder::escape_like(title))),
        );
    }
    if let Some(min_salary) = filter.min_salary {
        query.push("salary >=", FieldValue::from(min_salary));
    }
    if filter.has_equity == Some(true) {
        query.push_literal("equity > 0");
    }

    Ok(query)
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn insert(&self, job: &NewJob) -> Result<Option<Job>, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO jobs (title, salary, equity, company_handle)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (title, company_handle) DO NOTHING
            RETURNING {}
            "#,
            QueryBuilder::JOB_COLUMNS
        );

        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(job.title())
            .bind(job.salary())
            .bind(job.equity().map(Equity::as_decimal))
            .bind(job.company_handle())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_constraint_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Job>, RepositoryError> {
        let sql = format!("SELECT {} FROM jobs ORDER BY id", QueryBuilder::JOB_COLUMNS);

        let rows = sqlx::query_as::<_, JobRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Job>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM jobs WHERE title = $1 ORDER BY id LIMIT 1",
            QueryBuilder::JOB_COLUMNS
        );

        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn update(
        &self,
        id: i32,
        patch: &UpdateJobRequest,
    ) -> Result<Option<Job>, RepositoryError> {
        let update = QueryBuilder::partial_update(&patch_fields(patch), COLUMN_MAP)?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {}",
            update.set_clause,
            update.next_placeholder(),
            QueryBuilder::JOB_COLUMNS
        );
        debug!(%sql, "Updating job");

        let row = bind_values(sqlx::query_as::<_, JobRow>(&sql), update.values)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_constraint_error)?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn filter(&self, filter: &JobFilter) -> Result<Vec<Job>, RepositoryError> {
        let query = job_filter_query(filter)?;
        let sql = query.to_sql(QueryBuilder::JOB_COLUMNS, "jobs");
        debug!(%sql, "Filtering jobs");

        let rows = bind_values(sqlx::query_as::<_, JobRow>(&sql), query.into_values())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct JobRow {
    id: i32,
    title: String,
    salary: Option<i32>,
    equity: Option<String>,
    company_handle: String,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            title: row.title,
            salary: row.salary,
            equity: row.equity,
            company_handle: row.company_handle,
        }
    }
}
