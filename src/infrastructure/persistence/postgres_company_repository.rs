use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::map_constraint_error;
use super::postgres_job_repository::JobRow;
use super::query_builder::{bind_values, FieldValue, FilterQuery, QueryBuilder};
use crate::application::dto::{CompanyFilter, UpdateCompanyRequest};
use crate::application::errors::QueryError;
use crate::application::ports::{CompanyRepository, RepositoryError};
use crate::domain::entities::{Company, Job};

/// External field name to `companies` column
const COLUMN_MAP: &[(&str, &str)] = &[
    ("name", "name"),
    ("description", "description"),
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
];

pub struct PostgresCompanyRepository {
    pool: PgPool,
}

impl PostgresCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Supplied patch fields keyed by their external names
fn patch_fields(patch: &UpdateCompanyRequest) -> Vec<(&'static str, FieldValue)> {
    let mut fields = Vec::new();
    if let Some(name) = &patch.name {
        fields.push(("name", FieldValue::from(name.as_str())));
    }
    if let Some(description) = &patch.description {
        fields.push(("description", FieldValue::from(description.as_str())));
    }
    if let Some(num_employees) = patch.num_employees {
        fields.push(("numEmployees", FieldValue::from(num_employees)));
    }
    if let Some(logo_url) = &patch.logo_url {
        fields.push(("logoUrl", FieldValue::from(logo_url.as_str())));
    }
    fields
}

/// Filter query for `companies`.
///
/// Fails with [`QueryError::InvalidRange`] when `min > max`. Orders by name
/// when a name prefix is given, otherwise by employee count.
pub(crate) fn company_filter_query(filter: &CompanyFilter) -> Result<FilterQuery, QueryError> {
    filter.check_range()?;

    let mut query = FilterQuery::new("num_employees");

    if let Some(min) = filter.min {
        query.push("num_employees >=", FieldValue::from(min));
    }
    if let Some(max) = filter.max {
        query.push("num_employees <=", FieldValue::from(max));
    }
    if let Some(name) = &filter.name {
        query.push(
            "name ILIKE",
            FieldValue::from(format!("{}%", QueryBuilder::escape_like(name))),
        );
        query.order_by("name");
    }

    Ok(query)
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn insert(&self, company: &Company) -> Result<Option<Company>, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO companies (handle, name, description, num_employees, logo_url)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (handle) DO NOTHING
            RETURNING {}
            "#,
            QueryBuilder::COMPANY_COLUMNS
        );

        let row = sqlx::query_as::<_, CompanyRow>(&sql)
            .bind(&company.handle)
            .bind(&company.name)
            .bind(&company.description)
            .bind(company.num_employees)
            .bind(&company.logo_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_constraint_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Company>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM companies ORDER BY name",
            QueryBuilder::COMPANY_COLUMNS
        );

        let rows = sqlx::query_as::<_, CompanyRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Company>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM companies WHERE handle = $1",
            QueryBuilder::COMPANY_COLUMNS
        );

        let row = sqlx::query_as::<_, CompanyRow>(&sql)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Company>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM companies WHERE LOWER(name) = LOWER($1) ORDER BY handle LIMIT 1",
            QueryBuilder::COMPANY_COLUMNS
        );

        let row = sqlx::query_as::<_, CompanyRow>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_jobs(&self, handle: &str) -> Result<Vec<Job>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM jobs WHERE company_handle = $1 ORDER BY id",
            QueryBuilder::JOB_COLUMNS
        );

        let rows = sqlx::query_as::<_, JobRow>(&sql)
            .bind(handle)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        handle: &str,
        patch: &UpdateCompanyRequest,
    ) -> Result<Option<Company>, RepositoryError> {
        let update = QueryBuilder::partial_update(&patch_fields(patch), COLUMN_MAP)?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {}",
            update.set_clause,
            update.next_placeholder(),
            QueryBuilder::COMPANY_COLUMNS
        );
        debug!(%sql, "Updating company");

        let row = bind_values(sqlx::query_as::<_, CompanyRow>(&sql), update.values)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_constraint_error)?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, handle: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM companies WHERE handle = $1")
            .bind(handle)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn filter(&self, filter: &CompanyFilter) -> Result<Vec<Company>, RepositoryError> {
        let query = company_filter_query(filter)?;
        let sql = query.to_sql(QueryBuilder::COMPANY_COLUMNS, "companies");
        debug!(%sql, "Filtering companies");

        let rows = bind_values(sqlx::query_as::<_, CompanyRow>(&sql), query.into_values())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// Internal row mapping struct
#[derive(sqlx::FromRow)]
struct CompanyRow {
    handle: String,
    name: String,
    description: String,
    num_employees: Option<i32>,
    logo_url: Option<String>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Company {
            handle: row.handle,
            name: row.name,
            description: row.description,
            num_employees: row.num_employees,
            logo_url: row.logo_url,
        }
    }
}
