mod postgres_company_repository;
mod postgres_job_repository;
mod query_builder;

pub use postgres_company_repository::PostgresCompanyRepository;
pub use postgres_job_repository::PostgresJobRepository;
pub use query_builder::{bind_values, FieldValue, FilterQuery, PartialUpdate, QueryBuilder};

use crate::application::ports::RepositoryError;

/// Lift constraint violations out of the generic database error
fn map_constraint_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or_default().to_string();
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict(constraint);
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::MissingReference(constraint);
        }
    }
    RepositoryError::Database(err)
}
