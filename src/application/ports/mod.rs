mod company_repository;
mod job_repository;

use thiserror::Error;

use crate::application::errors::QueryError;

pub use company_repository::CompanyRepository;
pub use job_repository::JobRepository;

#[cfg(test)]
pub use company_repository::MockCompanyRepository;
#[cfg(test)]
pub use job_repository::MockJobRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid query: {0}")]
    Query(#[from] QueryError),

    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    #[error("Referenced row does not exist: {0}")]
    MissingReference(String),
}
