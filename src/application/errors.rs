//! Error taxonomy for the company and job use cases.
//!
//! Every failure condition has its own variant so callers can tell them
//! apart without inspecting messages.

use thiserror::Error;

use crate::application::ports::RepositoryError;
use crate::domain::errors::DomainError;

/// Rejections raised while assembling a statement, before it is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("No data provided")]
    NoFieldsProvided,

    #[error("Minimum employees ({min}) cannot be greater than maximum ({max})")]
    InvalidRange { min: i32, max: i32 },

    #[error("No filters provided")]
    NoFiltersProvided,
}

/// Error type for company use cases
#[derive(Debug, Error)]
pub enum CompanyUseCaseError {
    #[error("Duplicate company: {0}")]
    DuplicateHandle(String),

    #[error("No company: {0}")]
    NotFound(String),

    #[error("No data provided")]
    NoFieldsProvided,

    #[error("Minimum employees ({min}) cannot be greater than maximum ({max})")]
    InvalidRange { min: i32, max: i32 },

    #[error("No company in that filtered range")]
    NoMatch,

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

impl From<QueryError> for CompanyUseCaseError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NoFieldsProvided => Self::NoFieldsProvided,
            QueryError::InvalidRange { min, max } => Self::InvalidRange { min, max },
            other => Self::Repository(RepositoryError::Query(other)),
        }
    }
}

impl From<RepositoryError> for CompanyUseCaseError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Query(query_err) => query_err.into(),
            other => Self::Repository(other),
        }
    }
}

/// Error type for job use cases
#[derive(Debug, Error)]
pub enum JobUseCaseError {
    /// Carries `"<title> from <company>"` on create, the title on update
    #[error("Duplicate job: {0}")]
    DuplicateJob(String),

    #[error("No company: {0}")]
    UnknownCompany(String),

    #[error("No job: {0}")]
    NotFound(String),

    #[error("No data provided")]
    NoFieldsProvided,

    #[error("No filters provided")]
    NoFiltersProvided,

    #[error("No job matches the given filters")]
    NoMatch,

    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

impl From<QueryError> for JobUseCaseError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NoFieldsProvided => Self::NoFieldsProvided,
            QueryError::NoFiltersProvided => Self::NoFiltersProvided,
            other => Self::Repository(RepositoryError::Query(other)),
        }
    }
}

impl From<RepositoryError> for JobUseCaseError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Query(query_err) => query_err.into(),
            other => Self::Repository(other),
        }
    }
}
