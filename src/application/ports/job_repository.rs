use async_trait::async_trait;

use crate::application::dto::{JobFilter, UpdateJobRequest};
use crate::application::ports::RepositoryError;
use crate::domain::entities::{Job, NewJob};
#[cfg(test)]
use mockall::automock;

/// Port for job persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Insert a job unless the same title is already posted by the company.
    ///
    /// Returns `None` on a duplicate; fails with
    /// [`RepositoryError::MissingReference`] when the company does not exist.
    async fn insert(&self, job: &NewJob) -> Result<Option<Job>, RepositoryError>;

    /// All jobs ordered by id
    async fn find_all(&self) -> Result<Vec<Job>, RepositoryError>;

    /// Exact title lookup; the lowest id wins when several companies share it
    async fn find_by_title(&self, title: &str) -> Result<Option<Job>, RepositoryError>;

    /// Apply a partial update; `None` when no job has that id
    async fn update(&self, id: i32, patch: &UpdateJobRequest)
        -> Result<Option<Job>, RepositoryError>;

    /// Returns whether a row was deleted
    async fn delete(&self, id: i32) -> Result<bool, RepositoryError>;

    /// Jobs matching the filter, possibly none
    async fn filter(&self, filter: &JobFilter) -> Result<Vec<Job>, RepositoryError>;
}
