use async_trait::async_trait;

use crate::application::dto::{CompanyFilter, UpdateCompanyRequest};
use crate::application::ports::RepositoryError;
use crate::domain::entities::{Company, Job};
#[cfg(test)]
use mockall::automock;

/// Port for company persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Insert a company unless its handle is taken.
    ///
    /// Returns `None` when a company with the same handle already exists.
    async fn insert(&self, company: &Company) -> Result<Option<Company>, RepositoryError>;

    /// All companies ordered by name
    async fn find_all(&self) -> Result<Vec<Company>, RepositoryError>;

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Company>, RepositoryError>;

    /// Case-insensitive exact name lookup
    async fn find_by_name(&self, name: &str) -> Result<Option<Company>, RepositoryError>;

    /// Jobs posted by a company ordered by id
    async fn find_jobs(&self, handle: &str) -> Result<Vec<Job>, RepositoryError>;

    /// Apply a partial update; `None` when no company has that handle
    async fn update(
        &self,
        handle: &str,
        patch: &UpdateCompanyRequest,
    ) -> Result<Option<Company>, RepositoryError>;

    /// Returns whether a row was deleted
    async fn delete(&self, handle: &str) -> Result<bool, RepositoryError>;

    /// Companies matching the filter, possibly none
    async fn filter(&self, filter: &CompanyFilter) -> Result<Vec<Company>, RepositoryError>;
}
