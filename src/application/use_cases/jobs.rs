use std::sync::Arc;

use tracing::info;

use crate::application::{
    dto::{CreateJobRequest, JobDto, JobFilter, UpdateJobRequest},
    errors::JobUseCaseError,
    ports::{JobRepository, RepositoryError},
};
use crate::domain::entities::NewJob;

/// Use case for creating jobs
pub struct CreateJobUseCase {
    repository: Arc<dyn JobRepository>,
}

impl CreateJobUseCase {
    pub fn new(repository: Arc<dyn JobRepository>) -> Self {
        Self { repository }
    }

    /// Title and company handle are stored trimmed and lower-cased
    pub async fn execute(&self, request: CreateJobRequest) -> Result<JobDto, JobUseCaseError> {
        let new_job = NewJob::new(
            &request.title,
            request.salary,
            request.equity,
            &request.company_handle,
        );

        let created = match self.repository.insert(&new_job).await {
            Ok(Some(job)) => job,
            Ok(None) => {
                return Err(JobUseCaseError::DuplicateJob(format!(
                    "{} from {}",
                    new_job.title(),
                    new_job.company_handle()
                )))
            }
            Err(RepositoryError::MissingReference(_)) => {
                return Err(JobUseCaseError::UnknownCompany(
                    new_job.company_handle().to_string(),
                ))
            }
            Err(e) => return Err(e.into()),
        };

        info!(id = created.id, company = %created.company_handle, "Job created");
        Ok(created.into())
    }
}

/// Use case for listing every job
pub struct ListJobsUseCase {
    repository: Arc<dyn JobRepository>,
}

impl ListJobsUseCase {
    pub fn new(repository: Arc<dyn JobRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<JobDto>, JobUseCaseError> {
        let jobs = self.repository.find_all().await?;
        Ok(jobs.into_iter().map(Into::into).collect())
    }
}

/// Use case for an exact title lookup
pub struct GetJobByTitleUseCase {
    repository: Arc<dyn JobRepository>,
}

impl GetJobByTitleUseCase {
    pub fn new(repository: Arc<dyn JobRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, title: &str) -> Result<JobDto, JobUseCaseError> {
        let job = self
            .repository
            .find_by_title(title)
            .await?
            .ok_or_else(|| JobUseCaseError::NotFound(title.to_string()))?;

        Ok(job.into())
    }
}

/// Use case for partially updating a job
pub struct UpdateJobUseCase {
    repository: Arc<dyn JobRepository>,
}

impl UpdateJobUseCase {
    pub fn new(repository: Arc<dyn JobRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        id: i32,
        request: UpdateJobRequest,
    ) -> Result<JobDto, JobUseCaseError> {
        if request.is_empty() {
            return Err(JobUseCaseError::NoFieldsProvided);
        }

        let job = match self.repository.update(id, &request).await {
            Ok(Some(job)) => job,
            Ok(None) => return Err(JobUseCaseError::NotFound(id.to_string())),
            Err(RepositoryError::Conflict(_)) => {
                return Err(JobUseCaseError::DuplicateJob(
                    request.title.unwrap_or_default(),
                ))
            }
            Err(e) => return Err(e.into()),
        };

        info!(id = job.id, "Job updated");
        Ok(job.into())
    }
}

/// Use case for deleting a job
pub struct DeleteJobUseCase {
    repository: Arc<dyn JobRepository>,
}

impl DeleteJobUseCase {
    pub fn new(repository: Arc<dyn JobRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: i32) -> Result<(), JobUseCaseError> {
        if !self.repository.delete(id).await? {
            return Err(JobUseCaseError::NotFound(id.to_string()));
        }

        info!(id, "Job deleted");
        Ok(())
    }
}

/// Use case for filtered job search
pub struct SearchJobsUseCase {
    repository: Arc<dyn JobRepository>,
}

impl SearchJobsUseCase {
    pub fn new(repository: Arc<dyn JobRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, filter: JobFilter) -> Result<Vec<JobDto>, JobUseCaseError> {
        filter.check_not_empty()?;

        let jobs = self.repository.filter(&filter).await?;
        if jobs.is_empty() {
            return Err(JobUseCaseError::NoMatch);
        }

        Ok(jobs.into_iter().map(Into::into).collect())
    }
}
