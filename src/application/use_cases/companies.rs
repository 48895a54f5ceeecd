use std::sync::Arc;

use tracing::info;

use crate::application::{
    dto::{
        CompanyDetailDto, CompanyDto, CompanyFilter, CreateCompanyRequest, UpdateCompanyRequest,
    },
    errors::CompanyUseCaseError,
    ports::CompanyRepository,
};
use crate::domain::entities::Company;

/// Use case for creating companies
pub struct CreateCompanyUseCase {
    repository: Arc<dyn CompanyRepository>,
}

impl CreateCompanyUseCase {
    pub fn new(repository: Arc<dyn CompanyRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        request: CreateCompanyRequest,
    ) -> Result<CompanyDto, CompanyUseCaseError> {
        let company = Company::new(
            request.handle,
            request.name,
            request.description,
            request.num_employees,
            request.logo_url,
        )?;

        // Single conditional insert; no row back means the handle is taken
        let created = self
            .repository
            .insert(&company)
            .await?
            .ok_or_else(|| CompanyUseCaseError::DuplicateHandle(company.handle.clone()))?;

        info!(handle = %created.handle, "Company created");
        Ok(created.into())
    }
}

/// Use case for listing every company
pub struct ListCompaniesUseCase {
    repository: Arc<dyn CompanyRepository>,
}

impl ListCompaniesUseCase {
    pub fn new(repository: Arc<dyn CompanyRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<CompanyDto>, CompanyUseCaseError> {
        let companies = self.repository.find_all().await?;
        Ok(companies.into_iter().map(Into::into).collect())
    }
}

/// Use case for fetching a company by handle together with its jobs
pub struct GetCompanyUseCase {
    repository: Arc<dyn CompanyRepository>,
}

impl GetCompanyUseCase {
    pub fn new(repository: Arc<dyn CompanyRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, handle: &str) -> Result<CompanyDetailDto, CompanyUseCaseError> {
        let company = self
            .repository
            .find_by_handle(handle)
            .await?
            .ok_or_else(|| CompanyUseCaseError::NotFound(handle.to_string()))?;

        let jobs = self.repository.find_jobs(handle).await?;

        Ok(CompanyDetailDto::new(company, jobs))
    }
}

/// Use case for a case-insensitive lookup by company name
pub struct FindCompanyByNameUseCase {
    repository: Arc<dyn CompanyRepository>,
}

impl FindCompanyByNameUseCase {
    pub fn new(repository: Arc<dyn CompanyRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, name: &str) -> Result<CompanyDto, CompanyUseCaseError> {
        let company = self
            .repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| CompanyUseCaseError::NotFound(name.to_string()))?;

        Ok(company.into())
    }
}

/// Use case for partially updating a company
pub struct UpdateCompanyUseCase {
    repository: Arc<dyn CompanyRepository>,
}

impl UpdateCompanyUseCase {
    pub fn new(repository: Arc<dyn CompanyRepository>) -> Self {
        Self { repository }
    }

    /// An empty patch is rejected by the clause builder inside the repository
    pub async fn execute(
        &self,
        handle: &str,
        request: UpdateCompanyRequest,
    ) -> Result<CompanyDto, CompanyUseCaseError> {
        let company = self
            .repository
            .update(handle, &request)
            .await?
            .ok_or_else(|| CompanyUseCaseError::NotFound(handle.to_string()))?;

        info!(handle = %company.handle, "Company updated");
        Ok(company.into())
    }
}

/// Use case for deleting a company and, by cascade, its jobs
pub struct DeleteCompanyUseCase {
    repository: Arc<dyn CompanyRepository>,
}

impl DeleteCompanyUseCase {
    pub fn new(repository: Arc<dyn CompanyRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, handle: &str) -> Result<(), CompanyUseCaseError> {
        if !self.repository.delete(handle).await? {
            return Err(CompanyUseCaseError::NotFound(handle.to_string()));
        }

        info!(handle, "Company deleted");
        Ok(())
    }
}

/// Use case for filtered company search.
///
/// An empty result is reported as [`CompanyUseCaseError::NoMatch`].
pub struct SearchCompaniesUseCase {
    repository: Arc<dyn CompanyRepository>,
}

impl SearchCompaniesUseCase {
    pub fn new(repository: Arc<dyn CompanyRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        filter: CompanyFilter,
    ) -> Result<Vec<CompanyDto>, CompanyUseCaseError> {
        filter.check_range()?;

        let companies = self.repository.filter(&filter).await?;
        if companies.is_empty() {
            return Err(CompanyUseCaseError::NoMatch);
        }

        Ok(companies.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::QueryError;
    use crate::application::ports::{MockCompanyRepository, RepositoryError};
    use crate::domain::entities::Job;

    fn company(handle: &str, name: &str, num_employees: i32) -> Company {
        Company {
            handle: handle.to_string(),
            name: name.to_string(),
            description: format!("Desc of {}", name),
            num_employees: Some(num_employees),
            logo_url: None,
        }
    }

    fn create_request(handle: &str) -> CreateCompanyRequest {
        CreateCompanyRequest {
            handle: handle.to_string(),
            name: "New".to_string(),
            description: "New Description".to_string(),
            num_employees: Some(1),
            logo_url: Some("http://new.img".to_string()),
        }
    }

    mod create_company_use_case_tests {
        use super::*;

        #[tokio::test]
        async fn test_create_company_success() {
            // Arrange
            let mut mock_repo = MockCompanyRepository::new();
            mock_repo
                .expect_insert()
                .withf(|c| c.handle == "new" && c.name == "New")
                .times(1)
                .returning(|c| Ok(Some(c.clone())));

            let use_case = CreateCompanyUseCase::new(Arc::new(mock_repo));

            // Act
            let result = use_case.execute(create_request("new")).await;

            // Assert
            let dto = result.unwrap();
            assert_eq!(dto.handle, "new");
            assert_eq!(dto.logo_url.as_deref(), Some("http://new.img"));
        }

        #[tokio::test]
        async fn test_create_company_duplicate_handle() {
            // Arrange
            let mut mock_repo = MockCompanyRepository::new();
            mock_repo.expect_insert().times(1).returning(|_| Ok(None));

            let use_case = CreateCompanyUseCase::new(Arc::new(mock_repo));

            // Act
            let result = use_case.execute(create_request("c1")).await;

            // Assert
            assert!(matches!(
                result.unwrap_err(),
                CompanyUseCaseError::DuplicateHandle(handle) if handle == "c1"
            ));
        }

        #[tokio::test]
        async fn test_create_company_invalid_handle_never_reaches_repository() {
            // Arrange
            let mut mock_repo = MockCompanyRepository::new();
            mock_repo.expect_insert().times(0);

            let use_case = CreateCompanyUseCase::new(Arc::new(mock_repo));

            // Act
            let result = use_case.execute(create_request("not a handle")).await;

            // Assert
            assert!(matches!(
                result.unwrap_err(),
                CompanyUseCaseError::Domain(_)
            ));
        }
    }

    mod get_company_use_case_tests {
        use super::*;

        #[tokio::test]
        async fn test_get_company_includes_jobs() {
            // Arrange
            let mut mock_repo = MockCompanyRepository::new();
            mock_repo
                .expect_find_by_handle()
                .withf(|h| h == "c1")
                .times(1)
                .returning(|_| Ok(Some(company("c1", "C1", 1))));
            mock_repo
                .expect_find_jobs()
                .withf(|h| h == "c1")
                .times(1)
                .returning(|_| {
                    Ok(vec![Job {
                        id: 1,
                        title: "t1".to_string(),
                        salary: Some(100),
                        equity: Some("0.1".to_string()),
                        company_handle: "c1".to_string(),
                    }])
                });

            let use_case = GetCompanyUseCase::new(Arc::new(mock_repo));

            // Act
            let detail = use_case.execute("c1").await.unwrap();

            // Assert
            assert_eq!(detail.handle, "c1");
            assert_eq!(detail.jobs.len(), 1);
            assert_eq!(detail.jobs[0].title, "t1");
        }

        #[tokio::test]
        async fn test_get_company_not_found_skips_jobs() {
            // Arrange
            let mut mock_repo = MockCompanyRepository::new();
            mock_repo
                .expect_find_by_handle()
                .times(1)
                .returning(|_| Ok(None));
            mock_repo.expect_find_jobs().times(0);

            let use_case = GetCompanyUseCase::new(Arc::new(mock_repo));

            // Act
            let result = use_case.execute("nope").await;

            // Assert
            assert!(matches!(
                result.unwrap_err(),
                CompanyUseCaseError::NotFound(handle) if handle == "nope"
            ));
        }

        #[tokio::test]
        async fn test_find_by_name_not_found() {
            // Arrange
            let mut mock_repo = MockCompanyRepository::new();
            mock_repo
                .expect_find_by_name()
                .withf(|n| n == "Nope")
                .times(1)
                .returning(|_| Ok(None));

            let use_case = FindCompanyByNameUseCase::new(Arc::new(mock_repo));

            // Act
            let result = use_case.execute("Nope").await;

            // Assert
            assert!(matches!(
                result.unwrap_err(),
                CompanyUseCaseError::NotFound(_)
            ));
        }
    }

    mod update_company_use_case_tests {
        use super::*;

        #[tokio::test]
        async fn test_update_company_success() {
            // Arrange
            let mut mock_repo = MockCompanyRepository::new();
            mock_repo
                .expect_update()
                .withf(|h, patch| h == "c1" && patch.name.as_deref() == Some("New"))
                .times(1)
                .returning(|_, _| Ok(Some(company("c1", "New", 1))));

            let use_case = UpdateCompanyUseCase::new(Arc::new(mock_repo));
            let patch = UpdateCompanyRequest {
                name: Some("New".to_string()),
                ..Default::default()
            };

            // Act
            let dto = use_case.execute("c1", patch).await.unwrap();

            // Assert
            assert_eq!(dto.name, "New");
        }

        #[tokio::test]
        async fn test_update_company_empty_patch() {
            // Arrange
            let mut mock_repo = MockCompanyRepository::new();
            mock_repo
                .expect_update()
                .times(1)
                .returning(|_, _| Err(RepositoryError::Query(QueryError::NoFieldsProvided)));

            let use_case = UpdateCompanyUseCase::new(Arc::new(mock_repo));

            // Act
            let result = use_case
                .execute("c1", UpdateCompanyRequest::default())
                .await;

            // Assert
            assert!(matches!(
                result.unwrap_err(),
                CompanyUseCaseError::NoFieldsProvided
            ));
        }

        #[tokio::test]
        async fn test_update_company_not_found() {
            // Arrange
            let mut mock_repo = MockCompanyRepository::new();
            mock_repo.expect_update().times(1).returning(|_, _| Ok(None));

            let use_case = UpdateCompanyUseCase::new(Arc::new(mock_repo));
            let patch = UpdateCompanyRequest {
                num_employees: Some(3),
                ..Default::default()
            };

            // Act
            let result = use_case.execute("nope", patch).await;

            // Assert
            assert!(matches!(
                result.unwrap_err(),
                CompanyUseCaseError::NotFound(_)
            ));
        }
    }

    mod delete_company_use_case_tests {
        use super::*;

        #[tokio::test]
        async fn test_delete_company_success() {
            let mut mock_repo = MockCompanyRepository::new();
            mock_repo
                .expect_delete()
                .withf(|h| h == "c1")
                .times(1)
                .returning(|_| Ok(true));

            let use_case = DeleteCompanyUseCase::new(Arc::new(mock_repo));

            assert!(use_case.execute("c1").await.is_ok());
        }

        #[tokio::test]
        async fn test_delete_company_not_found() {
            let mut mock_repo = MockCompanyRepository::new();
            mock_repo.expect_delete().times(1).returning(|_| Ok(false));

            let use_case = DeleteCompanyUseCase::new(Arc::new(mock_repo));

            assert!(matches!(
                use_case.execute("nope").await.unwrap_err(),
                CompanyUseCaseError::NotFound(_)
            ));
        }
    }

    mod search_companies_use_case_tests {
        use super::*;

        #[tokio::test]
        async fn test_search_invalid_range_never_queries() {
            // Arrange
            let mut mock_repo = MockCompanyRepository::new();
            mock_repo.expect_filter().times(0);

            let use_case = SearchCompaniesUseCase::new(Arc::new(mock_repo));
            let filter = CompanyFilter {
                min: Some(10),
                max: Some(5),
                name: None,
            };

            // Act
            let result = use_case.execute(filter).await;

            // Assert
            assert!(matches!(
                result.unwrap_err(),
                CompanyUseCaseError::InvalidRange { min: 10, max: 5 }
            ));
        }

        #[tokio::test]
        async fn test_search_empty_result_is_no_match() {
            // Arrange
            let mut mock_repo = MockCompanyRepository::new();
            mock_repo
                .expect_filter()
                .times(1)
                .returning(|_| Ok(Vec::new()));

            let use_case = SearchCompaniesUseCase::new(Arc::new(mock_repo));
            let filter = CompanyFilter {
                name: Some("zzz".to_string()),
                ..Default::default()
            };

            // Act
            let result = use_case.execute(filter).await;

            // Assert
            assert!(matches!(result.unwrap_err(), CompanyUseCaseError::NoMatch));
        }

        #[tokio::test]
        async fn test_search_returns_matches() {
            // Arrange
            let mut mock_repo = MockCompanyRepository::new();
            mock_repo
                .expect_filter()
                .withf(|f| f.min == Some(2))
                .times(1)
                .returning(|_| Ok(vec![company("c2", "C2", 2), company("c3", "C3", 3)]));

            let use_case = SearchCompaniesUseCase::new(Arc::new(mock_repo));
            let filter = CompanyFilter {
                min: Some(2),
                ..Default::default()
            };

            // Act
            let companies = use_case.execute(filter).await.unwrap();

            // Assert
            let handles: Vec<_> = companies.iter().map(|c| c.handle.as_str()).collect();
            assert_eq!(handles, vec!["c2", "c3"]);
        }
    }
}
