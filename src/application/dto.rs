use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::application::errors::QueryError;
use crate::domain::{
    entities::{Company, Job, HANDLE_REGEX},
    value_objects::Equity,
};

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) when combined with `#[serde(default)]`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query text that is blank after trimming counts as not supplied
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}

// ---------------------------------------------------------------------------
// Companies
// ---------------------------------------------------------------------------

/// DTO for company responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl From<Company> for CompanyDto {
    fn from(company: Company) -> Self {
        Self {
            handle: company.handle,
            name: company.name,
            description: company.description,
            num_employees: company.num_employees,
            logo_url: company.logo_url,
        }
    }
}

/// A job as listed inside its company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompanyJobDto {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
}

impl From<Job> for CompanyJobDto {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
        }
    }
}

/// A company together with the jobs it posts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetailDto {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
    pub jobs: Vec<CompanyJobDto>,
}

impl CompanyDetailDto {
    pub fn new(company: Company, jobs: Vec<Job>) -> Self {
        Self {
            handle: company.handle,
            name: company.name,
            description: company.description,
            num_employees: company.num_employees,
            logo_url: company.logo_url,
            jobs: jobs.into_iter().map(CompanyJobDto::from).collect(),
        }
    }
}

/// DTO for company creation
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCompanyRequest {
    #[validate(
        length(min = 1, max = 25, message = "handle must be 1 to 25 characters"),
        regex(path = *HANDLE_REGEX, message = "handle may only contain lower-case letters, digits, '-' and '_'")
    )]
    pub handle: String,
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "description cannot be empty"))]
    pub description: String,
    #[validate(range(min = 0, message = "numEmployees cannot be negative"))]
    pub num_employees: Option<i32>,
    #[validate(url(message = "logoUrl must be a URL"))]
    pub logo_url: Option<String>,
}

/// DTO for a partial company update; only supplied fields change
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCompanyRequest {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "numEmployees cannot be negative"))]
    pub num_employees: Option<i32>,
    #[validate(url(message = "logoUrl must be a URL"))]
    pub logo_url: Option<String>,
}

impl UpdateCompanyRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.num_employees.is_none()
            && self.logo_url.is_none()
    }
}

/// Optional company list filters
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct CompanyFilter {
    /// Minimum number of employees
    #[serde(alias = "minEmployees")]
    pub min: Option<i32>,
    /// Maximum number of employees
    #[serde(alias = "maxEmployees")]
    pub max: Option<i32>,
    /// Case-insensitive name prefix
    #[serde(default, alias = "nameLike", deserialize_with = "empty_as_none")]
    pub name: Option<String>,
}

impl CompanyFilter {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.name.is_none()
    }

    pub fn check_range(&self) -> Result<(), QueryError> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min > max => Err(QueryError::InvalidRange { min, max }),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyResponse {
    pub company: CompanyDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyDetailResponse {
    pub company: CompanyDetailDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyListResponse {
    pub companies: Vec<CompanyDto>,
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// DTO for job responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobDto {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
    pub company_handle: String,
}

impl From<Job> for JobDto {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company_handle: job.company_handle,
        }
    }
}

/// DTO for job creation
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateJobRequest {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: String,
    #[validate(range(min = 0, message = "salary cannot be negative"))]
    pub salary: Option<i32>,
    #[schema(value_type = Option<String>, example = "0.2")]
    pub equity: Option<Equity>,
    #[serde(alias = "company_handle")]
    #[validate(length(min = 1, max = 25, message = "companyHandle must be 1 to 25 characters"))]
    pub company_handle: String,
}

/// DTO for a partial job update.
///
/// `salary` and `equity` accept an explicit `null`, which clears the stored
/// value; leaving a field out keeps it unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_job_patch"))]
pub struct UpdateJobRequest {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub equity: Option<Option<Equity>>,
}

impl UpdateJobRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.salary.is_none() && self.equity.is_none()
    }
}

fn validate_job_patch(patch: &UpdateJobRequest) -> Result<(), ValidationError> {
    if let Some(Some(salary)) = patch.salary {
        if salary < 0 {
            let mut err = ValidationError::new("range");
            err.message = Some("salary cannot be negative".into());
            return Err(err);
        }
    }
    Ok(())
}

/// Optional job list filters
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    /// Case-insensitive title substring
    #[serde(default, deserialize_with = "empty_as_none")]
    pub title: Option<String>,
    /// Minimum salary
    pub min_salary: Option<i32>,
    /// When true, only jobs with non-zero equity
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.min_salary.is_none() && self.has_equity.is_none()
    }

    pub fn check_not_empty(&self) -> Result<(), QueryError> {
        if self.is_empty() {
            return Err(QueryError::NoFiltersProvided);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobResponse {
    pub job: JobDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobListResponse {
    pub jobs: Vec<JobDto>,
}

/// Body returned by delete endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub deleted: String,
}
