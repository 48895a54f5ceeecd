use utoipa::OpenApi;

use crate::api::handlers::health::{HealthResponse, ReadinessResponse};
use crate::application::dto::{
    CompanyDetailDto, CompanyDetailResponse, CompanyDto, CompanyJobDto, CompanyListResponse,
    CompanyResponse, CreateCompanyRequest, CreateJobRequest, DeletedResponse, JobDto,
    JobListResponse, JobResponse, UpdateCompanyRequest, UpdateJobRequest,
};

/// OpenAPI specification for the Jobly API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Jobly API",
        version = "1.0.0",
        description = "Companies and the jobs they post, with filtered search"
    ),
    servers(
        (url = "http://localhost:3001", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::readiness_handler,
        crate::api::handlers::companies::create_company_handler,
        crate::api::handlers::companies::list_companies_handler,
        crate::api::handlers::companies::get_company_handler,
        crate::api::handlers::companies::find_company_by_name_handler,
        crate::api::handlers::companies::update_company_handler,
        crate::api::handlers::companies::delete_company_handler,
        crate::api::handlers::jobs::create_job_handler,
        crate::api::handlers::jobs::list_jobs_handler,
        crate::api::handlers::jobs::get_job_handler,
        crate::api::handlers::jobs::update_job_handler,
        crate::api::handlers::jobs::delete_job_handler,
    ),
    components(
        schemas(
            CompanyDto,
            CompanyJobDto,
            CompanyDetailDto,
            CreateCompanyRequest,
            UpdateCompanyRequest,
            CompanyResponse,
            CompanyDetailResponse,
            CompanyListResponse,
            JobDto,
            CreateJobRequest,
            UpdateJobRequest,
            JobResponse,
            JobListResponse,
            DeletedResponse,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "companies", description = "Company operations"),
        (name = "jobs", description = "Job operations")
    )
)]
pub struct ApiDoc;
