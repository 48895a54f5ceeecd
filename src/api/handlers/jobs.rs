use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::middleware::validation::validate_and_respond;
use crate::application::{
    dto::{
        CreateJobRequest, DeletedResponse, JobFilter, JobListResponse, JobResponse,
        UpdateJobRequest,
    },
    use_cases::{
        CreateJobUseCase, DeleteJobUseCase, GetJobByTitleUseCase, ListJobsUseCase,
        SearchJobsUseCase, UpdateJobUseCase,
    },
};

/// State for `GET /jobs`, which lists or searches depending on the query
#[derive(Clone)]
pub struct JobListState {
    pub list: Arc<ListJobsUseCase>,
    pub search: Arc<SearchJobsUseCase>,
}

/// POST /jobs
/// Create a job (admin only)
#[utoipa::path(
    post,
    path = "/jobs",
    tag = "jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created", body = JobResponse),
        (status = 400, description = "Duplicate job or unknown company"),
        (status = 401, description = "Admin required"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_job_handler(
    State(use_case): State<Arc<CreateJobUseCase>>,
    payload: Result<Json<CreateJobRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<JobResponse>), ApiError> {
    let Json(request) = payload?;
    validate_and_respond(&request)?;

    let job = use_case.execute(request).await?;
    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

/// GET /jobs
/// List all jobs, or filter them when any criterion is given
#[utoipa::path(
    get,
    path = "/jobs",
    tag = "jobs",
    params(
        ("title" = Option<String>, Query, description = "Case-insensitive title substring"),
        ("minSalary" = Option<i32>, Query, description = "Minimum salary"),
        ("hasEquity" = Option<bool>, Query, description = "Only jobs offering equity when true")
    ),
    responses(
        (status = 200, description = "Jobs", body = JobListResponse),
        (status = 404, description = "No job matches the filters")
    )
)]
pub async fn list_jobs_handler(
    State(state): State<JobListState>,
    query: Result<Query<JobFilter>, QueryRejection>,
) -> Result<Json<JobListResponse>, ApiError> {
    let Query(filter) = query?;
    let jobs = if filter.is_empty() {
        state.list.execute().await?
    } else {
        state.search.execute(filter).await?
    };

    Ok(Json(JobListResponse { jobs }))
}

/// GET /jobs/{title}
#[utoipa::path(
    get,
    path = "/jobs/{title}",
    tag = "jobs",
    params(
        ("title" = String, Path, description = "Exact job title")
    ),
    responses(
        (status = 200, description = "Job found", body = JobResponse),
        (status = 404, description = "Job not found")
    )
)]
pub async fn get_job_handler(
    State(use_case): State<Arc<GetJobByTitleUseCase>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<JobResponse>, ApiError> {
    let Path(title) = path?;
    let job = use_case.execute(&title).await?;
    Ok(Json(JobResponse { job }))
}

/// PATCH /jobs/{id}
/// Partially update a job (admin only); `null` clears salary or equity
#[utoipa::path(
    patch,
    path = "/jobs/{id}",
    tag = "jobs",
    params(
        ("id" = i32, Path, description = "Job id")
    ),
    request_body = UpdateJobRequest,
    responses(
        (status = 200, description = "Job updated", body = JobResponse),
        (status = 400, description = "No fields provided or duplicate title"),
        (status = 401, description = "Admin required"),
        (status = 404, description = "Job not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_job_handler(
    State(use_case): State<Arc<UpdateJobUseCase>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateJobRequest>, JsonRejection>,
) -> Result<Json<JobResponse>, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    validate_and_respond(&request)?;

    let job = use_case.execute(id, request).await?;
    Ok(Json(JobResponse { job }))
}

/// DELETE /jobs/{id}
#[utoipa::path(
    delete,
    path = "/jobs/{id}",
    tag = "jobs",
    params(
        ("id" = i32, Path, description = "Job id")
    ),
    responses(
        (status = 200, description = "Job deleted", body = DeletedResponse),
        (status = 401, description = "Admin required"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn delete_job_handler(
    State(use_case): State<Arc<DeleteJobUseCase>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let Path(id) = path?;
    use_case.execute(id).await?;
    Ok(Json(DeletedResponse {
        deleted: id.to_string(),
    }))
}
