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
        CompanyDetailResponse, CompanyFilter, CompanyListResponse, CompanyResponse,
        CreateCompanyRequest, DeletedResponse, UpdateCompanyRequest,
    },
    use_cases::{
        CreateCompanyUseCase, DeleteCompanyUseCase, FindCompanyByNameUseCase, GetCompanyUseCase,
        ListCompaniesUseCase, SearchCompaniesUseCase, UpdateCompanyUseCase,
    },
};

/// State for `GET /companies`, which lists or searches depending on the query
#[derive(Clone)]
pub struct CompanyListState {
    pub list: Arc<ListCompaniesUseCase>,
    pub search: Arc<SearchCompaniesUseCase>,
}

/// POST /companies
/// Create a company (admin only)
#[utoipa::path(
    post,
    path = "/companies",
    tag = "companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Duplicate handle"),
        (status = 401, description = "Admin required"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_company_handler(
    State(use_case): State<Arc<CreateCompanyUseCase>>,
    payload: Result<Json<CreateCompanyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CompanyResponse>), ApiError> {
    let Json(request) = payload?;
    validate_and_respond(&request)?;

    let company = use_case.execute(request).await?;
    Ok((StatusCode::CREATED, Json(CompanyResponse { company })))
}

/// GET /companies
/// List all companies, or filter them when any criterion is given
#[utoipa::path(
    get,
    path = "/companies",
    tag = "companies",
    params(
        ("min" = Option<i32>, Query, description = "Minimum employees (alias: minEmployees)"),
        ("max" = Option<i32>, Query, description = "Maximum employees (alias: maxEmployees)"),
        ("name" = Option<String>, Query, description = "Case-insensitive name prefix (alias: nameLike)")
    ),
    responses(
        (status = 200, description = "Companies", body = CompanyListResponse),
        (status = 400, description = "min is greater than max"),
        (status = 404, description = "No company matches the filters")
    )
)]
pub async fn list_companies_handler(
    State(state): State<CompanyListState>,
    query: Result<Query<CompanyFilter>, QueryRejection>,
) -> Result<Json<CompanyListResponse>, ApiError> {
    let Query(filter) = query?;
    let companies = if filter.is_empty() {
        state.list.execute().await?
    } else {
        state.search.execute(filter).await?
    };

    Ok(Json(CompanyListResponse { companies }))
}

/// GET /companies/{handle}
/// Company with the jobs it posts
#[utoipa::path(
    get,
    path = "/companies/{handle}",
    tag = "companies",
    params(
        ("handle" = String, Path, description = "Company handle")
    ),
    responses(
        (status = 200, description = "Company found", body = CompanyDetailResponse),
        (status = 404, description = "Company not found")
    )
)]
pub async fn get_company_handler(
    State(use_case): State<Arc<GetCompanyUseCase>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<CompanyDetailResponse>, ApiError> {
    let Path(handle) = path?;
    let company = use_case.execute(&handle).await?;
    Ok(Json(CompanyDetailResponse { company }))
}

/// GET /companies/by-name/{name}
#[utoipa::path(
    get,
    path = "/companies/by-name/{name}",
    tag = "companies",
    params(
        ("name" = String, Path, description = "Company name, matched case-insensitively")
    ),
    responses(
        (status = 200, description = "Company found", body = CompanyResponse),
        (status = 404, description = "Company not found")
    )
)]
pub async fn find_company_by_name_handler(
    State(use_case): State<Arc<FindCompanyByNameUseCase>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let Path(name) = path?;
    let company = use_case.execute(&name).await?;
    Ok(Json(CompanyResponse { company }))
}

/// PATCH /companies/{handle}
/// Partially update a company (admin only)
#[utoipa::path(
    patch,
    path = "/companies/{handle}",
    tag = "companies",
    params(
        ("handle" = String, Path, description = "Company handle")
    ),
    request_body = UpdateCompanyRequest,
    responses(
        (status = 200, description = "Company updated", body = CompanyResponse),
        (status = 400, description = "No fields provided"),
        (status = 401, description = "Admin required"),
        (status = 404, description = "Company not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_company_handler(
    State(use_case): State<Arc<UpdateCompanyUseCase>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateCompanyRequest>, JsonRejection>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let Path(handle) = path?;
    let Json(request) = payload?;
    validate_and_respond(&request)?;

    let company = use_case.execute(&handle, request).await?;
    Ok(Json(CompanyResponse { company }))
}

/// DELETE /companies/{handle}
/// Delete a company and its jobs (admin only)
#[utoipa::path(
    delete,
    path = "/companies/{handle}",
    tag = "companies",
    params(
        ("handle" = String, Path, description = "Company handle")
    ),
    responses(
        (status = 200, description = "Company deleted", body = DeletedResponse),
        (status = 401, description = "Admin required"),
        (status = 404, description = "Company not found")
    )
)]
pub async fn delete_company_handler(
    State(use_case): State<Arc<DeleteCompanyUseCase>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let Path(handle) = path?;
    use_case.execute(&handle).await?;
    Ok(Json(DeletedResponse { deleted: handle }))
}
