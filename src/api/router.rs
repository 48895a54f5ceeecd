use axum::{
    middleware as axum_middleware,
    response::Json,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::api::handlers::{
    create_company_handler, create_job_handler, delete_company_handler, delete_job_handler,
    find_company_by_name_handler, get_company_handler, get_job_handler, health_handler,
    list_companies_handler, list_jobs_handler, readiness_handler, update_company_handler,
    update_job_handler, CompanyListState, JobListState,
};
use crate::api::middleware::{
    auth::{self, TokenService},
    authorization::require_admin,
    cors::create_cors_layer,
};
use crate::api::openapi::ApiDoc;
use crate::application::use_cases::{
    CreateCompanyUseCase, CreateJobUseCase, DeleteCompanyUseCase, DeleteJobUseCase,
    FindCompanyByNameUseCase, GetCompanyUseCase, GetJobByTitleUseCase, ListCompaniesUseCase,
    ListJobsUseCase, SearchCompaniesUseCase, SearchJobsUseCase, UpdateCompanyUseCase,
    UpdateJobUseCase,
};
use crate::config::Config;

/// Application state container
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub tokens: TokenService,
    pub config: Config,
    // Companies
    pub create_company_use_case: Arc<CreateCompanyUseCase>,
    pub list_companies_use_case: Arc<ListCompaniesUseCase>,
    pub get_company_use_case: Arc<GetCompanyUseCase>,
    pub find_company_by_name_use_case: Arc<FindCompanyByNameUseCase>,
    pub update_company_use_case: Arc<UpdateCompanyUseCase>,
    pub delete_company_use_case: Arc<DeleteCompanyUseCase>,
    pub search_companies_use_case: Arc<SearchCompaniesUseCase>,
    // Jobs
    pub create_job_use_case: Arc<CreateJobUseCase>,
    pub list_jobs_use_case: Arc<ListJobsUseCase>,
    pub get_job_use_case: Arc<GetJobByTitleUseCase>,
    pub update_job_use_case: Arc<UpdateJobUseCase>,
    pub delete_job_use_case: Arc<DeleteJobUseCase>,
    pub search_jobs_use_case: Arc<SearchJobsUseCase>,
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let company_list_state = CompanyListState {
        list: Arc::clone(&state.list_companies_use_case),
        search: Arc::clone(&state.search_companies_use_case),
    };
    let job_list_state = JobListState {
        list: Arc::clone(&state.list_jobs_use_case),
        search: Arc::clone(&state.search_jobs_use_case),
    };

    let public = Router::new()
        // Health check and docs
        .route("/health", get(health_handler))
        .route(
            "/health/ready",
            get(readiness_handler).with_state(Arc::clone(&state.pool)),
        )
        .route("/api-docs/openapi.json", get(openapi_handler))
        // Companies
        .route(
            "/companies",
            get(list_companies_handler).with_state(company_list_state),
        )
        .route(
            "/companies/{handle}",
            get(get_company_handler).with_state(Arc::clone(&state.get_company_use_case)),
        )
        .route(
            "/companies/by-name/{name}",
            get(find_company_by_name_handler)
                .with_state(Arc::clone(&state.find_company_by_name_use_case)),
        )
        // Jobs; the single segment is a title for GET and an id for PATCH/DELETE
        .route("/jobs", get(list_jobs_handler).with_state(job_list_state))
        .route(
            "/jobs/{id}",
            get(get_job_handler).with_state(Arc::clone(&state.get_job_use_case)),
        );

    let admin = Router::new()
        .route(
            "/companies",
            post(create_company_handler).with_state(Arc::clone(&state.create_company_use_case)),
        )
        .route(
            "/companies/{handle}",
            patch(update_company_handler).with_state(Arc::clone(&state.update_company_use_case)),
        )
        .route(
            "/companies/{handle}",
            delete(delete_company_handler).with_state(Arc::clone(&state.delete_company_use_case)),
        )
        .route(
            "/jobs",
            post(create_job_handler).with_state(Arc::clone(&state.create_job_use_case)),
        )
        .route(
            "/jobs/{id}",
            patch(update_job_handler).with_state(Arc::clone(&state.update_job_use_case)),
        )
        .route(
            "/jobs/{id}",
            delete(delete_job_handler).with_state(Arc::clone(&state.delete_job_use_case)),
        )
        .route_layer(axum_middleware::from_fn(require_admin));

    public
        .merge(admin)
        // Outermost last: tracing wraps CORS, body limit and token parsing
        .layer(axum_middleware::from_fn_with_state(
            state.tokens.clone(),
            auth::auth_middleware,
        ))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_bytes))
        .layer(create_cors_layer(&state.config.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
