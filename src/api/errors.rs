use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::api::middleware::validation::ValidationErrorResponse;
use crate::application::errors::{CompanyUseCaseError, JobUseCaseError};

/// API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<(StatusCode, ValidationErrorResponse)> for ApiError {
    fn from((status, response): (StatusCode, ValidationErrorResponse)) -> Self {
        ApiError::new(status, response.error)
    }
}

// Extractor rejections keep axum's status but use the JSON error body

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "Rejected request body");
        ApiError::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "Rejected query string");
        ApiError::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "Rejected path parameter");
        ApiError::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
        }));

        (self.status, body).into_response()
    }
}

// Convert use case errors to API errors

impl From<CompanyUseCaseError> for ApiError {
    fn from(err: CompanyUseCaseError) -> Self {
        match err {
            CompanyUseCaseError::NotFound(_) | CompanyUseCaseError::NoMatch => {
                ApiError::not_found(err.to_string())
            }
            CompanyUseCaseError::DuplicateHandle(_)
            | CompanyUseCaseError::NoFieldsProvided
            | CompanyUseCaseError::InvalidRange { .. }
            | CompanyUseCaseError::Domain(_) => ApiError::bad_request(err.to_string()),
            CompanyUseCaseError::Repository(e) => {
                tracing::error!(error = %e, "Company repository failure");
                ApiError::internal_error("Internal server error")
            }
        }
    }
}

impl From<JobUseCaseError> for ApiError {
    fn from(err: JobUseCaseError) -> Self {
        match err {
            JobUseCaseError::NotFound(_) | JobUseCaseError::NoMatch => {
                ApiError::not_found(err.to_string())
            }
            JobUseCaseError::DuplicateJob(_)
            | JobUseCaseError::UnknownCompany(_)
            | JobUseCaseError::NoFieldsProvided
            | JobUseCaseError::NoFiltersProvided => ApiError::bad_request(err.to_string()),
            JobUseCaseError::Repository(e) => {
                tracing::error!(error = %e, "Job repository failure");
                ApiError::internal_error("Internal server error")
            }
        }
    }
}
