use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::authorization::{AuthorizationResult, UserContext};

/// Authorization error response
#[derive(Serialize)]
struct AuthorizationErrorResponse {
    error: String,
}

fn reject(message: String) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(AuthorizationErrorResponse { error: message }),
    )
        .into_response()
}

/// Guard: admins only
pub async fn require_admin(request: Request, next: Next) -> Response {
    let context = request.extensions().get::<UserContext>();

    match AuthorizationResult::check_admin(context) {
        AuthorizationResult::Allowed => next.run(request).await,
        AuthorizationResult::Unauthorized(message) => {
            tracing::warn!(path = %request.uri().path(), %message, "Admin route rejected");
            reject(message)
        }
    }
}
