use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use utoipa::ToSchema;

const READINESS_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Store readiness: reachable, migrated, and how busy the pool is
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    pub ready: bool,
    pub schema_migrated: bool,
    pub pool_size: u32,
    pub idle_connections: usize,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Liveness check; never touches the store
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Process is up", body = HealthResponse)
    )
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check: both tables must exist
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Store reachable and migrated", body = ReadinessResponse),
        (status = 503, description = "Store unreachable, slow or not migrated", body = ReadinessResponse)
    )
)]
pub async fn readiness_handler(
    State(pool): State<Arc<PgPool>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let started = Instant::now();

    let check = tokio::time::timeout(
        READINESS_TIMEOUT,
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = current_schema() AND table_name IN ('companies', 'jobs')",
        )
        .fetch_one(pool.as_ref()),
    )
    .await;

    let (schema_migrated, error) = match check {
        Ok(Ok(tables)) => (tables == 2, None),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (false, Some(sanitize_db_error(&e)))
        }
        Err(_) => (
            false,
            Some(format!(
                "Store did not answer within {}s",
                READINESS_TIMEOUT.as_secs()
            )),
        ),
    };

    let response = ReadinessResponse {
        ready: schema_migrated,
        schema_migrated,
        pool_size: pool.size(),
        idle_connections: pool.num_idle(),
        latency_ms: started.elapsed().as_millis() as u64,
        error,
    };
    let status = if response.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// Reduce a store error to its category so connection strings never leak
pub fn sanitize_db_error(error: &sqlx::Error) -> String {
    let category = match error {
        sqlx::Error::Configuration(_) => "configuration",
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) => "connection",
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => "pool",
        sqlx::Error::Database(_) | sqlx::Error::Protocol(_) => "query",
        _ => "unknown",
    };
    format!("store {} error", category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_handler() {
        let Json(response) = health_handler().await;

        assert_eq!(response.status, "healthy");
        assert_eq!(response.service, "jobly");
    }

    #[test]
    fn test_db_errors_reduced_to_category() {
        let config_err = sqlx::Error::Configuration("host=localhost password=secret".into());
        let message = sanitize_db_error(&config_err);
        assert_eq!(message, "store configuration error");
        assert!(!message.contains("secret"));

        let io_err = sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "Connection refused",
        ));
        assert_eq!(sanitize_db_error(&io_err), "store connection error");
        assert_eq!(sanitize_db_error(&sqlx::Error::PoolClosed), "store pool error");
        assert_eq!(sanitize_db_error(&sqlx::Error::RowNotFound), "store unknown error");
    }

    #[test]
    fn test_readiness_serializes_camel_case() {
        let response = ReadinessResponse {
            ready: false,
            schema_migrated: false,
            pool_size: 0,
            idle_connections: 0,
            latency_ms: 3,
            error: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["schemaMigrated"], false);
        assert_eq!(json["latencyMs"], 3);
        assert!(json.get("error").is_none());
    }
}
