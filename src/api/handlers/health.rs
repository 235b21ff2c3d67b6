//! Health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{HealthResponse, HealthStatus};
use crate::state::AppState;

pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(health_check))
}

/// Liveness and version
///
/// With the postgres backend a `SELECT 1` is run through the pool.
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let status = if check_database(&state).await {
        HealthStatus::Healthy
    } else {
        HealthStatus::Unhealthy
    };

    let code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    let response = HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        backend: state.backend.to_string(),
        timestamp: jiff::Timestamp::now().to_string(),
    };
    (code, Json(response))
}

async fn check_database(state: &AppState) -> bool {
    use diesel_async::RunQueryDsl;

    let Some(pool) = state.db_pool.as_ref() else {
        return true;
    };

    match pool.get().await {
        Ok(mut conn) => match diesel::sql_query("SELECT 1").execute(&mut conn).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Health check query failed");
                false
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not get a connection");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;

    #[tokio::test]
    async fn test_memory_backend_is_healthy() {
        let state = AppState::in_memory(JwtConfig::default());
        let (code, Json(body)) = health_check(State(state)).await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(body.status, HealthStatus::Healthy);
        assert_eq!(body.backend, "memory");
        assert!(!body.version.is_empty());
    }
}
