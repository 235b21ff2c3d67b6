//! Converts `AppError` into the JSON error envelope.

use axum::{
    Json,
    http::Uri,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::{AppError, ErrorKind};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();

        let message = match kind {
            ErrorKind::ServerError => {
                tracing::error!(error = ?self, "Request failed with server error");
                "An internal error occurred".to_string()
            }
            ErrorKind::ServiceUnavailable => {
                tracing::error!(error = ?self, "Storage unavailable");
                "Service temporarily unavailable".to_string()
            }
            _ => self.to_string(),
        };

        (kind.status_code(), Json(ErrorResponse::new(kind.code(), message))).into_response()
    }
}

/// Fallback for unknown routes.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::NotFound {
        entity: "route".to_string(),
        field: "path".to_string(),
        value: uri.path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    async fn envelope(error: AppError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_forbidden_envelope() {
        let (status, body) = envelope(AppError::forbidden("books from different sellers")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.error, "books from different sellers");
        assert_eq!(body.code, "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_internal_message_not_leaked() {
        let (status, body) = envelope(AppError::internal("password column missing")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.error.contains("password"));
        assert_eq!(body.code, "SERVER_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let uri: Uri = "/api/nothing".parse().unwrap();
        let (status, body) = envelope(not_found_handler(uri).await).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "route not found: path=/api/nothing");
    }
}
