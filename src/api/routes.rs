//! Router configuration for the API.

use std::time::Duration;

use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    auth_middleware, logging_middleware, not_found_handler, request_id_middleware,
};
use crate::config::ServerConfig;
use crate::state::AppState;

/// Router options that depend on configuration.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    pub swagger_ui: bool,
    /// Empty means any origin
    pub cors_origins: Vec<String>,
    pub request_timeout: Option<Duration>,
}

impl RouterOptions {
    pub fn from_server_config(server: &ServerConfig, swagger_ui: bool) -> Self {
        Self {
            swagger_ui,
            cors_origins: server.cors_origins.clone(),
            request_timeout: Some(Duration::from_secs(server.request_timeout)),
        }
    }
}

/// Build the `/api` routes together with their OpenAPI document.
pub fn api_router(state: &AppState) -> OpenApiRouter<AppState> {
    let public = OpenApiRouter::new()
        .merge(handlers::health::health_routes())
        .merge(handlers::auth::auth_routes())
        .merge(handlers::books::public_routes())
        .merge(handlers::users::public_routes());

    let protected = OpenApiRouter::new()
        .merge(handlers::books::protected_routes())
        .merge(handlers::orders::protected_routes())
        .merge(handlers::users::protected_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    OpenApiRouter::with_openapi(ApiDoc::openapi()).nest("/api", public.merge(protected))
}

/// Creates the main application router with all routes and middleware.
///
/// Middleware runs outermost first: request id, logging, CORS, compression,
/// timeout.
pub fn create_router(state: AppState, options: RouterOptions) -> Router {
    let (router, openapi) = api_router(&state).split_for_parts();

    let mut router = router.fallback(not_found_handler);
    if options.swagger_ui {
        router = router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));
    }

    let mut router = router.with_state(state);
    if let Some(timeout) = options.request_timeout {
        router = router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ));
    }

    router
        .layer(CompressionLayer::new())
        .layer(cors_layer(&options.cors_origins))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
