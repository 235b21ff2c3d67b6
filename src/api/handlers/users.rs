//! User account handlers.
//!
//! Registration is public. Everything else works on the caller's own account,
//! except listing.

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::{
    CreateUserRequest, ErrorResponse, ResultResponse, ResultsResponse, UpdateUserRequest,
    UserMessage, UserResponse,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::{QueryFilter, UserFilter};
use crate::state::AppState;
use crate::utils::validate::{IdPath, ValidatedJson};

pub fn public_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(create_user))
}

pub fn protected_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_users, update_user))
        .routes(routes!(get_user, delete_user))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/users",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 200, body = UserMessage),
        (status = 400, description = "Invalid email or short password", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Json<UserMessage>> {
    let user = state.services.users.create(payload.into()).await?;
    Ok(Json(UserMessage::new("user created", user)))
}

/// List active users
#[utoipa::path(
    get,
    path = "/users",
    tag = USER_TAG,
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive substring"),
        ("email" = Option<String>, Query, description = "Exact address"),
    ),
    responses(
        (status = 200, body = ResultsResponse<UserResponse>),
        (status = 400, description = "Unknown filter key", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<ResultsResponse<UserResponse>>> {
    let filter = UserFilter::from_query(&params)?;
    let users = state.services.users.list(&filter).await?;
    Ok(Json(ResultsResponse::new(users)))
}

/// Get the caller's own account
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = USER_TAG,
    params(("id" = uuid::Uuid, Path)),
    responses(
        (status = 200, body = ResultResponse<UserResponse>),
        (status = 403, body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    IdPath(id): IdPath,
) -> AppResult<Json<ResultResponse<UserResponse>>> {
    let user = state.services.users.get(auth_user.user_id, id).await?;
    Ok(Json(ResultResponse::new(user)))
}

/// Update the caller's own account
#[utoipa::path(
    patch,
    path = "/users",
    tag = USER_TAG,
    request_body = UpdateUserRequest,
    responses(
        (status = 200, body = UserMessage),
        (status = 403, body = ErrorResponse),
        (status = 404, body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserMessage>> {
    let (id, changes) = payload.into_parts();
    let user = state
        .services
        .users
        .update(auth_user.user_id, id, changes)
        .await?;
    Ok(Json(UserMessage::new("user updated", user)))
}

/// Delete the caller's own account
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = USER_TAG,
    params(("id" = uuid::Uuid, Path)),
    responses(
        (status = 200, body = UserMessage),
        (status = 403, body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    IdPath(id): IdPath,
) -> AppResult<Json<UserMessage>> {
    let user = state.services.users.delete(auth_user.user_id, id).await?;
    Ok(Json(UserMessage::new("user deleted", user)))
}
