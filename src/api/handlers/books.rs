//! Book listing handlers.

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::BOOK_TAG;
use crate::api::dto::{
    BookMessage, BookResponse, CreateBookRequest, ErrorResponse, ResultResponse, ResultsResponse,
    UpdateBookRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::{BookFilter, QueryFilter};
use crate::state::AppState;
use crate::utils::validate::{IdPath, ValidatedJson};

/// Routes readable without a token.
pub fn public_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_books))
        .routes(routes!(get_book))
}

/// Routes that need a bearer token.
pub fn protected_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_book))
        .routes(routes!(update_book))
        .routes(routes!(delete_book))
}

/// List books
///
/// Deleted books are hidden unless `all=true`. Any other query key fails the
/// request.
#[utoipa::path(
    get,
    path = "/books",
    tag = BOOK_TAG,
    params(
        ("title" = Option<String>, Query, description = "Case-insensitive substring"),
        ("author" = Option<String>, Query, description = "Case-insensitive substring"),
        ("genre" = Option<String>, Query),
        ("publisher" = Option<String>, Query),
        ("published_year" = Option<i32>, Query),
        ("all" = Option<bool>, Query, description = "Include deleted books"),
    ),
    responses(
        (status = 200, body = ResultsResponse<BookResponse>),
        (status = 400, description = "Unknown filter key or bad value", body = ErrorResponse)
    )
)]
async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<ResultsResponse<BookResponse>>> {
    let filter = BookFilter::from_query(&params)?;
    let books = state.services.books.list(&filter).await?;
    Ok(Json(ResultsResponse::new(books)))
}

/// Get an active book
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = BOOK_TAG,
    params(("id" = uuid::Uuid, Path)),
    responses(
        (status = 200, body = ResultResponse<BookResponse>),
        (status = 404, body = ErrorResponse)
    )
)]
async fn get_book(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ResultResponse<BookResponse>>> {
    let book = state.services.books.get(id).await?;
    Ok(Json(ResultResponse::new(book)))
}

/// List a book for sale
///
/// The caller becomes the seller.
#[utoipa::path(
    post,
    path = "/books",
    tag = BOOK_TAG,
    request_body = CreateBookRequest,
    responses(
        (status = 200, body = BookMessage),
        (status = 400, description = "Missing title or invalid field", body = ErrorResponse),
        (status = 401, body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_book(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateBookRequest>,
) -> AppResult<Json<BookMessage>> {
    let book = state
        .services
        .books
        .create(auth_user.user_id, payload.into())
        .await?;
    Ok(Json(BookMessage::new("book created", book)))
}

/// Update one of the caller's books
#[utoipa::path(
    patch,
    path = "/books",
    tag = BOOK_TAG,
    request_body = UpdateBookRequest,
    responses(
        (status = 200, body = BookMessage),
        (status = 403, description = "Caller is not the seller", body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_book(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<UpdateBookRequest>,
) -> AppResult<Json<BookMessage>> {
    let (id, changes) = payload.into_parts();
    let book = state
        .services
        .books
        .update(auth_user.user_id, id, changes)
        .await?;
    Ok(Json(BookMessage::new("book updated", book)))
}

/// Withdraw one of the caller's books
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = BOOK_TAG,
    params(("id" = uuid::Uuid, Path)),
    responses(
        (status = 200, body = BookMessage),
        (status = 403, description = "Caller is not the seller", body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_book(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    IdPath(id): IdPath,
) -> AppResult<Json<BookMessage>> {
    let book = state.services.books.delete(auth_user.user_id, id).await?;
    Ok(Json(BookMessage::new("book deleted", book)))
}
