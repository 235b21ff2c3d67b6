//! Order handlers. Every route needs a bearer token.

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::ORDER_TAG;
use crate::api::dto::{
    CreateOrderRequest, ErrorResponse, OrderMessage, OrderResponse, ResultResponse,
    ResultsResponse, UpdateOrderRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::{OrderFilter, QueryFilter};
use crate::state::AppState;
use crate::utils::validate::{IdPath, ValidatedJson};

pub fn protected_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_orders, create_order, update_order))
        .routes(routes!(get_order, delete_order))
}

/// List the caller's orders
///
/// Only orders where the caller is the buyer or the seller are returned.
#[utoipa::path(
    get,
    path = "/orders",
    tag = ORDER_TAG,
    params(
        ("status" = Option<String>, Query, description = "in progress, completed or cancelled"),
        ("from" = Option<String>, Query, description = "Created on or after, YYYY-MM-DD"),
        ("to" = Option<String>, Query, description = "Created on or before, YYYY-MM-DD"),
    ),
    responses(
        (status = 200, body = ResultsResponse<OrderResponse>),
        (status = 400, description = "Unknown filter key or bad value", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn list_orders(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<ResultsResponse<OrderResponse>>> {
    let filter = OrderFilter::from_query(&params)?;
    let orders = state
        .services
        .orders
        .list(auth_user.user_id, &filter)
        .await?;
    Ok(Json(ResultsResponse::new(orders)))
}

/// Get an active order
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = ORDER_TAG,
    params(("id" = uuid::Uuid, Path)),
    responses(
        (status = 200, body = ResultResponse<OrderResponse>),
        (status = 404, body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_order(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<ResultResponse<OrderResponse>>> {
    let order = state.services.orders.get(id).await?;
    Ok(Json(ResultResponse::new(order)))
}

/// Place an order
///
/// All books must belong to the same seller.
#[utoipa::path(
    post,
    path = "/orders",
    tag = ORDER_TAG,
    request_body = CreateOrderRequest,
    responses(
        (status = 200, body = OrderMessage),
        (status = 400, description = "No books or no address", body = ErrorResponse),
        (status = 403, description = "Books from different sellers", body = ErrorResponse),
        (status = 404, description = "A book does not exist", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_order(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> AppResult<Json<OrderMessage>> {
    let order = state
        .services
        .orders
        .create(auth_user.user_id, payload.into())
        .await?;
    Ok(Json(OrderMessage::new("order created", order)))
}

/// Change an order's status or address
///
/// Only in-progress orders can change. Completing needs the seller.
#[utoipa::path(
    patch,
    path = "/orders",
    tag = ORDER_TAG,
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, body = OrderMessage),
        (status = 403, description = "Not allowed for caller or order state", body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_order(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<UpdateOrderRequest>,
) -> AppResult<Json<OrderMessage>> {
    let (id, changes) = payload.into_parts();
    let order = state
        .services
        .orders
        .update(auth_user.user_id, id, changes)
        .await?;
    Ok(Json(OrderMessage::new("order updated", order)))
}

/// Delete an order as its seller
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = ORDER_TAG,
    params(("id" = uuid::Uuid, Path)),
    responses(
        (status = 200, body = OrderMessage),
        (status = 403, body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_order(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    IdPath(id): IdPath,
) -> AppResult<Json<OrderMessage>> {
    let order = state.services.orders.delete(auth_user.user_id, id).await?;
    Ok(Json(OrderMessage::new("order deleted", order)))
}
