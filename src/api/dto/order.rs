//! Order DTOs.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::format_timestamp;
use crate::models::{Order, OrderStatus, UpdateOrder};
use crate::services::OrderDraft;

/// New order. The buyer is taken from the bearer token.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateOrderRequest {
    /// Books to buy, all from the same seller
    #[serde(default)]
    pub books: Vec<Uuid>,
    #[validate(length(max = 500, message = "address must be at most 500 characters"))]
    #[schema(example = "221B Baker Street, London")]
    pub address: Option<String>,
}

impl From<CreateOrderRequest> for OrderDraft {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            book_ids: req.books,
            address: req.address,
        }
    }
}

/// Status transition and/or address change of the order identified by `id`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateOrderRequest {
    pub id: Uuid,
    pub status: Option<OrderStatus>,
    #[validate(length(max = 500, message = "address must be at most 500 characters"))]
    pub address: Option<String>,
}

impl UpdateOrderRequest {
    pub fn into_parts(self) -> (Uuid, UpdateOrder) {
        (
            self.id,
            UpdateOrder {
                status: self.status,
                address: self.address,
            },
        )
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub books: Vec<Uuid>,
    #[schema(value_type = String, example = "25.00")]
    pub total: BigDecimal,
    pub address: String,
    pub status: OrderStatus,
    pub is_deleted: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            created_at: format_timestamp(&order.created_at),
            updated_at: format_timestamp(&order.updated_at),
            id: order.id,
            buyer_id: order.buyer_id,
            seller_id: order.seller_id,
            books: order.book_ids,
            total: order.total,
            address: order.address,
            status: order.status,
            is_deleted: order.is_deleted,
        }
    }
}

/// Mutation response: `{ "message", "order" }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderMessage {
    #[schema(example = "order created")]
    pub message: String,
    pub order: OrderResponse,
}

impl OrderMessage {
    pub fn new(message: &str, order: Order) -> Self {
        Self {
            message: message.to_string(),
            order: order.into(),
        }
    }
}
