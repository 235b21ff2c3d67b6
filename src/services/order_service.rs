//! Order placement and lifecycle.
//!
//! An order bundles books from exactly one seller. While it is in progress the
//! buyer and the seller may amend it; only the seller may complete it. Once
//! completed or cancelled it is frozen.

use std::collections::HashSet;
use std::sync::Arc;

use bigdecimal::{BigDecimal, Zero};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{self, NewOrder, Order, OrderFilter, OrderStatus, UpdateOrder};
use crate::repositories::{BookStore, OrderStore};
use crate::services::guard::{ensure_owner, require_active};

pub const EMPTY_ORDER: &str = "must provide at least one book for the order";
pub const MISSING_ADDRESS: &str = "must provide an address for the order";
pub const MIXED_SELLERS: &str = "books from different sellers";
pub const ORDER_FROZEN: &str = "cannot modify an order that is not in progress";
pub const NOT_ORDER_SELLER: &str = "only the seller can complete this order";
pub const NOT_ORDER_PARTICIPANT: &str = "you are not involved in this order, you cannot modify it";
pub const NOT_ORDER_OWNER_DELETE: &str = "you are not the seller of this order, you cannot delete it";

/// Order as submitted by a buyer
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    pub book_ids: Vec<Uuid>,
    pub address: Option<String>,
}

#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderStore>,
    books: Arc<dyn BookStore>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderStore>, books: Arc<dyn BookStore>) -> Self {
        Self { orders, books }
    }

    /// Place an order for `buyer_id`.
    ///
    /// Every referenced book must be active and all of them must share one
    /// seller, who is recorded on the order. The total is the sum of the
    /// current book prices.
    pub async fn create(&self, buyer_id: Uuid, draft: OrderDraft) -> AppResult<Order> {
        if draft.book_ids.is_empty() {
            return Err(AppError::bad_request(EMPTY_ORDER));
        }
        let address = draft
            .address
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| AppError::bad_request(MISSING_ADDRESS))?;

        let mut sellers = HashSet::new();
        let mut total = BigDecimal::zero();
        for book_id in &draft.book_ids {
            let book = require_active(self.books.find_by_id(*book_id).await?, *book_id)?;
            sellers.insert(book.seller_id);
            total += book.price;
        }

        let mut sellers = sellers.into_iter();
        let seller_id = match (sellers.next(), sellers.next()) {
            (Some(seller_id), None) => seller_id,
            (Some(_), Some(_)) => return Err(AppError::forbidden(MIXED_SELLERS)),
            // Only reachable with no books, which was rejected above.
            (None, _) => return Err(AppError::bad_request(EMPTY_ORDER)),
        };

        let now = models::now();
        let order = self
            .orders
            .create(NewOrder {
                id: Uuid::new_v4(),
                buyer_id,
                seller_id,
                book_ids: draft.book_ids,
                total,
                address,
                status: OrderStatus::InProgress,
                is_deleted: false,
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!(
            order_id = %order.id,
            buyer_id = %buyer_id,
            seller_id = %seller_id,
            books = order.book_ids.len(),
            "Order placed"
        );
        Ok(order)
    }

    pub async fn get(&self, order_id: Uuid) -> AppResult<Order> {
        require_active(self.orders.find_by_id(order_id).await?, order_id)
    }

    /// Orders where `requester` is the buyer or the seller.
    pub async fn list(&self, requester: Uuid, filter: &OrderFilter) -> AppResult<Vec<Order>> {
        self.orders.list(requester, filter).await
    }

    /// Amend an in-progress order.
    ///
    /// Completing needs the seller. Cancelling, changing the address or
    /// restating `in progress` needs the buyer or the seller.
    pub async fn update(
        &self,
        requester: Uuid,
        order_id: Uuid,
        changes: UpdateOrder,
    ) -> AppResult<Order> {
        let order = self.get(order_id).await?;

        if order.status != OrderStatus::InProgress {
            return Err(AppError::forbidden(ORDER_FROZEN));
        }

        match changes.status {
            Some(OrderStatus::Completed) => ensure_owner(&order, requester, NOT_ORDER_SELLER)?,
            _ if !order.involves(requester) => {
                return Err(AppError::forbidden(NOT_ORDER_PARTICIPANT));
            }
            _ => {}
        }

        if let Some(next) = changes.status
            && !order.status.can_transition_to(next)
        {
            return Err(AppError::forbidden(ORDER_FROZEN));
        }

        if changes.address.as_deref().is_some_and(|a| a.trim().is_empty()) {
            return Err(AppError::bad_request(MISSING_ADDRESS));
        }

        let updated = self.orders.update(order_id, changes).await?;
        if updated.status != order.status {
            tracing::info!(
                order_id = %order_id,
                from = %order.status,
                to = %updated.status,
                "Order status changed"
            );
        }
        Ok(updated)
    }

    pub async fn delete(&self, requester: Uuid, order_id: Uuid) -> AppResult<Order> {
        let order = self.get(order_id).await?;
        ensure_owner(&order, requester, NOT_ORDER_OWNER_DELETE)?;
        self.orders.soft_delete(order_id).await
    }
}
