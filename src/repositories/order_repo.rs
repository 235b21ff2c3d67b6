//! PostgreSQL order repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{self, NewOrder, Order, OrderFilter, UpdateOrder};
use crate::repositories::OrderStore;
use crate::schema::orders;

#[derive(Clone)]
pub struct OrderRepository {
    pool: AsyncDbPool,
}

impl OrderRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn create(&self, new_order: NewOrder) -> AppResult<Order> {
        let mut conn = self.pool.get().await?;

        let order = diesel::insert_into(orders::table)
            .values(&new_order)
            .returning(Order::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(order)
    }

    async fn find_by_id(&self, order_id: Uuid) -> AppResult<Option<Order>> {
        let mut conn = self.pool.get().await?;

        let order = orders::table
            .find(order_id)
            .select(Order::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(order)
    }

    async fn list(&self, participant: Uuid, filter: &OrderFilter) -> AppResult<Vec<Order>> {
        let upper_bound = filter.upper_bound()?;
        let mut conn = self.pool.get().await?;

        let mut query = orders::table
            .select(Order::as_select())
            .filter(orders::is_deleted.eq(false))
            .filter(
                orders::buyer_id
                    .eq(participant)
                    .or(orders::seller_id.eq(participant)),
            )
            .into_boxed();
        if let Some(status) = filter.status {
            query = query.filter(orders::status.eq(status));
        }
        if let Some(lower) = filter.lower_bound() {
            query = query.filter(orders::created_at.ge(lower));
        }
        if let Some(upper) = upper_bound {
            query = query.filter(orders::created_at.lt(upper));
        }

        let found = query
            .order(orders::created_at.desc())
            .load(&mut conn)
            .await?;
        Ok(found)
    }

    async fn update(&self, order_id: Uuid, changes: UpdateOrder) -> AppResult<Order> {
        let mut conn = self.pool.get().await?;

        let order = diesel::update(orders::table.find(order_id))
            .set((&changes, orders::updated_at.eq(models::now())))
            .returning(Order::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(order)
    }

    async fn soft_delete(&self, order_id: Uuid) -> AppResult<Order> {
        let mut conn = self.pool.get().await?;

        let order = diesel::update(orders::table.find(order_id))
            .set((
                orders::is_deleted.eq(true),
                orders::updated_at.eq(models::now()),
            ))
            .returning(Order::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(order)
    }
}
