//! Repository layer for data access.
//!
//! Each entity is reached through a store trait so services can run against
//! PostgreSQL or the in-memory backend interchangeably. Stores return records
//! as persisted, soft-deleted ones included; hiding them is the caller's call.

mod book_repo;
mod memory;
mod order_repo;
mod user_repo;

pub use book_repo::BookRepository;
pub use memory::{MemoryBookStore, MemoryOrderStore, MemoryUserStore};
pub use order_repo::OrderRepository;
pub use user_repo::UserRepository;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{
    Book, BookFilter, NewBook, NewOrder, NewUser, Order, OrderFilter, UpdateBook, UpdateOrder,
    UpdateUser, User, UserFilter,
};

#[async_trait]
pub trait BookStore: Send + Sync {
    async fn create(&self, book: NewBook) -> AppResult<Book>;

    async fn find_by_id(&self, book_id: Uuid) -> AppResult<Option<Book>>;

    async fn list(&self, filter: &BookFilter) -> AppResult<Vec<Book>>;

    async fn update(&self, book_id: Uuid, changes: UpdateBook) -> AppResult<Book>;

    async fn soft_delete(&self, book_id: Uuid) -> AppResult<Book>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create(&self, order: NewOrder) -> AppResult<Order>;

    async fn find_by_id(&self, order_id: Uuid) -> AppResult<Option<Order>>;

    /// Active orders where `participant` is the buyer or the seller.
    async fn list(&self, participant: Uuid, filter: &OrderFilter) -> AppResult<Vec<Order>>;

    async fn update(&self, order_id: Uuid, changes: UpdateOrder) -> AppResult<Order>;

    async fn soft_delete(&self, order_id: Uuid) -> AppResult<Order>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> AppResult<User>;

    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>>;

    async fn update(&self, user_id: Uuid, changes: UpdateUser) -> AppResult<User>;

    async fn soft_delete(&self, user_id: Uuid) -> AppResult<User>;
}

/// Aggregates all stores. Cloning only clones the `Arc`s.
#[derive(Clone)]
pub struct Repositories {
    pub books: Arc<dyn BookStore>,
    pub orders: Arc<dyn OrderStore>,
    pub users: Arc<dyn UserStore>,
}

impl Repositories {
    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            books: Arc::new(BookRepository::new(pool.clone())),
            orders: Arc::new(OrderRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool)),
        }
    }

    /// Empty process-local stores.
    pub fn in_memory() -> Self {
        Self {
            books: Arc::new(MemoryBookStore::default()),
            orders: Arc::new(MemoryOrderStore::default()),
            users: Arc::new(MemoryUserStore::default()),
        }
    }
}

/// Escape `%`, `_` and `\` so user input is matched literally by ILIKE.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
