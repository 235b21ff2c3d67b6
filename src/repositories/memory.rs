//! In-memory stores backed by `DashMap`.
//!
//! They mirror the SQL repositories, filter semantics included, and are used
//! for the `memory` database backend and throughout the tests.

use std::cmp::Reverse;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    self, Book, BookFilter, NewBook, NewOrder, NewUser, Order, OrderFilter, UpdateBook,
    UpdateOrder, UpdateUser, User, UserFilter,
};
use crate::repositories::{BookStore, OrderStore, UserStore};

fn missing(entity: &str, id: Uuid) -> AppError {
    AppError::not_found(entity, id)
}

#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: DashMap<Uuid, Book>,
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn create(&self, new_book: NewBook) -> AppResult<Book> {
        let book = Book::from(new_book);
        self.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn find_by_id(&self, book_id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.books.get(&book_id).map(|b| b.clone()))
    }

    async fn list(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let mut found: Vec<Book> = self
            .books
            .iter()
            .filter(|b| filter.matches(b.value()))
            .map(|b| b.value().clone())
            .collect();
        found.sort_by_key(|b| Reverse(b.created_at.to_jiff()));
        Ok(found)
    }

    async fn update(&self, book_id: Uuid, changes: UpdateBook) -> AppResult<Book> {
        let mut book = self
            .books
            .get_mut(&book_id)
            .ok_or_else(|| missing("book", book_id))?;
        book.apply(changes);
        book.updated_at = models::now();
        Ok(book.clone())
    }

    async fn soft_delete(&self, book_id: Uuid) -> AppResult<Book> {
        let mut book = self
            .books
            .get_mut(&book_id)
            .ok_or_else(|| missing("book", book_id))?;
        book.is_deleted = true;
        book.updated_at = models::now();
        Ok(book.clone())
    }
}

#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: DashMap<Uuid, Order>,
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create(&self, new_order: NewOrder) -> AppResult<Order> {
        let order = Order::from(new_order);
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, order_id: Uuid) -> AppResult<Option<Order>> {
        Ok(self.orders.get(&order_id).map(|o| o.clone()))
    }

    async fn list(&self, participant: Uuid, filter: &OrderFilter) -> AppResult<Vec<Order>> {
        let mut found: Vec<Order> = self
            .orders
            .iter()
            .filter(|o| o.involves(participant) && filter.matches(o.value()))
            .map(|o| o.value().clone())
            .collect();
        found.sort_by_key(|o| Reverse(o.created_at.to_jiff()));
        Ok(found)
    }

    async fn update(&self, order_id: Uuid, changes: UpdateOrder) -> AppResult<Order> {
        let mut order = self
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| missing("order", order_id))?;
        order.apply(changes);
        order.updated_at = models::now();
        Ok(order.clone())
    }

    async fn soft_delete(&self, order_id: Uuid) -> AppResult<Order> {
        let mut order = self
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| missing("order", order_id))?;
        order.is_deleted = true;
        order.updated_at = models::now();
        Ok(order.clone())
    }
}

/// Users plus an email index enforcing the same uniqueness as `users_email_key`.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: DashMap<Uuid, User>,
    emails: DashMap<String, Uuid>,
}

impl MemoryUserStore {
    fn claim_email(&self, email: &str, owner: Uuid) -> AppResult<()> {
        match self.emails.entry(email.to_string()) {
            Entry::Occupied(entry) if *entry.get() != owner => Err(AppError::Duplicate {
                entity: "user".to_string(),
                field: "email".to_string(),
                value: email.to_string(),
            }),
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(entry) => {
                entry.insert(owner);
                Ok(())
            }
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        self.claim_email(&new_user.email, new_user.id)?;
        let user = User::from(new_user);
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&user_id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(user_id) = self.emails.get(email).map(|id| *id) else {
            return Ok(None);
        };
        self.find_by_id(user_id).await
    }

    async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        let mut found: Vec<User> = self
            .users
            .iter()
            .filter(|u| filter.matches(u.value()))
            .map(|u| u.value().clone())
            .collect();
        found.sort_by_key(|u| Reverse(u.created_at.to_jiff()));
        Ok(found)
    }

    async fn update(&self, user_id: Uuid, changes: UpdateUser) -> AppResult<User> {
        let previous_email = self
            .users
            .get(&user_id)
            .map(|u| u.email.clone())
            .ok_or_else(|| missing("user", user_id))?;

        if let Some(ref email) = changes.email
            && *email != previous_email
        {
            self.claim_email(email, user_id)?;
            self.emails.remove(&previous_email);
        }

        let mut user = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| missing("user", user_id))?;
        user.apply(changes);
        user.updated_at = models::now();
        Ok(user.clone())
    }

    async fn soft_delete(&self, user_id: Uuid) -> AppResult<User> {
        let mut user = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| missing("user", user_id))?;
        user.is_deleted = true;
        user.updated_at = models::now();
        Ok(user.clone())
    }
}
