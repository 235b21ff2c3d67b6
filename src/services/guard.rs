//! Ownership and existence checks shared by every service.
//!
//! Services always resolve the record first and check ownership second, so a
//! missing record reports 404 to owners and strangers alike.

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Book, Order, User};

/// A record with a single user allowed to change it.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

/// A record that is flagged instead of removed.
pub trait SoftDeletable {
    const ENTITY: &'static str;

    fn id(&self) -> Uuid;

    fn is_deleted(&self) -> bool;
}

impl Owned for Book {
    fn owner_id(&self) -> Uuid {
        self.seller_id
    }
}

impl Owned for Order {
    fn owner_id(&self) -> Uuid {
        self.seller_id
    }
}

impl Owned for User {
    fn owner_id(&self) -> Uuid {
        self.id
    }
}

impl SoftDeletable for Book {
    const ENTITY: &'static str = "book";

    fn id(&self) -> Uuid {
        self.id
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

impl SoftDeletable for Order {
    const ENTITY: &'static str = "order";

    fn id(&self) -> Uuid {
        self.id
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

impl SoftDeletable for User {
    const ENTITY: &'static str = "user";

    fn id(&self) -> Uuid {
        self.id
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

/// Fail with `Forbidden(reason)` unless `requester` owns `resource`.
pub fn ensure_owner<T: Owned>(resource: &T, requester: Uuid, reason: &str) -> AppResult<()> {
    if resource.owner_id() == requester {
        Ok(())
    } else {
        Err(AppError::forbidden(reason))
    }
}

/// Treat a missing or soft-deleted record as `NotFound`.
pub fn require_active<T: SoftDeletable>(record: Option<T>, id: Uuid) -> AppResult<T> {
    match record {
        Some(record) if !record.is_deleted() => Ok(record),
        _ => Err(AppError::not_found(T::ENTITY, id)),
    }
}
