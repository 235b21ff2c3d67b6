//! Service layer for business logic operations.
//!
//! Services own the authorization and state rules and coordinate the stores.
//! Handlers only translate between HTTP and these calls.

mod auth_service;
mod book_service;
pub mod guard;
mod order_service;
mod user_service;

pub use auth_service::AuthService;
pub use book_service::{BookDraft, BookService};
pub use order_service::{OrderDraft, OrderService};
pub use user_service::{UserDraft, UserService};

use crate::config::JwtConfig;
use crate::repositories::Repositories;

/// Aggregates all services for use as Axum application state.
///
/// Cloning only clones the store `Arc`s.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub books: BookService,
    pub orders: OrderService,
    pub users: UserService,
}

impl Services {
    pub fn new(repos: Repositories, jwt_config: JwtConfig) -> Self {
        let users = UserService::new(repos.users);
        Self {
            auth: AuthService::new(users.clone(), jwt_config),
            books: BookService::new(repos.books.clone()),
            orders: OrderService::new(repos.orders, repos.books),
            users,
        }
    }
}
