//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `book`, `order`, `user` - entity request/response DTOs
//! - `auth` - login and token refresh
//! - `envelope` - `{results}` and `{result}` wrappers
//! - `error` - error envelope
//! - `health` - liveness report

mod auth;
mod book;
mod envelope;
mod error;
mod health;
mod order;
mod user;

pub use auth::{LoginRequest, RefreshTokenRequest, TokenResponse};
pub use book::{BookMessage, BookResponse, CreateBookRequest, UpdateBookRequest};
pub use envelope::{ResultResponse, ResultsResponse};
pub use error::ErrorResponse;
pub use health::{HealthResponse, HealthStatus};
pub use order::{CreateOrderRequest, OrderMessage, OrderResponse, UpdateOrderRequest};
pub use user::{CreateUserRequest, UpdateUserRequest, UserMessage, UserResponse};

/// Render a stored UTC timestamp as RFC 3339 with millisecond precision.
pub(crate) fn format_timestamp(value: &jiff_diesel::DateTime) -> String {
    value.to_jiff().strftime("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
