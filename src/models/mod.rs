mod book;
pub mod filter;
mod order;
mod user;

pub use book::{Book, NewBook, UpdateBook};
pub use filter::{BookFilter, OrderFilter, QueryFilter, UserFilter};
pub use order::{NewOrder, Order, OrderStatus, UpdateOrder};
pub use user::{NewUser, UpdateUser, User};

use jiff_diesel::ToDiesel;

/// Current UTC wall-clock time in the representation stored by the tables
pub fn now() -> jiff_diesel::DateTime {
    jiff::Timestamp::now()
        .to_zoned(jiff::tz::TimeZone::UTC)
        .datetime()
        .to_diesel()
}
