//! Query-string filters for list endpoints.
//!
//! Each filter declares the keys it accepts. A request carrying any other key
//! is rejected as a whole instead of having the key silently ignored.

use std::collections::HashMap;

use jiff::civil::Date;
use jiff_diesel::ToDiesel;

use crate::error::{AppError, AppResult};
use crate::models::{Book, Order, OrderStatus, User};

pub const UNKNOWN_FILTER: &str = "cannot filter by that";

pub trait QueryFilter: Default {
    const ALLOWED_KEYS: &'static [&'static str];

    /// Store one already allow-listed key.
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;

    fn from_query(params: &HashMap<String, String>) -> AppResult<Self> {
        if params
            .keys()
            .any(|key| !Self::ALLOWED_KEYS.contains(&key.as_str()))
        {
            return Err(AppError::bad_request(UNKNOWN_FILTER));
        }

        let mut filter = Self::default();
        for (key, value) in params {
            filter.set(key, value)?;
        }
        Ok(filter)
    }
}

fn invalid_value(key: &str, value: &str) -> AppError {
    AppError::bad_request(format!("invalid value '{value}' for filter '{key}'"))
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

fn parse_date(key: &str, value: &str) -> AppResult<Date> {
    value.parse::<Date>().map_err(|_| invalid_value(key, value))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub published_year: Option<i32>,
    /// Include soft-deleted books
    pub all: bool,
}

impl QueryFilter for BookFilter {
    const ALLOWED_KEYS: &'static [&'static str] = &[
        "title",
        "author",
        "genre",
        "publisher",
        "published_year",
        "all",
    ];

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        match key {
            "title" => self.title = Some(value.to_string()),
            "author" => self.author = Some(value.to_string()),
            "genre" => self.genre = Some(value.to_string()),
            "publisher" => self.publisher = Some(value.to_string()),
            "published_year" => {
                self.published_year = Some(value.parse().map_err(|_| invalid_value(key, value))?)
            }
            "all" => self.all = value.parse().map_err(|_| invalid_value(key, value))?,
            _ => return Err(AppError::bad_request(UNKNOWN_FILTER)),
        }
        Ok(())
    }
}

impl BookFilter {
    /// `title` and `author` match case-insensitive substrings, the rest exactly.
    pub fn matches(&self, book: &Book) -> bool {
        (self.all || !book.is_deleted)
            && self
                .title
                .as_deref()
                .is_none_or(|t| contains_ignore_case(Some(&book.title), t))
            && self
                .author
                .as_deref()
                .is_none_or(|a| contains_ignore_case(book.author.as_deref(), a))
            && self
                .genre
                .as_deref()
                .is_none_or(|g| book.genre.as_deref() == Some(g))
            && self
                .publisher
                .as_deref()
                .is_none_or(|p| book.publisher.as_deref() == Some(p))
            && self
                .published_year
                .is_none_or(|y| book.published_year == Some(y))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// Inclusive lower bound on the creation date
    pub from: Option<Date>,
    /// Inclusive upper bound on the creation date
    pub to: Option<Date>,
}

impl QueryFilter for OrderFilter {
    const ALLOWED_KEYS: &'static [&'static str] = &["status", "from", "to"];

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        match key {
            "status" => {
                self.status = Some(value.parse().map_err(|_| invalid_value(key, value))?)
            }
            "from" => self.from = Some(parse_date(key, value)?),
            "to" => {
                let to = parse_date(key, value)?;
                // The exclusive SQL bound is the next day, which must exist.
                to.tomorrow().map_err(|_| invalid_value(key, value))?;
                self.to = Some(to);
            }
            _ => return Err(AppError::bad_request(UNKNOWN_FILTER)),
        }
        Ok(())
    }
}

impl OrderFilter {
    /// Start of `from` as a stored timestamp.
    pub fn lower_bound(&self) -> Option<jiff_diesel::DateTime> {
        self.from.map(|d| d.to_datetime(jiff::civil::Time::midnight()).to_diesel())
    }

    /// Start of the day after `to`, as an exclusive stored timestamp.
    pub fn upper_bound(&self) -> AppResult<Option<jiff_diesel::DateTime>> {
        self.to
            .map(|d| {
                d.tomorrow()
                    .map(|next| next.to_datetime(jiff::civil::Time::midnight()).to_diesel())
                    .map_err(|_| invalid_value("to", &d.to_string()))
            })
            .transpose()
    }

    /// Deleted orders never match; participation is checked by the caller.
    pub fn matches(&self, order: &Order) -> bool {
        let created = order.created_at.to_jiff().date();

        !order.is_deleted
            && self.status.is_none_or(|s| order.status == s)
            && self.from.is_none_or(|from| created >= from)
            && self.to.is_none_or(|to| created <= to)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl QueryFilter for UserFilter {
    const ALLOWED_KEYS: &'static [&'static str] = &["name", "email"];

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        match key {
            "name" => self.name = Some(value.to_string()),
            "email" => self.email = Some(value.to_string()),
            _ => return Err(AppError::bad_request(UNKNOWN_FILTER)),
        }
        Ok(())
    }
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        !user.is_deleted
            && self
                .name
                .as_deref()
                .is_none_or(|n| contains_ignore_case(user.name.as_deref(), n))
            && self.email.as_deref().is_none_or(|e| user.email == e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_query_is_default_filter() {
        assert_eq!(
            BookFilter::from_query(&HashMap::new()).unwrap(),
            BookFilter::default()
        );
    }

    #[test]
    fn test_book_filter_parses_known_keys() {
        let filter = BookFilter::from_query(&params(&[
            ("title", "Dune"),
            ("published_year", "1965"),
            ("all", "true"),
        ]))
        .unwrap();

        assert_eq!(filter.title.as_deref(), Some("Dune"));
        assert_eq!(filter.published_year, Some(1965));
        assert!(filter.all);
    }

    #[test]
    fn test_unknown_key_rejected_even_with_valid_keys() {
        let err = BookFilter::from_query(&params(&[("title", "Dune"), ("price", "10")]))
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { ref message } if message == UNKNOWN_FILTER));
    }

    #[test]
    fn test_bad_value_rejected() {
        assert!(BookFilter::from_query(&params(&[("published_year", "soon")])).is_err());
        assert!(BookFilter::from_query(&params(&[("all", "yes")])).is_err());
        assert!(OrderFilter::from_query(&params(&[("from", "01/02/2024")])).is_err());
        assert!(OrderFilter::from_query(&params(&[("status", "shipped")])).is_err());
    }

    #[test]
    fn test_order_filter_parses_dates_and_status() {
        let filter = OrderFilter::from_query(&params(&[
            ("status", "completed"),
            ("from", "2024-01-01"),
            ("to", "2024-01-31"),
        ]))
        .unwrap();

        assert_eq!(filter.status, Some(OrderStatus::Completed));
        assert_eq!(filter.from, Some(jiff::civil::date(2024, 1, 1)));
        assert_eq!(
            filter.upper_bound().unwrap().map(|b| b.to_jiff()),
            Some(jiff::civil::date(2024, 2, 1).at(0, 0, 0, 0))
        );
    }

    #[test]
    fn test_last_representable_day_rejected_as_upper_bound() {
        assert!(OrderFilter::from_query(&params(&[("to", "9999-12-31")])).is_err());
        assert!(OrderFilter::from_query(&params(&[("from", "9999-12-31")])).is_ok());

        let filter = OrderFilter::from_query(&params(&[("to", "9999-12-30")])).unwrap();
        assert!(filter.upper_bound().is_ok());
    }

    #[test]
    fn test_user_filter_rejects_password_key() {
        assert!(UserFilter::from_query(&params(&[("password", "x")])).is_err());
    }

    proptest! {
        #[test]
        fn prop_keys_outside_allow_list_always_rejected(
            key in "[a-z_]{1,16}",
            value in "[a-zA-Z0-9 ]{0,12}",
        ) {
            prop_assume!(!BookFilter::ALLOWED_KEYS.contains(&key.as_str()));
            let query = params(&[("title", "x"), (key.as_str(), value.as_str())]);
            prop_assert!(BookFilter::from_query(&query).is_err());
        }
    }
}
