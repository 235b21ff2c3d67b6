use std::fmt;
use std::io::Write;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use jiff_diesel::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of an order.
///
/// `InProgress` is the initial state and the only one from which an order may
/// change. `Completed` and `Cancelled` are terminal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum OrderStatus {
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    fn as_db_str(self) -> &'static str {
        match self {
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, OrderStatus::InProgress)
    }

    /// Whether the state machine permits moving from `self` to `next`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (InProgress, InProgress) | (InProgress, Completed) | (InProgress, Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderStatus::InProgress => "in progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        })
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    /// Accepts the JSON spelling and the stored spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in progress" | "in_progress" => Ok(OrderStatus::InProgress),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

impl ToSql<Text, Pg> for OrderStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_db_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for OrderStatus {
    fn from_sql(bytes: <Pg as diesel::backend::Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        s.parse().map_err(Into::into)
    }
}

/// Purchase of one or more books from a single seller
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub book_ids: Vec<Uuid>,
    pub total: BigDecimal,
    pub address: String,
    pub status: OrderStatus,
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub book_ids: Vec<Uuid>,
    pub total: BigDecimal,
    pub address: String,
    pub status: OrderStatus,
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::orders)]
pub struct UpdateOrder {
    pub status: Option<OrderStatus>,
    pub address: Option<String>,
}

impl From<NewOrder> for Order {
    fn from(new: NewOrder) -> Self {
        Self {
            id: new.id,
            buyer_id: new.buyer_id,
            seller_id: new.seller_id,
            book_ids: new.book_ids,
            total: new.total,
            address: new.address,
            status: new.status,
            is_deleted: new.is_deleted,
            created_at: new.created_at,
            updated_at: new.updated_at,
        }
    }
}

impl Order {
    pub fn apply(&mut self, changes: UpdateOrder) {
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(address) = changes.address {
            self.address = address;
        }
    }

    pub fn involves(&self, user_id: Uuid) -> bool {
        self.buyer_id == user_id || self.seller_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_in_progress_can_transition() {
        use OrderStatus::*;
        assert!(InProgress.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(InProgress));
        for terminal in [Completed, Cancelled] {
            assert!(terminal.is_terminal());
            for next in [InProgress, Completed, Cancelled] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_status_json_spelling() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProgress).unwrap(),
            "\"in progress\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, OrderStatus::Cancelled);
    }

    #[test]
    fn test_status_from_str_accepts_both_spellings() {
        assert_eq!("in progress".parse::<OrderStatus>(), Ok(OrderStatus::InProgress));
        assert_eq!("IN_PROGRESS".parse::<OrderStatus>(), Ok(OrderStatus::InProgress));
        assert!("shipped".parse::<OrderStatus>().is_err());
    }
}
