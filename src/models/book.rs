use bigdecimal::BigDecimal;
use diesel::prelude::*;
use jiff_diesel::DateTime;
use uuid::Uuid;

/// Book listed for sale, owned by its seller
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub published_year: Option<i32>,
    pub price: BigDecimal,
    pub seller_id: Uuid,
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::books)]
pub struct NewBook {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub published_year: Option<i32>,
    pub price: BigDecimal,
    pub seller_id: Uuid,
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// Partial update. `None` fields are left untouched.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::books)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub published_year: Option<i32>,
    pub price: Option<BigDecimal>,
}

impl From<NewBook> for Book {
    fn from(new: NewBook) -> Self {
        Self {
            id: new.id,
            title: new.title,
            author: new.author,
            genre: new.genre,
            publisher: new.publisher,
            published_year: new.published_year,
            price: new.price,
            seller_id: new.seller_id,
            is_deleted: new.is_deleted,
            created_at: new.created_at,
            updated_at: new.updated_at,
        }
    }
}

impl Book {
    /// Apply a changeset in place, the way the database does.
    pub fn apply(&mut self, changes: UpdateBook) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if changes.author.is_some() {
            self.author = changes.author;
        }
        if changes.genre.is_some() {
            self.genre = changes.genre;
        }
        if changes.publisher.is_some() {
            self.publisher = changes.publisher;
        }
        if changes.published_year.is_some() {
            self.published_year = changes.published_year;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
    }
}
