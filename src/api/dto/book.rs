//! Book DTOs. Prices travel as decimal strings, e.g. `"12.50"`.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::format_timestamp;
use crate::models::{Book, UpdateBook};
use crate::services::BookDraft;

// ============================================================================
// Request DTOs
// ============================================================================

/// New listing. The seller is taken from the bearer token.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateBookRequest {
    /// Required, checked by the service so the error names the book
    #[validate(length(max = 255, message = "title must be at most 255 characters"))]
    #[schema(example = "Dune")]
    pub title: Option<String>,
    #[validate(length(max = 255, message = "author must be at most 255 characters"))]
    #[schema(example = "Frank Herbert")]
    pub author: Option<String>,
    #[validate(length(max = 100, message = "genre must be at most 100 characters"))]
    pub genre: Option<String>,
    #[validate(length(max = 255, message = "publisher must be at most 255 characters"))]
    pub publisher: Option<String>,
    #[validate(range(min = 0, max = 9999, message = "published_year must be between 0 and 9999"))]
    #[schema(example = 1965)]
    pub published_year: Option<i32>,
    #[schema(value_type = Option<String>, example = "12.50")]
    pub price: Option<BigDecimal>,
}

impl From<CreateBookRequest> for BookDraft {
    fn from(req: CreateBookRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            genre: req.genre,
            publisher: req.publisher,
            published_year: req.published_year,
            price: req.price,
        }
    }
}

/// Partial update of the book identified by `id`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateBookRequest {
    pub id: Uuid,
    #[validate(length(max = 255, message = "title must be at most 255 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 255, message = "author must be at most 255 characters"))]
    pub author: Option<String>,
    #[validate(length(max = 100, message = "genre must be at most 100 characters"))]
    pub genre: Option<String>,
    #[validate(length(max = 255, message = "publisher must be at most 255 characters"))]
    pub publisher: Option<String>,
    #[validate(range(min = 0, max = 9999, message = "published_year must be between 0 and 9999"))]
    pub published_year: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub price: Option<BigDecimal>,
}

impl UpdateBookRequest {
    pub fn into_parts(self) -> (Uuid, UpdateBook) {
        (
            self.id,
            UpdateBook {
                title: self.title,
                author: self.author,
                genre: self.genre,
                publisher: self.publisher,
                published_year: self.published_year,
                price: self.price,
            },
        )
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub published_year: Option<i32>,
    #[schema(value_type = String, example = "12.50")]
    pub price: BigDecimal,
    pub seller_id: Uuid,
    pub is_deleted: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            created_at: format_timestamp(&book.created_at),
            updated_at: format_timestamp(&book.updated_at),
            id: book.id,
            title: book.title,
            author: book.author,
            genre: book.genre,
            publisher: book.publisher,
            published_year: book.published_year,
            price: book.price,
            seller_id: book.seller_id,
            is_deleted: book.is_deleted,
        }
    }
}

/// Mutation response: `{ "message", "book" }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookMessage {
    #[schema(example = "book created")]
    pub message: String,
    pub book: BookResponse,
}

impl BookMessage {
    pub fn new(message: &str, book: Book) -> Self {
        Self {
            message: message.to_string(),
            book: book.into(),
        }
    }
}
