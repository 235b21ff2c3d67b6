//! Book listing rules: the seller comes from the token and only the seller
//! may change or withdraw a listing.

use std::sync::Arc;

use bigdecimal::{BigDecimal, Zero};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{self, Book, BookFilter, NewBook, UpdateBook};
use crate::repositories::BookStore;
use crate::services::guard::{ensure_owner, require_active};

pub const MISSING_TITLE: &str = "must provide a title for the book";
pub const NOT_BOOK_OWNER: &str = "you are not the owner of this book";
pub const NOT_BOOK_OWNER_DELETE: &str = "you are not the owner of this book, you cannot delete it";

/// Book fields as submitted by a seller
#[derive(Debug, Clone, Default)]
pub struct BookDraft {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub published_year: Option<i32>,
    pub price: Option<BigDecimal>,
}

pub const MAX_TITLE_LEN: usize = 255;

/// Largest price plus one that fits `NUMERIC(12, 2)`
const PRICE_LIMIT: i64 = 10_000_000_000;

const PRICE_SCALE: i64 = 2;

fn check_title(title: &str) -> AppResult<()> {
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::bad_request(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Prices are stored as `NUMERIC(12, 2)`, so anything the column would round
/// or overflow is rejected up front.
fn check_price(price: Option<&BigDecimal>) -> AppResult<()> {
    let Some(price) = price else {
        return Ok(());
    };
    if *price < BigDecimal::zero() {
        return Err(AppError::bad_request("price cannot be negative"));
    }
    if *price >= BigDecimal::from(PRICE_LIMIT) {
        return Err(AppError::bad_request("price must be below 10000000000"));
    }
    if price.normalized().fractional_digit_count() > PRICE_SCALE {
        return Err(AppError::bad_request(
            "price cannot have more than 2 decimal places",
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookStore>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }

    /// List a new book for `seller_id`.
    ///
    /// # Errors
    /// `BadRequest` when the title is missing, blank or too long, or the price
    /// does not fit the stored precision.
    pub async fn create(&self, seller_id: Uuid, draft: BookDraft) -> AppResult<Book> {
        let title = draft
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::bad_request(MISSING_TITLE))?;
        check_title(&title)?;
        check_price(draft.price.as_ref())?;

        let now = models::now();
        let book = self
            .books
            .create(NewBook {
                id: Uuid::new_v4(),
                title,
                author: draft.author,
                genre: draft.genre,
                publisher: draft.publisher,
                published_year: draft.published_year,
                price: draft.price.unwrap_or_else(BigDecimal::zero),
                seller_id,
                is_deleted: false,
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!(book_id = %book.id, seller_id = %seller_id, "Book listed");
        Ok(book)
    }

    pub async fn get(&self, book_id: Uuid) -> AppResult<Book> {
        require_active(self.books.find_by_id(book_id).await?, book_id)
    }

    pub async fn list(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        self.books.list(filter).await
    }

    /// Apply a partial update on behalf of `requester`.
    ///
    /// Checks run in order: the book exists, `requester` is its seller, the
    /// changes are valid.
    pub async fn update(
        &self,
        requester: Uuid,
        book_id: Uuid,
        changes: UpdateBook,
    ) -> AppResult<Book> {
        let book = self.get(book_id).await?;
        ensure_owner(&book, requester, NOT_BOOK_OWNER)?;

        if let Some(title) = changes.title.as_deref() {
            if title.trim().is_empty() {
                return Err(AppError::bad_request(MISSING_TITLE));
            }
            check_title(title)?;
        }
        check_price(changes.price.as_ref())?;

        self.books.update(book_id, changes).await
    }

    pub async fn delete(&self, requester: Uuid, book_id: Uuid) -> AppResult<Book> {
        let book = self.get(book_id).await?;
        ensure_owner(&book, requester, NOT_BOOK_OWNER_DELETE)?;

        let book = self.books.soft_delete(book_id).await?;
        tracing::info!(book_id = %book.id, "Book withdrawn");
        Ok(book)
    }
}
