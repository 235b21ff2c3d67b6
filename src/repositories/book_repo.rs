//! PostgreSQL book repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{self, Book, BookFilter, NewBook, UpdateBook};
use crate::repositories::{BookStore, like_pattern};
use crate::schema::books;

#[derive(Clone)]
pub struct BookRepository {
    pool: AsyncDbPool,
}

impl BookRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BookRepository {
    async fn create(&self, new_book: NewBook) -> AppResult<Book> {
        let mut conn = self.pool.get().await?;

        let book = diesel::insert_into(books::table)
            .values(&new_book)
            .returning(Book::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(book)
    }

    async fn find_by_id(&self, book_id: Uuid) -> AppResult<Option<Book>> {
        let mut conn = self.pool.get().await?;

        let book = books::table
            .find(book_id)
            .select(Book::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(book)
    }

    async fn list(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let mut conn = self.pool.get().await?;

        let mut query = books::table.select(Book::as_select()).into_boxed();
        if !filter.all {
            query = query.filter(books::is_deleted.eq(false));
        }
        if let Some(ref title) = filter.title {
            query = query.filter(books::title.ilike(like_pattern(title)));
        }
        if let Some(ref author) = filter.author {
            query = query.filter(books::author.ilike(like_pattern(author)));
        }
        if let Some(ref genre) = filter.genre {
            query = query.filter(books::genre.eq(genre.clone()));
        }
        if let Some(ref publisher) = filter.publisher {
            query = query.filter(books::publisher.eq(publisher.clone()));
        }
        if let Some(year) = filter.published_year {
            query = query.filter(books::published_year.eq(year));
        }

        let found = query
            .order(books::created_at.desc())
            .load(&mut conn)
            .await?;
        Ok(found)
    }

    async fn update(&self, book_id: Uuid, changes: UpdateBook) -> AppResult<Book> {
        let mut conn = self.pool.get().await?;

        let book = diesel::update(books::table.find(book_id))
            .set((&changes, books::updated_at.eq(models::now())))
            .returning(Book::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(book)
    }

    async fn soft_delete(&self, book_id: Uuid) -> AppResult<Book> {
        let mut conn = self.pool.get().await?;

        let book = diesel::update(books::table.find(book_id))
            .set((
                books::is_deleted.eq(true),
                books::updated_at.eq(models::now()),
            ))
            .returning(Book::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(book)
    }
}
