//! PostgreSQL user repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{self, NewUser, UpdateUser, User, UserFilter};
use crate::repositories::{UserStore, like_pattern};
use crate::schema::users;

#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut conn = self.pool.get().await?;

        let user = diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let mut conn = self.pool.get().await?;

        let user = users::table
            .find(user_id)
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(user)
    }

    async fn find_by_email(&self, user_email: &str) -> AppResult<Option<User>> {
        let mut conn = self.pool.get().await?;

        let user = users::table
            .filter(users::email.eq(user_email))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(user)
    }

    async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        let mut conn = self.pool.get().await?;

        let mut query = users::table
            .select(User::as_select())
            .filter(users::is_deleted.eq(false))
            .into_boxed();
        if let Some(ref name) = filter.name {
            query = query.filter(users::name.ilike(like_pattern(name)));
        }
        if let Some(ref email) = filter.email {
            query = query.filter(users::email.eq(email.clone()));
        }

        let found = query
            .order(users::created_at.desc())
            .load(&mut conn)
            .await?;
        Ok(found)
    }

    async fn update(&self, user_id: Uuid, changes: UpdateUser) -> AppResult<User> {
        let mut conn = self.pool.get().await?;

        let user = diesel::update(users::table.find(user_id))
            .set((&changes, users::updated_at.eq(models::now())))
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(user)
    }

    async fn soft_delete(&self, user_id: Uuid) -> AppResult<User> {
        let mut conn = self.pool.get().await?;

        let user = diesel::update(users::table.find(user_id))
            .set((
                users::is_deleted.eq(true),
                users::updated_at.eq(models::now()),
            ))
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(user)
    }
}
