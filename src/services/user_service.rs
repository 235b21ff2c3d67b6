//! User accounts. Every account is private to its owner except for listing.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{self, NewUser, UpdateUser, User, UserFilter};
use crate::repositories::UserStore;
use crate::services::guard::{ensure_owner, require_active};
use crate::utils::password::hash_password;

pub const NOT_ACCOUNT_OWNER: &str = "you can only access your own account";

/// Registration data with the password still in plain text
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Register a new account, hashing the password before it is stored.
    ///
    /// # Errors
    /// `Duplicate` when the email is already registered.
    pub async fn create(&self, draft: UserDraft) -> AppResult<User> {
        let now = models::now();
        let user = self
            .users
            .create(NewUser {
                id: Uuid::new_v4(),
                name: draft.name,
                email: draft.email,
                password: hash_password(&draft.password)?,
                is_deleted: false,
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Active user by id, without an ownership check.
    pub async fn find_active(&self, user_id: Uuid) -> AppResult<User> {
        require_active(self.users.find_by_id(user_id).await?, user_id)
    }

    /// Active user by email, for credential checks.
    pub async fn find_active_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .find_by_email(email)
            .await?
            .filter(|u| !u.is_deleted))
    }

    pub async fn get(&self, requester: Uuid, user_id: Uuid) -> AppResult<User> {
        let user = self.find_active(user_id).await?;
        ensure_owner(&user, requester, NOT_ACCOUNT_OWNER)?;
        Ok(user)
    }

    pub async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        self.users.list(filter).await
    }

    /// Update the requester's own account. A new password is hashed first.
    pub async fn update(
        &self,
        requester: Uuid,
        user_id: Uuid,
        mut changes: UpdateUser,
    ) -> AppResult<User> {
        self.get(requester, user_id).await?;

        if let Some(password) = changes.password.take() {
            changes.password = Some(hash_password(&password)?);
        }
        self.users.update(user_id, changes).await
    }

    pub async fn delete(&self, requester: Uuid, user_id: Uuid) -> AppResult<User> {
        self.get(requester, user_id).await?;

        let user = self.users.soft_delete(user_id).await?;
        tracing::info!(user_id = %user.id, "User deactivated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::repositories::MemoryUserStore;
    use crate::utils::password::verify_password;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryUserStore::default()))
    }

    fn draft(email: &str) -> UserDraft {
        UserDraft {
            name: Some("Grace".to_string()),
            email: email.to_string(),
            password: "hopper1906".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let user = service().create(draft("grace@example.com")).await.unwrap();

        assert_ne!(user.password, "hopper1906");
        assert!(verify_password("hopper1906", &user.password).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let service = service();
        service.create(draft("grace@example.com")).await.unwrap();

        assert!(matches!(
            service.create(draft("grace@example.com")).await,
            Err(AppError::Duplicate { .. })
        ));
    }

    #[tokio::test]
    async fn test_other_accounts_forbidden() {
        let service = service();
        let grace = service.create(draft("grace@example.com")).await.unwrap();
        let ada = service.create(draft("ada@example.com")).await.unwrap();

        assert!(service.get(grace.id, grace.id).await.is_ok());
        assert!(matches!(
            service.get(ada.id, grace.id).await,
            Err(AppError::Forbidden { .. })
        ));
        assert!(matches!(
            service.delete(ada.id, grace.id).await,
            Err(AppError::Forbidden { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let service = service();
        let user = service.create(draft("grace@example.com")).await.unwrap();

        let updated = service
            .update(
                user.id,
                user.id,
                UpdateUser {
                    password: Some("cobol1959".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(verify_password("cobol1959", &updated.password).unwrap());
    }

    #[tokio::test]
    async fn test_deleted_user_is_gone() {
        let service = service();
        let user = service.create(draft("grace@example.com")).await.unwrap();
        service.delete(user.id, user.id).await.unwrap();

        assert!(matches!(
            service.get(user.id, user.id).await,
            Err(AppError::NotFound { .. })
        ));
        assert!(service
            .find_active_by_email("grace@example.com")
            .await
            .unwrap()
            .is_none());
        assert!(service.list(&UserFilter::default()).await.unwrap().is_empty());
    }
}
