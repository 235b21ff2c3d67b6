//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::format_timestamp;
use crate::models::{UpdateUser, User};
use crate::services::UserDraft;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for registering a new user.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(max = 100, message = "name must be at most 100 characters"))]
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[validate(email(message = "must provide a valid email"))]
    #[schema(format = "email", example = "ada@example.com")]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "password must be between 6 and 128 characters"))]
    #[schema(format = "password", min_length = 6, max_length = 128)]
    pub password: String,
}

impl From<CreateUserRequest> for UserDraft {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

/// Request body for updating the caller's own account.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    pub id: Uuid,
    #[validate(length(max = 100, message = "name must be at most 100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "must provide a valid email"))]
    #[schema(format = "email")]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 128, message = "password must be between 6 and 128 characters"))]
    #[schema(format = "password")]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn into_parts(self) -> (Uuid, UpdateUser) {
        (
            self.id,
            UpdateUser {
                name: self.name,
                email: self.email,
                password: self.password,
            },
        )
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// User data without the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub is_deleted: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            created_at: format_timestamp(&user.created_at),
            updated_at: format_timestamp(&user.updated_at),
            id: user.id,
            name: user.name,
            email: user.email,
            is_deleted: user.is_deleted,
        }
    }
}

/// Mutation response: `{ "message", "user" }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserMessage {
    #[schema(example = "user created")]
    pub message: String,
    pub user: UserResponse,
}

impl UserMessage {
    pub fn new(message: &str, user: User) -> Self {
        Self {
            message: message.to_string(),
            user: user.into(),
        }
    }
}
