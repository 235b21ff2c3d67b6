//! Credential checks and token issuance.

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::services::UserService;
use crate::utils::jwt::{TokenPair, generate_token_pair, validate_refresh_token};
use crate::utils::password::verify_password;

pub const INVALID_CREDENTIALS: &str = "invalid email or password";

#[derive(Clone)]
pub struct AuthService {
    users: UserService,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(users: UserService, jwt_config: JwtConfig) -> Self {
        Self { users, jwt_config }
    }

    /// Exchange email and password for a token pair.
    ///
    /// Unknown email, deleted account and wrong password all fail with the
    /// same `Unauthorized` message.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<TokenPair> {
        let user = self
            .users
            .find_active_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        if !verify_password(password, &user.password)? {
            tracing::warn!(user_id = %user.id, "Rejected login with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        tracing::info!(user_id = %user.id, "User logged in");
        generate_token_pair(user.id, &user.email, &self.jwt_config)
    }

    /// Exchange a refresh token of an active user for a new pair.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = validate_refresh_token(refresh_token, &self.jwt_config.secret)?;
        let user_id = claims.user_id()?;

        let user = self
            .users
            .find_active(user_id)
            .await
            .map_err(|_| AppError::unauthorized("Account no longer exists"))?;

        generate_token_pair(user.id, &user.email, &self.jwt_config)
    }
}
