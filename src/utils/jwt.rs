use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};

const SECONDS_PER_HOUR: i64 = 3600;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived token sent as `Authorization: Bearer`
    Access,
    /// Long-lived token exchanged for a new pair
    Refresh,
}

/// JWT claims. `sub` carries the user id as a hyphenated UUID.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, email: String, token_type: TokenType, expiration_hours: i64) -> Self {
        let now = jiff::Timestamp::now().as_second();

        Self {
            sub: user_id.to_string(),
            email,
            token_type,
            iat: now,
            exp: now + expiration_hours * SECONDS_PER_HOUR,
        }
    }

    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::unauthorized("Invalid token subject"))
    }
}

/// Signed access and refresh tokens for one user
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

pub fn generate_token(
    user_id: Uuid,
    email: String,
    token_type: TokenType,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(user_id, email, token_type, expiration_hours);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

pub fn generate_token_pair(user_id: Uuid, email: &str, config: &JwtConfig) -> AppResult<TokenPair> {
    let access_token = generate_token(
        user_id,
        email.to_string(),
        TokenType::Access,
        &config.secret,
        config.access_token_expiration,
    )?;
    let refresh_token = generate_token(
        user_id,
        email.to_string(),
        TokenType::Refresh,
        &config.secret,
        config.refresh_token_expiration,
    )?;

    Ok(TokenPair {
        access_token,
        refresh_token,
        expires_in: config.access_token_expiration * SECONDS_PER_HOUR,
    })
}

/// Decode and verify a token, optionally checking its type.
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized("Token has expired"),
        ErrorKind::InvalidSignature => AppError::unauthorized("Invalid token signature"),
        _ => AppError::unauthorized("Invalid token"),
    })?;

    if let Some(expected) = expected_type
        && claims.token_type != expected
    {
        return Err(AppError::unauthorized(format!(
            "Invalid token type: expected {:?}, got {:?}",
            expected, claims.token_type
        )));
    }

    Ok(claims)
}

pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

pub fn validate_refresh_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Refresh))
}
