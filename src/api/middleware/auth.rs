//! Bearer token authentication.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_access_token};

/// Identity of the caller, inserted into request extensions by
/// [`auth_middleware`] and extracted in handlers with `Extension<AuthUser>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

impl TryFrom<Claims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> AppResult<Self> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.email,
        })
    }
}

fn bearer_token(request: &Request) -> AppResult<&str> {
    let value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format. Expected: Bearer <token>")
        })
}

/// Require a valid access token.
///
/// # Errors
/// 401 when the header is missing or malformed, or the token is invalid,
/// expired or a refresh token.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let claims = validate_access_token(bearer_token(&request)?, &state.jwt_config.secret)?;
    let auth_user = AuthUser::try_from(claims)?;

    tracing::debug!(user_id = %auth_user.user_id, "Authenticated request");
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::TokenType;
    use axum::body::Body;

    fn claims(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "test@example.com".to_string(),
            token_type: TokenType::Access,
            iat: 0,
            exp: 9_999_999_999,
        }
    }

    fn request_with(header_value: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/api/books");
        if let Some(value) = header_value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_auth_user_from_claims() {
        let id = Uuid::new_v4();
        let auth_user = AuthUser::try_from(claims(&id.to_string())).unwrap();
        assert_eq!(auth_user.user_id, id);
        assert_eq!(auth_user.email, "test@example.com");
    }

    #[test]
    fn test_auth_user_rejects_non_uuid_subject() {
        assert!(matches!(
            AuthUser::try_from(claims("123")),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(
            bearer_token(&request_with(Some("Bearer abc.def"))).unwrap(),
            "abc.def"
        );
        assert!(bearer_token(&request_with(None)).is_err());
        assert!(bearer_token(&request_with(Some("Basic abc"))).is_err());
        assert!(bearer_token(&request_with(Some("Bearer   "))).is_err());
    }
}
