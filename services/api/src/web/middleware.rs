//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use giftlink_core::ports::PortError;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::{error::ApiError, web::state::AppState};

/// The caller behind a validated bearer token, available to protected handlers.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub token: String,
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Middleware that validates the bearer token and extracts the user.
///
/// If valid, inserts an `AuthenticatedUser` into request extensions for handlers to use.
/// If invalid or missing, returns 401 Unauthorized.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // 1. Extract the bearer token
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_string)
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    // 2. Validate the token in the database, get user_id
    let user_id = state
        .db
        .validate_auth_session(&token)
        .await
        .map_err(|e| match e {
            PortError::Unauthorized | PortError::NotFound(_) => {
                debug!("Rejected auth token");
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
            other => ApiError::Port(other),
        })?;

    // 3. Insert the caller into request extensions
    req.extensions_mut()
        .insert(AuthenticatedUser { user_id, token });

    // 4. Continue to the handler
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::bearer_token;

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer   abc "), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }
}
