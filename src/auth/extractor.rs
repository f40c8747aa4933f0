//! `AuthUser` extractor: pulls the bearer token from the Authorization
//! header and resolves it to a user.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::app_state::AppState;
use crate::domain::UserId;
use crate::error::BookingError;

/// Authenticated caller, available as a handler argument.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BookingError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| BookingError::Unauthorized("missing Authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                BookingError::Unauthorized("expected `Bearer <token>`".to_string())
            })?;

        let user_id = state.authenticator.authenticate(token).await?;
        Ok(Self(user_id))
    }
}
