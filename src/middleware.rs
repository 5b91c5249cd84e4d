//! Session guard for endpoints that require an authenticated caller.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};

use crate::error::AppError;
use crate::session::Session;
use crate::AppState;

/// Extract the bearer token from an Authorization header, if any
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    auth.trim().strip_prefix("Bearer ")
}

/// Resolved identity of the calling session
///
/// Handlers that take this extractor only run for valid sessions; a missing,
/// unknown or expired token short-circuits with 401 before the handler body.
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AppError::Unauthenticated)?;
        let session = state
            .sessions
            .resolve(token)
            .await
            .ok_or(AppError::Unauthenticated)?;
        Ok(AuthSession(session))
    }
}
