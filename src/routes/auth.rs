use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::constants::ERR_MISSING_CREDENTIALS;
use crate::error::{AppError, Result};
use crate::middleware::bearer_token;
use crate::models::PublicUser;
use crate::security;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub status: &'static str,
    pub user: PublicUser,
    pub token: String,
}

/// Register a new user and open a session for it
///
/// Returns 400 when either field is missing or the username is taken.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation(ERR_MISSING_CREDENTIALS.to_string()));
    }

    let password_hash = security::hash_password(&payload.password)?;
    let user = state
        .db
        .create_user(&payload.username, &password_hash)
        .await?;
    let token = state.sessions.create(&user).await;

    tracing::info!("New user registered: {} (id {})", user.username, user.id);

    Ok(Json(AuthResponse {
        status: "success",
        user: PublicUser::from(&user),
        token,
    }))
}

/// Log an existing user in
///
/// An unknown username and a wrong password produce the identical generic
/// 401, so usernames cannot be enumerated through this endpoint.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>> {
    let user = state.db.find_user_by_username(&payload.username).await?;

    let user = match user {
        Some(u) if security::verify_password(&payload.password, &u.password_hash) => u,
        _ => {
            tracing::warn!("Failed login attempt for {:?}", payload.username);
            return Err(AppError::InvalidCredentials);
        }
    };

    let token = state.sessions.create(&user).await;

    tracing::info!("User logged in: {} (id {})", user.username, user.id);

    Ok(Json(AuthResponse {
        status: "success",
        user: PublicUser::from(&user),
        token,
    }))
}

/// Report whether the presented token resolves to an active session
///
/// Reads only the session store; the credential store is never touched.
pub async fn session_info(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = match bearer_token(&headers) {
        Some(token) => state.sessions.resolve(token).await,
        None => None,
    };

    match session {
        Some(session) => Json(json!({
            "authenticated": true,
            "user": {
                "id": session.user_id,
                "username": session.username,
            },
        }))
        .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "authenticated": false })),
        )
            .into_response(),
    }
}

/// Invalidate the presented session token
///
/// Always succeeds, with or without a token; a revoked token fails
/// authentication on any subsequent request.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.revoke(token).await;
    }
    Json(json!({ "status": "success" }))
}
