pub mod auth;
pub mod chat;
pub mod health;
pub mod storage;

pub use auth::{login, logout, register, session_info};
pub use chat::chat;
pub use health::health_check;
pub use storage::{delete_value, get_value, set_value};

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Build the API router with all routes bound to the shared state
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/session", get(session_info))
        .route("/api/auth/logout", post(logout))
        .route("/api/storage", post(set_value))
        .route("/api/storage/:key", get(get_value).delete(delete_value))
        .route("/api/chat", post(chat))
        .with_state(state)
}
