//! WealthFlow Server Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod gemini;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;
pub mod session;

pub use config::Config;
pub use db::Db;
pub use error::{AppError, Result};

use std::sync::Arc;

use gemini::GeminiClient;
use session::SessionStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
    pub sessions: Arc<SessionStore>,
    pub gemini: Option<GeminiClient>,
}

impl AppState {
    /// Create a new AppState with the given database and configuration
    ///
    /// The session store and the optional Gemini client are derived from the
    /// configuration.
    pub fn new(db: Db, config: Config) -> Self {
        let sessions = Arc::new(SessionStore::new(config.secret_key.clone()));
        let gemini = config.gemini_api_key.clone().map(GeminiClient::new);
        Self {
            db,
            config,
            sessions,
            gemini,
        }
    }
}
