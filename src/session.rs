//! Server-side session state: an explicit token -> identity mapping.
//!
//! Sessions live only for the lifetime of the process and are never written
//! to the relational store.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::constants::SESSION_TTL_SECS;
use crate::models::User;
use crate::security;

/// Identity resolved from a session token
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug)]
struct SessionEntry {
    session: Session,
    expires_at: DateTime<Utc>,
}

/// In-memory session store with a fixed TTL
pub struct SessionStore {
    secret_key: String,
    ttl: Duration,
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl SessionStore {
    pub fn new(secret_key: String) -> Self {
        Self::with_ttl(secret_key, Duration::seconds(SESSION_TTL_SECS))
    }

    /// Store with a custom TTL, used by tests to exercise expiry
    pub fn with_ttl(secret_key: String, ttl: Duration) -> Self {
        Self {
            secret_key,
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a session for the given user and return its token
    pub async fn create(&self, user: &User) -> String {
        let token = security::mint_session_token(&self.secret_key, user.id);
        let entry = SessionEntry {
            session: Session {
                user_id: user.id,
                username: user.username.clone(),
            },
            expires_at: Utc::now() + self.ttl,
        };
        self.sessions.write().await.insert(token.clone(), entry);
        token
    }

    /// Resolve a token to its session
    ///
    /// Expired entries are pruned on access and resolve to `None`, exactly
    /// like tokens that were never issued or already revoked.
    pub async fn resolve(&self, token: &str) -> Option<Session> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(entry) if entry.expires_at > Utc::now() => {
                    return Some(entry.session.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }
        self.sessions.write().await.remove(token);
        None
    }

    /// Invalidate a token immediately; revoking an unknown token is a no-op
    pub async fn revoke(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }
}
