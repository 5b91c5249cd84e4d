//! Credential store: username / password-hash rows.
//!
//! Only create and lookup are needed; users are never updated or deleted.

use chrono::{DateTime, Utc};
use sqlx::Row;

use crate::constants::DEFAULT_ROLE;
use crate::error::{AppError, Result};
use crate::models::User;

use super::Db;

impl Db {
    /// Insert a new user row and return it
    ///
    /// Uniqueness violations from either backend are normalized to
    /// `AppError::DuplicateUsername`.
    pub async fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        let created_at = Utc::now();
        let id: i64 = match self {
            Db::Sqlite(pool) => {
                let row = sqlx::query(
                    "INSERT INTO users (username, password_hash, role, created_at) \
                     VALUES (?, ?, ?, ?) RETURNING id",
                )
                .bind(username)
                .bind(password_hash)
                .bind(DEFAULT_ROLE)
                .bind(created_at.to_rfc3339())
                .fetch_one(pool)
                .await
                .map_err(classify_insert_error)?;
                row.try_get("id").map_err(AppError::from)?
            }
            Db::Postgres(pool) => {
                let row = sqlx::query(
                    "INSERT INTO users (username, password_hash, role, created_at) \
                     VALUES ($1, $2, $3, $4) RETURNING id",
                )
                .bind(username)
                .bind(password_hash)
                .bind(DEFAULT_ROLE)
                .bind(created_at)
                .fetch_one(pool)
                .await
                .map_err(classify_insert_error)?;
                row.try_get("id").map_err(AppError::from)?
            }
        };

        Ok(User {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            role: DEFAULT_ROLE.to_string(),
            created_at,
        })
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        match self {
            Db::Sqlite(pool) => {
                let row = sqlx::query(
                    "SELECT id, username, password_hash, role, created_at \
                     FROM users WHERE username = ?",
                )
                .bind(username)
                .fetch_optional(pool)
                .await?;
                row.map(sqlite_row_to_user).transpose()
            }
            Db::Postgres(pool) => {
                let row = sqlx::query(
                    "SELECT id, username, password_hash, role, created_at \
                     FROM users WHERE username = $1",
                )
                .bind(username)
                .fetch_optional(pool)
                .await?;
                row.map(postgres_row_to_user).transpose()
            }
        }
    }
}

fn classify_insert_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::DuplicateUsername;
        }
    }
    AppError::Database(e)
}

fn sqlite_row_to_user(row: sqlx::sqlite::SqliteRow) -> Result<User> {
    let created_at_text: String = row.try_get("created_at")?;
    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_at_text)
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
        .with_timezone(&Utc);
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        role: row.try_get("role")?,
        created_at,
    })
}

fn postgres_row_to_user(row: sqlx::postgres::PgRow) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        role: row.try_get("role")?,
        created_at: row.try_get("created_at")?,
    })
}
