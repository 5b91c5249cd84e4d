//! Per-user key-value storage with upsert semantics.
//!
//! Values are stored as JSON text and deserialized on read. The store does
//! not validate the shape of what it hands back (schema-on-read).

use sqlx::Row;

use crate::error::{AppError, Result};

use super::Db;

impl Db {
    /// Fetch the value stored under (user_id, key); absence is not an error
    pub async fn kv_get(&self, user_id: i64, key: &str) -> Result<Option<serde_json::Value>> {
        let text: Option<String> = match self {
            Db::Sqlite(pool) => {
                sqlx::query("SELECT value FROM storage WHERE user_id = ? AND key = ?")
                    .bind(user_id)
                    .bind(key)
                    .fetch_optional(pool)
                    .await?
                    .map(|row| row.try_get("value"))
                    .transpose()?
            }
            Db::Postgres(pool) => {
                sqlx::query("SELECT value FROM storage WHERE user_id = $1 AND key = $2")
                    .bind(user_id)
                    .bind(key)
                    .fetch_optional(pool)
                    .await?
                    .map(|row| row.try_get("value"))
                    .transpose()?
            }
        };

        match text {
            Some(text) => {
                let value = serde_json::from_str(&text)
                    .map_err(|e| sqlx::Error::Decode(Box::new(e)))
                    .map_err(AppError::from)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Insert or overwrite the value stored under (user_id, key)
    ///
    /// A single statement on both backends, so concurrent writers cannot
    /// interleave a read-then-write race; the last committed write wins.
    pub async fn kv_set(&self, user_id: i64, key: &str, value: &serde_json::Value) -> Result<()> {
        let text = serde_json::to_string(value)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))
            .map_err(AppError::from)?;
        match self {
            Db::Sqlite(pool) => {
                sqlx::query(
                    "INSERT INTO storage (user_id, key, value) VALUES (?, ?, ?) \
                     ON CONFLICT(user_id, key) DO UPDATE SET value = excluded.value",
                )
                .bind(user_id)
                .bind(key)
                .bind(text)
                .execute(pool)
                .await?;
            }
            Db::Postgres(pool) => {
                sqlx::query(
                    "INSERT INTO storage (user_id, key, value) VALUES ($1, $2, $3) \
                     ON CONFLICT (user_id, key) DO UPDATE SET value = excluded.value",
                )
                .bind(user_id)
                .bind(key)
                .bind(text)
                .execute(pool)
                .await?;
            }
        }
        Ok(())
    }

    /// Remove the entry under (user_id, key); deleting an absent key is a no-op
    pub async fn kv_delete(&self, user_id: i64, key: &str) -> Result<()> {
        match self {
            Db::Sqlite(pool) => {
                sqlx::query("DELETE FROM storage WHERE user_id = ? AND key = ?")
                    .bind(user_id)
                    .bind(key)
                    .execute(pool)
                    .await?;
            }
            Db::Postgres(pool) => {
                sqlx::query("DELETE FROM storage WHERE user_id = $1 AND key = $2")
                    .bind(user_id)
                    .bind(key)
                    .execute(pool)
                    .await?;
            }
        }
        Ok(())
    }
}
