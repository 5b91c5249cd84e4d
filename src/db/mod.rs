pub mod kv;
pub mod schema;
pub mod users;

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};
use std::path::Path;
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;

/// Database handle: one logical schema behind two physical dialects.
///
/// Every call site goes through the methods on this enum; each method carries
/// its own statement per dialect, so no SQL string is rewritten at runtime.
#[derive(Clone)]
pub enum Db {
    Sqlite(SqlitePool),
    Postgres(PgPool),
}

impl Db {
    /// Open a connection pool for the backend selected by configuration
    ///
    /// A configured `DATABASE_URL` selects Postgres; otherwise the embedded
    /// SQLite file at `database_path` is used, created on first run.
    pub async fn connect(config: &Config) -> Result<Self> {
        match &config.database_url {
            Some(url) => {
                tracing::info!("Creating Postgres connection pool...");
                let pool = PgPoolOptions::new()
                    .max_connections(10)
                    .min_connections(2)
                    .acquire_timeout(Duration::from_secs(10))
                    .idle_timeout(Duration::from_secs(600))
                    .max_lifetime(Duration::from_secs(1800))
                    .connect(url)
                    .await?;
                Ok(Db::Postgres(pool))
            }
            None => {
                tracing::info!("Opening SQLite database at: {}", config.database_path);
                create_parent_dir(&config.database_path)?;
                let options = SqliteConnectOptions::new()
                    .filename(&config.database_path)
                    .create_if_missing(true);
                let pool = SqlitePoolOptions::new()
                    .max_connections(10)
                    .acquire_timeout(Duration::from_secs(10))
                    .connect_with(options)
                    .await?;
                Ok(Db::Sqlite(pool))
            }
        }
    }

    /// Dialect name used in logs and the health report
    pub fn dialect(&self) -> &'static str {
        match self {
            Db::Sqlite(_) => "sqlite",
            Db::Postgres(_) => "postgres",
        }
    }

    /// Initialize the schema by executing the bundled DDL
    ///
    /// Statements run one at a time (sqlx::query is single-statement);
    /// idempotent thanks to CREATE TABLE IF NOT EXISTS.
    pub async fn init_schema(&self) -> Result<()> {
        let ddl = match self {
            Db::Sqlite(_) => schema::SQLITE_INIT,
            Db::Postgres(_) => schema::POSTGRES_INIT,
        };
        for stmt in ddl.split(';') {
            let stmt = stmt.trim();
            if stmt.is_empty() {
                continue;
            }
            match self {
                Db::Sqlite(pool) => {
                    sqlx::query(stmt).execute(pool).await?;
                }
                Db::Postgres(pool) => {
                    sqlx::query(stmt).execute(pool).await?;
                }
            }
        }
        tracing::info!("Database schema initialized ({})", self.dialect());
        Ok(())
    }

    /// Cheap connectivity round-trip for health checks
    pub async fn ping(&self) -> Result<()> {
        match self {
            Db::Sqlite(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
            }
            Db::Postgres(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
            }
        }
        Ok(())
    }
}

fn create_parent_dir(path: &str) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                tracing::error!("Failed to create database directory: {}", e);
                sqlx::Error::Io(e)
            })?;
        }
    }
    Ok(())
}
