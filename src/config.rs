use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Postgres connection string; when set, the networked backend is used
    pub database_url: Option<String>,
    /// SQLite file path used when no DATABASE_URL is configured
    pub database_path: String,
    /// Secret key used to derive session tokens
    pub secret_key: String,
    /// Gemini API key; chat relay is disabled when absent
    pub gemini_api_key: Option<String>,
    pub allowed_origins: Vec<String>,
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/wealthflow.db".to_string());

        let secret_key =
            env::var("SECRET_KEY").map_err(|_| "SECRET_KEY must be set for session tokens")?;

        let gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            server_host,
            server_port,
            database_url,
            database_path,
            secret_key,
            gemini_api_key,
            allowed_origins,
            environment,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
