use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// `AI_PROJECT_ID` is deliberately optional: its absence is a valid
/// configuration meaning the AI adapter serves static fallbacks only.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_pool_size: u32,
    pub jwt_secret: String,
    pub port: u16,
    pub rust_log: String,
    /// Google Cloud project id for Vertex AI. `None` disables live model calls.
    pub ai_project_id: Option<String>,
    pub ai_location: String,
    pub ai_model: String,
    /// Bearer token for the Vertex AI REST endpoint.
    pub ai_access_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            database_pool_size: std::env::var("DATABASE_POOL_SIZE")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u32>()
                .context("DATABASE_POOL_SIZE must be a number")?,
            jwt_secret: require_env("JWT_SECRET")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            ai_project_id: optional_env("GOOGLE_CLOUD_PROJECT_ID"),
            ai_location: std::env::var("GOOGLE_CLOUD_LOCATION")
                .unwrap_or_else(|_| "us-central1".to_string()),
            ai_model: std::env::var("GOOGLE_CLOUD_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-pro".to_string()),
            ai_access_token: optional_env("GOOGLE_CLOUD_ACCESS_TOKEN"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
