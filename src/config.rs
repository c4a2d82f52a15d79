//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honoured for local development. Without data store
//! credentials the server runs against the in-memory store.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosted data store (e.g. `https://xyz.supabase.co`)
    pub database_url: Option<String>,
    /// Anonymous API key for the data store
    pub database_api_key: Option<String>,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Path to the article catalog
    pub articles_path: String,
    /// Optional JSON seed for the in-memory store
    pub seed_path: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            database_url: None,
            database_api_key: None,
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            articles_path: "data/articles.json".to_string(),
            seed_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let database_url = optional_var("DATABASE_URL");
        let database_api_key = optional_var("DATABASE_API_KEY");

        // Store credentials come as a pair.
        match (&database_url, &database_api_key) {
            (Some(_), None) => return Err(ConfigError::Missing("DATABASE_API_KEY")),
            (None, Some(_)) => return Err(ConfigError::Missing("DATABASE_URL")),
            _ => {}
        }

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 8080,
        };

        Ok(Self {
            database_url: database_url.map(|u| u.trim_end_matches('/').to_string()),
            database_api_key,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port,
            articles_path: env::var("ARTICLES_PATH")
                .unwrap_or_else(|_| "data/articles.json".to_string()),
            seed_path: optional_var("SEED_PATH"),
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
