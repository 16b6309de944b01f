use anyhow::{Context, Result};
use std::env;

use crate::services::ranked::FallbackPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    /// Signing secret of the backend's identity service; bearer tokens are
    /// verified against it.
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub client_base_url: String,
    pub dancer_order_fallback: FallbackPolicy,
    pub team_order_fallback: FallbackPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_env_only()
    }

    /// Load configuration from environment variables only (without loading .env files)
    /// This is useful for testing where you want to control the environment directly
    pub fn from_env_only() -> Result<Self> {
        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://postgres@localhost:5432/postgres".to_string()),
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secret-jwt-token-with-at-least-32-characters".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            client_base_url: env::var("CLIENT_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            dancer_order_fallback: fallback_from_env(
                "DANCER_ORDER_FALLBACK",
                FallbackPolicy::Unordered,
            )?,
            team_order_fallback: fallback_from_env("TEAM_ORDER_FALLBACK", FallbackPolicy::Empty)?,
        })
    }

    /// Fixed values for tests; nothing is read from the environment.
    pub fn test_config() -> Self {
        Config {
            database_url: "postgres://postgres@localhost:5432/roster_test".to_string(),
            database_max_connections: 1,
            jwt_secret: "test-jwt-secret-key-that-is-long-enough".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            client_base_url: "http://localhost:3000".to_string(),
            dancer_order_fallback: FallbackPolicy::Unordered,
            team_order_fallback: FallbackPolicy::Empty,
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn fallback_from_env(key: &str, default: FallbackPolicy) -> Result<FallbackPolicy> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("Invalid value for {}", key)),
        Err(_) => Ok(default),
    }
}
