//! Configuration module for the study resources backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Placeholder secret used when no token secrets are configured.
pub const DEV_TOKEN_SECRET: &str = "dev-only-insecure-secret";

/// Token signing configuration.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HS256 secret for short-lived access tokens
    pub access_secret: String,
    /// HS256 secret for refresh tokens
    pub refresh_secret: String,
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
}

/// Object storage configuration for pre-signed upload URLs.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket receiving uploaded assets
    pub bucket: String,
    /// Storage region
    pub region: String,
    /// Custom endpoint for S3-compatible providers
    pub endpoint: Option<String>,
    /// Access key id for request signing
    pub access_key: String,
    /// Secret access key for request signing
    pub secret_key: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Token signing settings
    pub tokens: TokenConfig,
    /// Object storage settings
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("STUDY_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let bind_addr = env::var("STUDY_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid STUDY_BIND_ADDR format");

        let log_level = env::var("STUDY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let tokens = TokenConfig {
            access_secret: env::var("STUDY_ACCESS_TOKEN_SECRET")
                .unwrap_or_else(|_| DEV_TOKEN_SECRET.to_string()),
            refresh_secret: env::var("STUDY_REFRESH_TOKEN_SECRET")
                .unwrap_or_else(|_| DEV_TOKEN_SECRET.to_string()),
            access_ttl: Duration::from_secs(parse_secs("STUDY_ACCESS_TOKEN_TTL_SECS", 15 * 60)),
            refresh_ttl: Duration::from_secs(parse_secs(
                "STUDY_REFRESH_TOKEN_TTL_SECS",
                5 * 24 * 60 * 60,
            )),
        };

        let storage = StorageConfig {
            bucket: env::var("STUDY_BUCKET_NAME").unwrap_or_else(|_| "study-resources".to_string()),
            region: env::var("STUDY_BUCKET_REGION").unwrap_or_else(|_| "eu-central-1".to_string()),
            endpoint: env::var("STUDY_BUCKET_ENDPOINT").ok(),
            access_key: env::var("STUDY_STORAGE_ACCESS_KEY").unwrap_or_default(),
            secret_key: env::var("STUDY_STORAGE_SECRET_KEY").unwrap_or_default(),
        };

        Self {
            db_path,
            bind_addr,
            log_level,
            tokens,
            storage,
        }
    }
}

fn parse_secs(var: &str, default: u64) -> u64 {
    env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("STUDY_DB_PATH");
        env::remove_var("STUDY_BIND_ADDR");
        env::remove_var("STUDY_LOG_LEVEL");
        env::remove_var("STUDY_ACCESS_TOKEN_SECRET");
        env::remove_var("STUDY_REFRESH_TOKEN_SECRET");
        env::remove_var("STUDY_ACCESS_TOKEN_TTL_SECS");
        env::remove_var("STUDY_REFRESH_TOKEN_TTL_SECS");

        let config = Config::from_env();

        assert_eq!(config.db_path, PathBuf::from("./data/app.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.tokens.access_ttl, Duration::from_secs(900));
        assert_eq!(config.tokens.refresh_ttl, Duration::from_secs(432_000));
    }
}
