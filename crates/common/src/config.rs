//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,

    /// Secret used to sign and verify access tokens (HS256)
    pub jwt_secret: String,

    /// Optional issuer / audience claims enforced on tokens
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,

    /// Access token lifetime in seconds
    pub token_ttl_secs: i64,

    /// Whether /v1/jobs/search requires an authenticated caller.
    /// The original routing exposed search both inside and outside the
    /// auth group, so this is a deployment choice rather than hard-coded.
    pub search_requires_auth: bool,

    /// Runtime configuration
    pub log_level: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,

            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?,
            jwt_issuer: env::var("JWT_ISSUER").ok(),
            jwt_audience: env::var("JWT_AUDIENCE").ok(),

            token_ttl_secs: env::var("TOKEN_TTL_SECS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .unwrap_or(86400),

            search_requires_auth: env::var("SEARCH_REQUIRES_AUTH")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires .env file with all config vars - run locally only
    fn test_config_from_env_loads_successfully() {
        let result = Config::from_env();
        assert!(
            result.is_ok(),
            "Config should load successfully in development environment: {}",
            result
                .err()
                .map_or("Unknown error".to_string(), |e| e.to_string())
        );

        let config = result.unwrap();
        assert!(
            !config.database_url.is_empty(),
            "DATABASE_URL should be populated"
        );
        assert!(config.port > 0, "PORT should be a valid port number");
    }
}
