use std::env;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_ttl_seconds: i64,
    pub refresh_token_ttl_days: i64,
}

impl JwtConfig {
    const MAX_ACCESS_TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;
    const MAX_REFRESH_TOKEN_TTL_DAYS: i64 = 10 * 365;

    /// Reject lifetimes that would issue already-expired tokens or overflow
    /// date arithmetic at request time.
    ///
    /// # Errors
    /// * `ConfigError::Message` - A TTL is non-positive or out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=Self::MAX_ACCESS_TOKEN_TTL_SECONDS).contains(&self.access_token_ttl_seconds) {
            return Err(ConfigError::Message(format!(
                "jwt.access_token_ttl_seconds must be between 1 and {}, got {}",
                Self::MAX_ACCESS_TOKEN_TTL_SECONDS,
                self.access_token_ttl_seconds
            )));
        }

        if !(1..=Self::MAX_REFRESH_TOKEN_TTL_DAYS).contains(&self.refresh_token_ttl_days) {
            return Err(ConfigError::Message(format!(
                "jwt.refresh_token_ttl_days must be between 1 and {}, got {}",
                Self::MAX_REFRESH_TOKEN_TTL_DAYS,
                self.refresh_token_ttl_days
            )));
        }

        Ok(())
    }

    pub fn access_token_ttl(&self) -> Duration {
        Duration::seconds(self.access_token_ttl_seconds)
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_ttl_days)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Self = configuration.try_deserialize()?;
        config.jwt.validate()?;

        Ok(config)
    }
}
