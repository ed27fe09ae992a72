//! Database configuration
//!
//! PostgreSQL pool sizing for SQLx. Every knob has an environment override:
//! `DB_MAX_CONNECTIONS`, `DB_MIN_CONNECTIONS`, `DB_ACQUIRE_TIMEOUT_SECS`,
//! `DB_IDLE_TIMEOUT_SECS` and `DB_MAX_LIFETIME_SECS`.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use super::environment::{parsed, ConfigError};

/// Pool settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    /// Defaults for a small deployment
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(3600),
        }
    }

    /// Defaults overridden by the `DB_*` variables
    pub fn from_env(url: impl Into<String>) -> Result<Self, ConfigError> {
        let defaults = Self::new(url);
        Self {
            max_connections: parsed("DB_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: parsed("DB_MIN_CONNECTIONS", defaults.min_connections)?,
            acquire_timeout: Duration::from_secs(parsed(
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout.as_secs(),
            )?),
            idle_timeout: Duration::from_secs(parsed(
                "DB_IDLE_TIMEOUT_SECS",
                defaults.idle_timeout.as_secs(),
            )?),
            max_lifetime: Duration::from_secs(parsed(
                "DB_MAX_LIFETIME_SECS",
                defaults.max_lifetime.as_secs(),
            )?),
            ..defaults
        }
        .checked()
    }

    fn checked(self) -> Result<Self, ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DB_MAX_CONNECTIONS",
                value: self.max_connections.to_string(),
            });
        }
        if self.min_connections > self.max_connections {
            return Err(ConfigError::Invalid {
                name: "DB_MIN_CONNECTIONS",
                value: self.min_connections.to_string(),
            });
        }
        Ok(self)
    }

    /// Create the connection pool
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .connect(&self.url)
            .await
    }
}
