//! Environment configuration
//!
//! Everything the server needs is read once at startup. Required values fail
//! fast with a `ConfigError`; the rest fall back to development defaults.

use std::env;
use std::str::FromStr;

use chrono::{FixedOffset, Offset, Utc};
use thiserror::Error;

use crate::services::clock::offset_from_minutes;

/// Dhaka, UTC+06:00
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 360;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Which backend serves the stores
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Live PostgreSQL database
    Postgres,
    /// In-memory store seeded from a catalog snapshot
    Static { snapshot_path: Option<String> },
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Postgres => "postgres",
            DataSource::Static { .. } => "static",
        }
    }
}

/// Environment configuration
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub data_source: DataSource,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
    pub admin_username: String,
    pub admin_password_hash: String,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    pub notification_webhook_url: Option<String>,
    pub site_url: String,
    pub booking_list_limit: i64,
    pub request_timeout_secs: u64,
    /// Local offset used for "not in the past" date checks
    pub business_offset: FixedOffset,
}

impl EnvironmentConfig {
    /// Read the configuration from process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = optional("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let data_source = match optional("DATA_SOURCE").as_deref() {
            None | Some("postgres") => DataSource::Postgres,
            Some("static") => DataSource::Static {
                snapshot_path: optional("CATALOG_SNAPSHOT_PATH"),
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "DATA_SOURCE",
                    value: other.to_string(),
                })
            }
        };

        let database_url = optional("DATABASE_URL");
        if data_source == DataSource::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let offset_minutes = parsed("BUSINESS_UTC_OFFSET_MINUTES", DEFAULT_UTC_OFFSET_MINUTES)?;
        let business_offset =
            offset_from_minutes(offset_minutes).ok_or_else(|| ConfigError::Invalid {
                name: "BUSINESS_UTC_OFFSET_MINUTES",
                value: offset_minutes.to_string(),
            })?;

        Ok(Self {
            port: parsed("PORT", 3000)?,
            host: optional("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            data_source,
            database_url,
            jwt_secret: required("JWT_SECRET")?,
            session_ttl_hours: parsed("SESSION_TTL_HOURS", 12)?,
            admin_username: required("ADMIN_USERNAME")?,
            admin_password_hash: required("ADMIN_PASSWORD_HASH")?,
            cors_origins: optional("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            rate_limit_requests: parsed("RATE_LIMIT_REQUESTS", 20)?,
            rate_limit_window: parsed("RATE_LIMIT_WINDOW", 60)?,
            notification_webhook_url: optional("NOTIFICATION_WEBHOOK_URL"),
            site_url: optional("SITE_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string())
                .trim_end_matches('/')
                .to_string(),
            booking_list_limit: parsed("BOOKING_LIST_LIMIT", 50)?,
            request_timeout_secs: parsed("REQUEST_TIMEOUT_SECS", 30)?,
            business_offset,
            environment,
        })
    }

    /// In-memory configuration for local runs and tests
    pub fn development(admin_password_hash: String) -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "127.0.0.1".to_string(),
            data_source: DataSource::Static { snapshot_path: None },
            database_url: None,
            jwt_secret: "development-only-secret".to_string(),
            session_ttl_hours: 12,
            admin_username: "admin".to_string(),
            admin_password_hash,
            cors_origins: Vec::new(),
            rate_limit_requests: 1_000,
            rate_limit_window: 60,
            notification_webhook_url: None,
            site_url: "http://localhost:3000".to_string(),
            booking_list_limit: 50,
            request_timeout_secs: 30,
            business_offset: offset_from_minutes(DEFAULT_UTC_OFFSET_MINUTES)
                .unwrap_or_else(|| Utc.fix()),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub(crate) fn optional(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

pub(crate) fn parsed<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
