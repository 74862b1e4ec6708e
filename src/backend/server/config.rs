/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration:
 * bind address, JWT settings and the optional PostgreSQL connection.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables (after `.env` is read
 * by `main`), with sensible defaults for local development:
 *
 * | Variable       | Default              |
 * |----------------|----------------------|
 * | `SERVER_HOST`  | `0.0.0.0`            |
 * | `SERVER_PORT`  | `8000`               |
 * | `DATABASE_URL` | unset (no database)  |
 * | `JWT_SECRET`   | development secret   |
 * | `JWT_TTL_SECS` | 30 days              |
 *
 * # Error Handling
 *
 * Values that are present but unparsable fail with `ConfigError`. A
 * database that cannot be reached is logged and does not prevent start-up;
 * the pool is then `None` and CRUD endpoints answer 503.
 */

use sqlx::PgPool;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;

use crate::backend::auth::sessions::{JwtSettings, DEFAULT_TOKEN_TTL_SECS};

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8000;
const DEV_JWT_SECRET: &str = "development-secret-change-me";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_ttl_secs: u64,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("jwt_secret", &"<redacted>")
            .field("jwt_ttl_secs", &self.jwt_ttl_secs)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            database_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(host) = lookup("SERVER_HOST") {
            builder = builder.host(&host)?;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            let port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: port.clone(),
            })?;
            builder = builder.port(port);
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            builder = builder.database_url(url);
        }
        match lookup("JWT_SECRET").filter(|secret| !secret.is_empty()) {
            Some(secret) => builder = builder.jwt_secret(secret),
            None => {
                tracing::warn!("JWT_SECRET not set. Using the development secret.");
            }
        }
        if let Some(ttl) = lookup("JWT_TTL_SECS") {
            let ttl = ttl.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "JWT_TTL_SECS",
                value: ttl.clone(),
            })?;
            builder = builder.jwt_ttl_secs(ttl);
        }

        builder.build()
    }

    /// Address the HTTP listener binds to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn jwt_settings(&self) -> JwtSettings {
        JwtSettings::new(self.jwt_secret.clone(), self.jwt_ttl_secs)
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    host: Option<IpAddr>,
    port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    jwt_ttl_secs: Option<u64>,
}

impl ServerConfigBuilder {
    /// Set the bind host (an IP address)
    pub fn host(mut self, host: &str) -> Result<Self, ConfigError> {
        let parsed = host.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: "SERVER_HOST",
            value: host.to_string(),
        })?;
        self.host = Some(parsed);
        Ok(self)
    }

    /// Set the bind port (0 picks a free port)
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn jwt_ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.jwt_ttl_secs = Some(ttl_secs);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let defaults = ServerConfig::default();

        let jwt_ttl_secs = self.jwt_ttl_secs.unwrap_or(defaults.jwt_ttl_secs);
        if jwt_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "JWT_TTL_SECS",
                value: "0".to_string(),
            });
        }

        let jwt_secret = self.jwt_secret.unwrap_or(defaults.jwt_secret);
        if jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }

        Ok(ServerConfig {
            host: self.host.unwrap_or(defaults.host),
            port: self.port.unwrap_or(defaults.port),
            database_url: self.database_url,
            jwt_secret,
            jwt_ttl_secs,
        })
    }
}

/// Load and initialize database connection pool
///
/// This function:
/// 1. Creates a PostgreSQL connection pool from `database_url`
/// 2. Runs database migrations
///
/// # Returns
///
/// - `Some(PgPool)` if database is successfully configured
/// - `None` if no URL is configured or the connection fails
pub async fn load_database(database_url: Option<&str>) -> Option<PgPool> {
    let Some(database_url) = database_url else {
        tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            // Migrations might have already been applied by another instance
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
