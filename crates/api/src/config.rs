//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ORCHARD_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to generic `DATABASE_URL`)
//!
//! ## Optional
//! - `ORCHARD_HOST` - Bind address (default: 0.0.0.0)
//! - `ORCHARD_PORT` - Listen port (default: 8000, falls back to `PORT`)
//! - `ORCHARD_PRODUCTS_COLLECTION` - Store collection for products
//!   (default: product)
//! - `ORCHARD_ORDERS_COLLECTION` - Store collection for orders
//!   (default: order)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Store collection names per entity
    pub collections: Collections,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Explicit mapping from entity type to store collection name.
///
/// Collection names are configuration, never derived from type names.
#[derive(Debug, Clone)]
pub struct Collections {
    /// Collection holding product documents.
    pub products: String,
    /// Collection holding order documents.
    pub orders: String,
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            products: "product".to_owned(),
            orders: "order".to_owned(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("ORCHARD_DATABASE_URL")?;
        let host = get_env_or_default("ORCHARD_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ORCHARD_HOST".to_owned(), e.to_string()))?;
        let port = get_port()?;
        let collections = Collections {
            products: get_env_or_default("ORCHARD_PRODUCTS_COLLECTION", "product"),
            orders: get_env_or_default("ORCHARD_ORDERS_COLLECTION", "order"),
        };
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            collections,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL` (used by
/// platform postgres attach).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_owned()))
}

/// Get the listen port, falling back to the generic `PORT` the platform sets.
fn get_port() -> Result<u16, ConfigError> {
    let (key, value) = if let Ok(value) = std::env::var("ORCHARD_PORT") {
        ("ORCHARD_PORT", value)
    } else if let Ok(value) = std::env::var("PORT") {
        ("PORT", value)
    } else {
        ("ORCHARD_PORT", "8000".to_owned())
    };

    value
        .parse::<u16>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_collections_default() {
        let collections = Collections::default();
        assert_eq!(collections.products, "product");
        assert_eq!(collections.orders, "order");
    }

    #[test]
    fn test_socket_addr() {
        let config = ApiConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8000,
            collections: Collections::default(),
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8000);
    }
}
