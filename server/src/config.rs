//! Startup configuration, read from the environment.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/recipedata";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_API_PREFIX: &str = "/api/recipes";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid BIND_ADDR {0:?}: expected host:port")]
    InvalidBindAddr(String),

    #[error("Invalid RECIPE_STORE {0:?}: expected \"postgres\" or \"memory\"")]
    InvalidStore(String),
}

/// Which [`crate::store::RecipeStore`] implementation to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(ConfigError::InvalidStore(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Normalized mount prefix for the recipe endpoints
    pub api_prefix: String,
    pub store: StoreKind,
}

impl Config {
    /// Environment variables:
    /// - `DATABASE_URL`: Postgres URL (default `postgres://localhost/recipedata`)
    /// - `BIND_ADDR`: listen address (default `0.0.0.0:8080`)
    /// - `API_PREFIX`: mount prefix (default `/api/recipes`)
    /// - `RECIPE_STORE`: `postgres` (default) or `memory`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(raw_addr.clone()))?;

        let api_prefix = normalize_prefix(
            &lookup("API_PREFIX").unwrap_or_else(|| DEFAULT_API_PREFIX.to_string()),
        );

        let store = match lookup("RECIPE_STORE") {
            Some(raw) => raw.parse()?,
            None => StoreKind::default(),
        };

        Ok(Self {
            database_url,
            bind_addr,
            api_prefix,
            store,
        })
    }
}

/// Give a mount prefix exactly one leading slash and no trailing slash.
/// The root prefix normalizes to the empty string.
pub fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
