//! Environment-driven configuration for the companies toolbox.
//!
//! Values are read from the process environment, optionally primed from a
//! `.env` file. Every setting has a default pointing at the public companies
//! demo database, so the service starts without any configuration at all.

use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_NEO4J_URI: &str = "neo4j+s://demo.neo4jlabs.com";
pub const DEFAULT_NEO4J_USER: &str = "companies";
pub const DEFAULT_NEO4J_PASSWORD: &str = "companies";
pub const DEFAULT_NEO4J_DATABASE: &str = "companies";
pub const DEFAULT_FETCH_SIZE: usize = 500;
pub const DEFAULT_MAX_CONNECTIONS: usize = 16;
pub const DEFAULT_SLOW_REQUEST_MS: u64 = 1000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Number of actix workers; `None` keeps the actix default (one per core).
    pub workers: Option<usize>,
    pub slow_request_ms: u64,
}

#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct Neo4jConfig {
    pub uri: String,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub database: String,
    pub fetch_size: usize,
    pub max_connections: usize,
    /// Chunk property holding the explicit position of a chunk inside its
    /// article. When unset, chunks are ordered by store-internal node id.
    pub chunk_sequence_property: Option<String>,
}

impl std::fmt::Debug for Neo4jConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Neo4jConfig")
            .field("uri", &self.uri)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("fetch_size", &self.fetch_size)
            .field("max_connections", &self.max_connections)
            .field("chunk_sequence_property", &self.chunk_sequence_property)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub neo4j: Neo4jConfig,
}

impl AppConfig {
    /// Load `.env` (if present) and read the configuration from the environment.
    pub fn from_env() -> ConfigResult<Self> {
        if dotenv::dotenv().is_ok() {
            tracing::debug!("Loaded environment from .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server = ServerConfig {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(get("PORT"), "PORT", DEFAULT_PORT)?,
            workers: match get("WORKERS") {
                Some(raw) => Some(parse_positive(&raw, "WORKERS")?),
                None => None,
            },
            slow_request_ms: parse_or(get("SLOW_REQUEST_MS"), "SLOW_REQUEST_MS", DEFAULT_SLOW_REQUEST_MS)?,
        };

        let chunk_sequence_property = match get("CHUNK_SEQUENCE_PROPERTY") {
            Some(prop) if is_identifier(&prop) => Some(prop),
            Some(prop) => {
                return Err(ConfigError::Invalid {
                    key: "CHUNK_SEQUENCE_PROPERTY",
                    value: prop,
                    reason: "must be a plain property identifier".to_string(),
                })
            }
            None => None,
        };

        let neo4j = Neo4jConfig {
            uri: get("NEO4J_URI").unwrap_or_else(|| DEFAULT_NEO4J_URI.to_string()),
            user: get("NEO4J_USERNAME").unwrap_or_else(|| DEFAULT_NEO4J_USER.to_string()),
            password: get("NEO4J_PASSWORD").unwrap_or_else(|| DEFAULT_NEO4J_PASSWORD.to_string()),
            database: get("NEO4J_DATABASE").unwrap_or_else(|| DEFAULT_NEO4J_DATABASE.to_string()),
            fetch_size: match get("NEO4J_FETCH_SIZE") {
                Some(raw) => parse_positive(&raw, "NEO4J_FETCH_SIZE")?,
                None => DEFAULT_FETCH_SIZE,
            },
            max_connections: match get("NEO4J_MAX_CONNECTIONS") {
                Some(raw) => parse_positive(&raw, "NEO4J_MAX_CONNECTIONS")?,
                None => DEFAULT_MAX_CONNECTIONS,
            },
            chunk_sequence_property,
        };

        Ok(Self { server, neo4j })
    }
}

fn parse_or<T>(raw: Option<String>, key: &'static str, default: T) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

fn parse_positive(raw: &str, key: &'static str) -> ConfigResult<usize> {
    match raw.parse::<usize>() {
        Ok(0) => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// A property name that can be spliced into Cypher without quoting.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
