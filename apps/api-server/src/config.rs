//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use quill_core::domain::Caller;
use quill_core::{ServiceConfig, UpdatePolicy};
use quill_infra::database::DatabaseConfig;

/// Configuration errors, reported at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} is required when {reason}")]
    Missing { key: &'static str, reason: &'static str },

    #[error("invalid value `{value}` for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Where posts are persisted.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    Memory,
    File(PathBuf),
    Postgres(DatabaseConfig),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreConfig,
    pub service: ServiceConfig,
    /// The single identity every request acts as.
    pub caller: Caller,
    pub graphiql: bool,
    pub seed_demo_posts: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = match lookup("STORE")
            .unwrap_or_else(|| "file".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StoreConfig::Memory,
            "file" => StoreConfig::File(
                lookup("DB_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("db.json")),
            ),
            "postgres" => {
                let url = lookup("DATABASE_URL").ok_or(ConfigError::Missing {
                    key: "DATABASE_URL",
                    reason: "STORE=postgres",
                })?;
                StoreConfig::Postgres(DatabaseConfig {
                    max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
                    min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 1)?,
                    connect_timeout: Duration::from_secs(parse_or(
                        &lookup,
                        "DB_CONNECT_TIMEOUT_SECS",
                        10,
                    )?),
                    ..DatabaseConfig::new(url)
                })
            }
            other => {
                return Err(ConfigError::Invalid {
                    key: "STORE",
                    value: other.to_string(),
                    reason: "expected memory, file or postgres".to_string(),
                });
            }
        };

        let home_page_size = parse_or(&lookup, "HOME_PAGE_SIZE", 10u64)?;
        if home_page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "HOME_PAGE_SIZE",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 4000)?,
            store,
            service: ServiceConfig {
                home_page_size,
                update_policy: parse_or(&lookup, "UPDATE_POLICY", UpdatePolicy::Upsert)?,
            },
            caller: Caller::new(
                lookup("OWNER_ID").unwrap_or_else(|| "owner".to_string()),
                lookup("AUTHOR_NAME").unwrap_or_else(|| "Anonymous".to_string()),
            ),
            graphiql: parse_flag(&lookup, "GRAPHIQL", true),
            seed_demo_posts: parse_flag(&lookup, "SEED_DEMO_POSTS", false),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value,
            reason: e.to_string(),
        }),
    }
}

fn parse_flag<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes" | "on"))
        .unwrap_or(default)
}
