//! Configuration loading and representation.
//!
//! Everything comes from environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BIND_ADDR` | `0.0.0.0:8080` | HTTP listen address |
//! | `USE_PERSISTENT_STORES` | `false` | Postgres store instead of in-memory |
//! | `DATABASE_URL` | none | Required when persistent stores are enabled |
//! | `DATABASE_MAX_CONNECTIONS` | `5` | Pool size |
//! | `STATUS_POLICY` | `legacy` | `legacy` (every failure is 500) or `precise` (422/404/500) |

use core::str::FromStr;
use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be set: {reason}")]
    Missing { key: &'static str, reason: &'static str },

    #[error("invalid value for {key} ({value:?}): {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// How operation failures are mapped onto HTTP statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Every failure is a 500 with the operation's fixed message.
    #[default]
    Legacy,
    /// Validation → 422 (with field errors), not found → 404, storage → 500.
    Precise,
}

impl FromStr for StatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "precise" => Ok(Self::Precise),
            other => Err(format!("expected `legacy` or `precise`, got `{other}`")),
        }
    }
}

/// Where products are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    InMemory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
    pub status_policy: StatusPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            store: StoreConfig::InMemory,
            status_policy: StatusPolicy::Legacy,
        }
    }
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (tests pass a map instead of touching the
    /// process environment).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_raw.clone(),
            reason: e.to_string(),
        })?;

        let persistent_raw = lookup("USE_PERSISTENT_STORES").unwrap_or_else(|| "false".to_string());
        let persistent = persistent_raw
            .trim()
            .parse::<bool>()
            .map_err(|e| ConfigError::Invalid {
                key: "USE_PERSISTENT_STORES",
                value: persistent_raw.clone(),
                reason: e.to_string(),
            })?;

        let store = if persistent {
            let database_url = lookup("DATABASE_URL")
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing {
                    key: "DATABASE_URL",
                    reason: "USE_PERSISTENT_STORES=true",
                })?;
            let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
                None => DEFAULT_MAX_CONNECTIONS,
                Some(raw) => match raw.trim().parse::<u32>() {
                    Ok(n) if n > 0 => n,
                    Ok(_) => {
                        return Err(ConfigError::Invalid {
                            key: "DATABASE_MAX_CONNECTIONS",
                            value: raw,
                            reason: "must be at least 1".to_string(),
                        });
                    }
                    Err(e) => {
                        return Err(ConfigError::Invalid {
                            key: "DATABASE_MAX_CONNECTIONS",
                            reason: e.to_string(),
                            value: raw,
                        });
                    }
                },
            };
            StoreConfig::Postgres {
                database_url,
                max_connections,
            }
        } else {
            StoreConfig::InMemory
        };

        let status_policy = match lookup("STATUS_POLICY") {
            None => StatusPolicy::default(),
            Some(raw) => raw.parse::<StatusPolicy>().map_err(|reason| ConfigError::Invalid {
                key: "STATUS_POLICY",
                value: raw.clone(),
                reason,
            })?,
        };

        Ok(Self {
            bind_addr,
            store,
            status_policy,
        })
    }
}
