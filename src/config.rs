//! Service configuration.
//!
//! Everything is read once at startup. `from_env` loads `.env` through
//! dotenvy and then defers to `from_lookup`, which tests drive with a map.

use std::net::SocketAddr;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Default share of recovered MEV paid to liquidity providers
pub const DEFAULT_LP_SHARE: Decimal = dec!(0.85);
pub const DEFAULT_SUMMARY_WINDOW_HOURS: i64 = 24;
pub const DEFAULT_RECENT_AUCTIONS_LIMIT: usize = 10;
const MAX_RECENT_AUCTIONS_LIMIT: usize = 100;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

fn invalid(key: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        message: message.into(),
    }
}

/// Which record store backs the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    /// Non-persistent, for local runs and tests
    Memory,
}

/// Aggregation and listing policy shared with every handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Fraction of recovered MEV attributed to LPs, in [0, 1]
    pub lp_share: Decimal,
    /// Recency window for the auction summary
    pub summary_window: chrono::Duration,
    /// Page size of the recent auctions listing
    pub recent_auctions_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            lp_share: DEFAULT_LP_SHARE,
            summary_window: chrono::Duration::hours(DEFAULT_SUMMARY_WINDOW_HOURS),
            recent_auctions_limit: DEFAULT_RECENT_AUCTIONS_LIMIT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    /// Allowed CORS origins; "*" allows any
    pub cors_origins: Vec<String>,
    pub service: ServiceConfig,
}

impl AppConfig {
    /// Load configuration from the process environment and `.env`
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| invalid("BIND_ADDR", e.to_string()))?;

        let store = match get("STORE_BACKEND").as_deref().unwrap_or("postgres") {
            "postgres" => StoreBackend::Postgres {
                database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(invalid(
                    "STORE_BACKEND",
                    format!("'{}', expected 'postgres' or 'memory'", other),
                ))
            }
        };

        let cors_origins = get("CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec!["*".to_string()]);

        let lp_share = match get("LP_SHARE") {
            Some(raw) => Decimal::from_str(&raw).map_err(|e| invalid("LP_SHARE", e.to_string()))?,
            None => DEFAULT_LP_SHARE,
        };
        if lp_share < Decimal::ZERO || lp_share > Decimal::ONE {
            return Err(invalid("LP_SHARE", format!("{} is outside [0, 1]", lp_share)));
        }

        let window_hours = match get("SUMMARY_WINDOW_HOURS") {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|e| invalid("SUMMARY_WINDOW_HOURS", e.to_string()))?,
            None => DEFAULT_SUMMARY_WINDOW_HOURS,
        };
        // Upper bound keeps chrono::Duration::hours from overflowing
        if !(1..=24 * 365 * 100).contains(&window_hours) {
            return Err(invalid("SUMMARY_WINDOW_HOURS", "must be a positive number of hours"));
        }

        let recent_auctions_limit = match get("RECENT_AUCTIONS_LIMIT") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| invalid("RECENT_AUCTIONS_LIMIT", e.to_string()))?,
            None => DEFAULT_RECENT_AUCTIONS_LIMIT,
        };
        if !(1..=MAX_RECENT_AUCTIONS_LIMIT).contains(&recent_auctions_limit) {
            return Err(invalid(
                "RECENT_AUCTIONS_LIMIT",
                format!("must be between 1 and {}", MAX_RECENT_AUCTIONS_LIMIT),
            ));
        }

        Ok(Self {
            bind_addr,
            store,
            cors_origins,
            service: ServiceConfig {
                lp_share,
                summary_window: chrono::Duration::hours(window_hours),
                recent_auctions_limit,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_memory_backend() {
        let config = load(&[("STORE_BACKEND", "memory")]).unwrap();

        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.bind_addr.port(), 8001);
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
        assert_eq!(config.service, ServiceConfig::default());
    }

    #[test]
    fn test_postgres_requires_database_url() {
        assert!(matches!(load(&[]), Err(ConfigError::Missing("DATABASE_URL"))));

        let config = load(&[("DATABASE_URL", "postgresql://localhost/eigenlvr")]).unwrap();
        assert_eq!(
            config.store,
            StoreBackend::Postgres {
                database_url: "postgresql://localhost/eigenlvr".to_string()
            }
        );
    }

    #[test]
    fn test_lp_share_bounds() {
        let ok = load(&[("STORE_BACKEND", "memory"), ("LP_SHARE", "0.9")]).unwrap();
        assert_eq!(ok.service.lp_share, dec!(0.9));

        assert!(load(&[("STORE_BACKEND", "memory"), ("LP_SHARE", "1.2")]).is_err());
        assert!(load(&[("STORE_BACKEND", "memory"), ("LP_SHARE", "-0.1")]).is_err());
        assert!(load(&[("STORE_BACKEND", "memory"), ("LP_SHARE", "abc")]).is_err());
    }

    #[test]
    fn test_cors_origins_split() {
        let config = load(&[
            ("STORE_BACKEND", "memory"),
            ("CORS_ORIGINS", "https://app.example.com, http://localhost:3000,"),
        ])
        .unwrap();
        assert_eq!(
            config.cors_origins,
            vec![
                "https://app.example.com".to_string(),
                "http://localhost:3000".to_string()
            ]
        );
    }

    #[test]
    fn test_rejects_bad_limits() {
        assert!(load(&[("STORE_BACKEND", "memory"), ("RECENT_AUCTIONS_LIMIT", "0")]).is_err());
        assert!(load(&[("STORE_BACKEND", "memory"), ("SUMMARY_WINDOW_HOURS", "-5")]).is_err());
        assert!(load(&[("STORE_BACKEND", "sqlite")]).is_err());
    }
}
