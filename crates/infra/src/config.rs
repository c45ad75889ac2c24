//! Configuration loading and representation.
//!
//! Each binary gets one config struct. Values come from serialized defaults,
//! overridden by environment variables (`POVIEW_API_*` / `POVIEW_WEB_*`). The API
//! also honours a bare `DATABASE_URL`.

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// Settings for the read API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub bind_addr: String,
    /// Postgres connection string. When absent the API serves the in-memory demo store.
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Apply the bundled schema on startup (Postgres only).
    pub apply_schema: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3100".to_string(),
            database_url: None,
            max_connections: 5,
            apply_schema: false,
        }
    }
}

impl ApiConfig {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::raw().only(&["DATABASE_URL"]))
            .merge(Env::prefixed("POVIEW_API_"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::figment().extract()?)
    }
}

/// Settings for the server-rendered front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebConfig {
    pub bind_addr: String,
    /// Base URL of the read API; the list lives at `{api_url}/api/purchase-orders`.
    pub api_url: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:4200".to_string(),
            api_url: "http://localhost:3100".to_string(),
        }
    }
}

impl WebConfig {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed("POVIEW_WEB_"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::figment().extract()?)
    }
}
