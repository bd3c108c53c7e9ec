//! # configs
//!
//! Layered runtime configuration. Values come from an optional
//! `config/default` file, then `APP__`-prefixed environment variables
//! (`__` separates sections, e.g. `APP__SERVER__PORT=8080`), so
//! deployments always win over files.

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection string; `mode=rwc` creates the file on first run.
    #[serde(default = "default_db_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Loads configuration. A missing file source is fine; the defaults
    /// above cover a bare environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;
        let config: Self = config.try_deserialize()?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_db_url() -> String {
    "sqlite:issues.db?mode=rwc".to_string()
}
