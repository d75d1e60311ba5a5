//! config

mod state;

pub use state::*;

use std::path::Path;
use std::time::Duration;

use crate::repo::sea::TotalStrategy;
use crate::service::ListingConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(rename = "db", default)]
    pub db_config: DbConfig,
    #[serde(default)]
    pub listing: ListingSection,
    #[serde(rename = "tracing")]
    pub tracing: Option<TracingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub enum Db {
    #[serde(rename = "mysql")]
    Mysql(RemoteDbConfig),
    #[serde(rename = "postgres")]
    Postgres(RemoteDbConfig),
    #[serde(rename = "sqlite")]
    Sqlite(SqliteConfig),
}

impl Default for Db {
    fn default() -> Self {
        Db::Sqlite(SqliteConfig {
            path: "shelter.sqlite".to_string(),
        })
    }
}

impl Db {
    pub fn connect_url(&self) -> String {
        match self {
            Db::Mysql(c) => c.connect_url("mysql"),
            Db::Postgres(c) => c.connect_url("postgres"),
            Db::Sqlite(c) => c.connect_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    #[serde(default)]
    pub backend: Db,
    /// Create missing tables from the entities at startup.
    #[serde(default)]
    pub sync_schema: bool,
    #[serde(default)]
    pub max_connections: Option<u32>,
    #[serde(default = "_default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: Db::default(),
            sync_schema: false,
            max_connections: None,
            acquire_timeout_secs: _default_acquire_timeout_secs(),
        }
    }
}

const fn _default_acquire_timeout_secs() -> u64 {
    3
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub addr: String,
    pub port: String,
}

impl ServerConfig {
    pub fn url(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TracingConfig {
    pub filter: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ListingSection {
    #[serde(default = "_default_query_timeout_ms")]
    pub query_timeout_ms: u64,
    #[serde(default)]
    pub total_strategy: TotalStrategy,
}

impl Default for ListingSection {
    fn default() -> Self {
        Self {
            query_timeout_ms: _default_query_timeout_ms(),
            total_strategy: TotalStrategy::default(),
        }
    }
}

const fn _default_query_timeout_ms() -> u64 {
    3000
}

impl From<ListingSection> for ListingConfig {
    fn from(section: ListingSection) -> Self {
        ListingConfig {
            query_timeout: Duration::from_millis(section.query_timeout_ms),
            total_strategy: section.total_strategy,
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RemoteDbConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl RemoteDbConfig {
    pub fn connect_url(&self, scheme: &str) -> String {
        format!(
            "{}://{}:{}@{}/{}",
            scheme, self.username, self.password, self.host, self.database
        )
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SqliteConfig {
    pub path: String,
}

impl SqliteConfig {
    pub fn connect_url(&self) -> String {
        if self.path == ":memory:" {
            return "sqlite::memory:".to_string();
        }
        format!("sqlite://{}?mode=rwc", self.path)
    }
}

pub fn parse_config_str(data: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(data)?)
}

pub async fn parse_config(path: &Path) -> Result<AppConfig, ConfigError> {
    tracing::debug!("parse config from path: {}", path.display());
    let data = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
    let config = parse_config_str(&data)?;
    info!(
        server = %config.server.url(),
        sync_schema = config.db_config.sync_schema,
        "config loaded"
    );
    Ok(config)
}
