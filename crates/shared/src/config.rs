//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Object storage configuration.
    pub storage: StorageSettings,
    /// Directory to upload.
    pub source: SourceConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database host.
    #[serde(default = "default_db_host")]
    pub host: String,
    /// Database port.
    #[serde(default = "default_db_port")]
    pub port: u16,
    /// Database user.
    pub user: String,
    /// Database password.
    #[serde(default)]
    pub password: String,
    /// Database name.
    pub name: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

impl DatabaseConfig {
    /// Renders the PostgreSQL connection URL.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode=disable",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            self.name
        )
    }
}

/// S3-compatible object storage settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Service endpoint, also the base of public URLs.
    pub endpoint: String,
    /// Region name.
    #[serde(default = "default_region")]
    pub region: String,
    /// Target bucket.
    pub bucket: String,
    /// Access key ID.
    pub access_key: String,
    /// Secret access key.
    pub secret_key: String,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

/// Source directory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Root of the directory tree to walk.
    pub root: PathBuf,
}

impl AppConfig {
    /// Loads configuration from config files and `STOWAGE__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        sources()?.try_deserialize()
    }
}

impl DatabaseConfig {
    /// Loads only the `database` section, for tools that never touch storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the section is missing or malformed.
    pub fn load() -> Result<Self, config::ConfigError> {
        sources()?.get("database")
    }
}

fn sources() -> Result<config::Config, config::ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

    config::Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
        .add_source(
            config::Environment::with_prefix("STOWAGE")
                .separator("__")
                .try_parsing(true),
        )
        .build()
}
