use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub signage: SignageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
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

fn default_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Database configuration (queue definitions only; assignments live in memory)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("queueboard.db")
}

/// Digital signage push channel configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignageConfig {
    /// Seconds between WebSocket heartbeats (default: 30)
    #[serde(default = "default_heartbeat_secs")]
    pub heartbeat_secs: u64,
    /// Buffered updates per subscriber before it is considered lagging (default: 256)
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for SignageConfig {
    fn default() -> Self {
        Self {
            heartbeat_secs: default_heartbeat_secs(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_heartbeat_secs() -> u64 {
    30
}

fn default_channel_capacity() -> usize {
    256
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Config as exposed over the API
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub database: SanitizedDatabaseConfig,
    pub signage: SignageConfig,
    pub logging: LoggingConfig,
}

/// Database config without the on-disk location
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedDatabaseConfig {
    pub configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            database: SanitizedDatabaseConfig {
                configured: !config.database.path.as_os_str().is_empty(),
            },
            signage: config.signage.clone(),
            logging: config.logging.clone(),
        }
    }
}
