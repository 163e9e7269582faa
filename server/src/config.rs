//! Process configuration, read from flags or the environment.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Memory,
    Mongo,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", version, about = "Todo REST API")]
pub struct Config {
    /// Interface to bind.
    #[arg(long, env = "TODO_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Storage backend.
    #[arg(long, env = "TODO_STORE", value_enum, default_value_t = StoreKind::Mongo)]
    pub store: StoreKind,

    /// MongoDB connection string; required with `--store mongo`.
    #[arg(long, env = "MONGO_URI", hide_env_values = true)]
    pub mongo_uri: Option<String>,

    #[arg(long, env = "MONGO_DATABASE", default_value = "GO")]
    pub database: String,

    #[arg(long, env = "MONGO_COLLECTION", default_value = "todos")]
    pub collection: String,

    /// Upper bound on each store round trip, in seconds.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("MONGO_URI not found in environment variables")]
    MissingMongoUri,
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
    #[error("invalid listen address {0}")]
    InvalidAddress(String),
}

impl Config {
    /// Reject combinations clap cannot express on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.store == StoreKind::Mongo && self.mongo_uri.as_deref().unwrap_or("").is_empty() {
            return Err(ConfigError::MissingMongoUri);
        }
        self.listen_addr().map(|_| ())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }
}

/// Load `path` into the process environment. A missing file is not an error
/// and yields `Ok(false)`; a file that exists but fails to parse is.
pub fn load_env_file(path: &Path) -> Result<bool, dotenvy::Error> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(err) if err.not_found() => Ok(false),
        Err(err) => Err(err),
    }
}
