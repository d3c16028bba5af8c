// ABOUTME: Configuration loading for the alunos server.
// ABOUTME: Reads bind address, database path, and static asset directory from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_DB: &str = "database.db";
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ALUNOS_BIND is not a valid socket address: {0}")]
    InvalidBind(String),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
    pub public_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - ALUNOS_BIND: socket address to bind (default: 127.0.0.1:3000)
    /// - ALUNOS_DB: SQLite database file (default: ./database.db)
    /// - ALUNOS_PUBLIC_DIR: static front-end directory (default: ./public)
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_str = std::env::var("ALUNOS_BIND")
            .ok()
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = parse_bind(&bind_str)?;

        let db_path = std::env::var("ALUNOS_DB")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB));

        let public_dir = std::env::var("ALUNOS_PUBLIC_DIR")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR));

        Ok(Self {
            bind,
            db_path,
            public_dir,
        })
    }
}

/// Parse a socket address, reporting the offending text on failure.
pub fn parse_bind(value: &str) -> Result<SocketAddr, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidBind(value.to_string()))
}
