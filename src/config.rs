//! Server configuration loaded from environment variables (and `.env` via dotenvy in main).

use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/submissions";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// Largest accepted request body; bigger bodies get 413.
    pub body_limit_bytes: usize,
    /// Create the target database on startup when it does not exist.
    pub ensure_database: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            database_url: DEFAULT_DATABASE_URL.into(),
            host: "0.0.0.0".into(),
            port: 3000,
            max_connections: 5,
            body_limit_bytes: 64 * 1024,
            ensure_database: true,
        }
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidVar { var, value: raw }),
        Err(_) => Ok(default),
    }
}

impl ServerConfig {
    /// | Env var              | Default                            |
    /// |----------------------|------------------------------------|
    /// | `DATABASE_URL`       | `postgres://localhost/submissions` |
    /// | `HOST`               | `0.0.0.0`                          |
    /// | `PORT`               | `3000`                             |
    /// | `DB_MAX_CONNECTIONS` | `5`                                |
    /// | `BODY_LIMIT_BYTES`   | `65536`                            |
    /// | `ENSURE_DATABASE`    | `true`                             |
    pub fn from_env() -> Result<Self, ConfigError> {
        let d = ServerConfig::default();
        Ok(ServerConfig {
            database_url: std::env::var("DATABASE_URL").unwrap_or(d.database_url),
            host: std::env::var("HOST").unwrap_or(d.host),
            port: parse_var("PORT", d.port)?,
            max_connections: parse_var("DB_MAX_CONNECTIONS", d.max_connections)?,
            body_limit_bytes: parse_var("BODY_LIMIT_BYTES", d.body_limit_bytes)?,
            ensure_database: parse_var("ENSURE_DATABASE", d.ensure_database)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
