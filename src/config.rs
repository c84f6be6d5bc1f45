use std::time::Duration;

use thiserror::Error;

/// `DATABASE_URL` value that selects the in-process store.
pub const MEMORY_DATABASE_URL: &str = "memory:";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// | Env Var                    | Default                  |
/// |----------------------------|--------------------------|
/// | `DATABASE_URL`             | `sqlite://matakuliah.db` |
/// | `HOST`                     | `127.0.0.1`              |
/// | `PORT`                     | `3000`                   |
/// | `DATABASE_MAX_CONNECTIONS` | `5`                      |
/// | `REQUEST_TIMEOUT_SECS`     | `30`                     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| "sqlite://matakuliah.db".to_string());
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = number(&lookup, "PORT", 3000)?;
        let max_connections = number(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?;
        let request_timeout_secs = number(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;

        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}

fn number<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        None => Ok(default),
    }
}
