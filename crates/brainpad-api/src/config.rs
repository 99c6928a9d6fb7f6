//! Server configuration read from the environment.

use std::str::FromStr;

use axum::http::HeaderValue;
use thiserror::Error;

use brainpad_core::defaults;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid STORE_BACKEND '{0}' (expected 'postgres' or 'memory')")]
    InvalidBackend(String),

    #[error("Invalid value for {name}: '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Where notes are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Process-local store, lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::InvalidBackend(other.to_string())),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

/// Logging settings (`LOG_FORMAT`, `LOG_FILE`, `LOG_ANSI`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub file: Option<String>,
    /// `None` leaves ANSI detection to the subscriber.
    pub ansi: Option<bool>,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            format: get("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
            file: get("LOG_FILE").filter(|v| !v.is_empty()),
            ansi: get("LOG_ANSI").map(|v| v == "true" || v == "1"),
        }
    }
}

/// HTTP layer settings.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub allowed_origins: Vec<HeaderValue>,
    pub body_limit_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            allowed_origins: parse_allowed_origins(defaults::ALLOWED_ORIGINS),
            body_limit_bytes: defaults::REQUEST_BODY_LIMIT_BYTES,
        }
    }
}

/// Full server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub store: StoreBackend,
    pub http: HttpConfig,
    pub log: LogConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store = match get("STORE_BACKEND") {
            Some(v) if !v.trim().is_empty() => v.parse()?,
            _ => StoreBackend::default(),
        };
        let origins = get("ALLOWED_ORIGINS").unwrap_or_else(|| defaults::ALLOWED_ORIGINS.into());

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| defaults::SERVER_HOST.to_string()),
            port: parse_number(&get, "PORT", defaults::SERVER_PORT)?,
            database_url: get("DATABASE_URL").unwrap_or_else(|| defaults::DATABASE_URL.to_string()),
            db_max_connections: parse_number(
                &get,
                "DB_MAX_CONNECTIONS",
                defaults::DB_MAX_CONNECTIONS,
            )?,
            db_acquire_timeout_secs: parse_number(
                &get,
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults::DB_ACQUIRE_TIMEOUT_SECS,
            )?,
            store,
            http: HttpConfig {
                allowed_origins: parse_allowed_origins(&origins),
                body_limit_bytes: parse_number(
                    &get,
                    "REQUEST_BODY_LIMIT_BYTES",
                    defaults::REQUEST_BODY_LIMIT_BYTES,
                )?,
            },
            log: LogConfig::from_lookup(&get),
        })
    }

    /// `host:port` for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match get(name) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        _ => Ok(default),
    }
}

/// Split a comma-separated origin list, skipping blanks and invalid entries.
///
/// An entirely blank list falls back to the defaults.
pub fn parse_allowed_origins(origins: &str) -> Vec<HeaderValue> {
    let source = if origins.trim().is_empty() {
        defaults::ALLOWED_ORIGINS
    } else {
        origins
    };

    source
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.store, StoreBackend::Postgres);
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.db_acquire_timeout_secs, 30);
        assert_eq!(config.http.body_limit_bytes, 1024 * 1024);
        assert_eq!(config.http.allowed_origins.len(), 2);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("STORE_BACKEND", "Memory"),
            ("ALLOWED_ORIGINS", "https://a.example"),
            ("LOG_FORMAT", "JSON"),
            ("LOG_ANSI", "false"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.db_max_connections, 4);
        assert_eq!(config.db_acquire_timeout_secs, 5);
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.http.allowed_origins, vec!["https://a.example"]);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.ansi, Some(false));
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                name: "PORT",
                value: "http".into()
            }
        );
    }

    #[test]
    fn test_invalid_backend_is_an_error() {
        assert!(matches!(
            "sqlite".parse::<StoreBackend>(),
            Err(ConfigError::InvalidBackend(_))
        ));
    }

    #[test]
    fn test_parse_allowed_origins_skips_blanks_and_invalid() {
        let origins = parse_allowed_origins("http://a.test, ,http://b.test,bad\norigin");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_parse_allowed_origins_blank_uses_defaults() {
        assert_eq!(parse_allowed_origins("  ").len(), 2);
    }
}
