//! Fluent builder for [`ServerConfig`].
//!
//! [`ServerConfigBuilder`] is a staging area: setters mutate it in place and return
//! it for chaining, and [`ServerConfigBuilder::build`] validates the staged values
//! and freezes them into a separate `ServerConfig` that has no setters at all.
//!
//! ```
//! use creational_patterns::builder::{LogLevel, ServerConfigBuilder};
//! use std::time::Duration;
//!
//! let config = ServerConfigBuilder::new()
//!     .host("api.example.com")
//!     .port(443)
//!     .enable_ssl(true)
//!     .timeout(Duration::from_secs(60))
//!     .log_level("debug")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.port(), 443);
//! assert_eq!(config.log_level(), LogLevel::Debug);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PORT: u32 = 8080;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_CONNECTIONS: u32 = 100;
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// A staged value was missing or out of range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ValidationError;

    fn from_str(level: &str) -> Result<Self, Self::Err> {
        match level {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ValidationError::new(
                "log_level",
                "log level must be one of: debug, info, warn, error",
            )),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

/// Validated, immutable server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    host: String,
    port: u16,
    ssl: bool,
    timeout: Duration,
    max_connections: u32,
    read_timeout: Duration,
    write_timeout: Duration,
    database_url: Option<String>,
    cache_enabled: bool,
    log_level: LogLevel,
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::new()
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn ssl(&self) -> bool {
        self.ssl
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    pub fn write_timeout(&self) -> Duration {
        self.write_timeout
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }
}

/// Staging structure for a [`ServerConfig`].
///
/// Ports and log levels are staged unvalidated (any `u32`, any string) so that
/// `build` is the single place that rejects them.
#[derive(Debug, Clone)]
pub struct ServerConfigBuilder {
    host: String,
    port: u32,
    ssl: bool,
    timeout: Duration,
    max_connections: u32,
    read_timeout: Duration,
    write_timeout: Duration,
    database_url: Option<String>,
    cache_enabled: bool,
    log_level: String,
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            ssl: false,
            timeout: DEFAULT_TIMEOUT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            read_timeout: DEFAULT_IO_TIMEOUT,
            write_timeout: DEFAULT_IO_TIMEOUT,
            database_url: None,
            cache_enabled: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ServerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required.
    pub fn host(&mut self, host: impl Into<String>) -> &mut Self {
        self.host = host.into();
        self
    }

    /// Must be within 1..=65535.
    pub fn port(&mut self, port: u32) -> &mut Self {
        self.port = port;
        self
    }

    pub fn enable_ssl(&mut self, enable: bool) -> &mut Self {
        self.ssl = enable;
        self
    }

    pub fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    pub fn max_connections(&mut self, max: u32) -> &mut Self {
        self.max_connections = max;
        self
    }

    pub fn read_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.read_timeout = timeout;
        self
    }

    pub fn write_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.write_timeout = timeout;
        self
    }

    pub fn database_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn enable_cache(&mut self, enable: bool) -> &mut Self {
        self.cache_enabled = enable;
        self
    }

    /// One of `debug`, `info`, `warn`, `error`.
    pub fn log_level(&mut self, level: impl Into<String>) -> &mut Self {
        self.log_level = level.into();
        self
    }

    /// Validates the staged values and produces the final configuration.
    ///
    /// The builder is left untouched and may be adjusted and built again.
    ///
    /// # Errors
    ///
    /// A [`ValidationError`] naming the first offending field, checked in the order
    /// `host`, `port`, `log_level`.
    pub fn build(&self) -> Result<ServerConfig, ValidationError> {
        if self.host.is_empty() {
            return Err(ValidationError::new("host", "host is required"));
        }

        let port = u16::try_from(self.port)
            .ok()
            .filter(|port| *port != 0)
            .ok_or_else(|| ValidationError::new("port", "port must be between 1 and 65535"))?;

        let log_level = self.log_level.parse::<LogLevel>()?;

        let config = ServerConfig {
            host: self.host.clone(),
            port,
            ssl: self.ssl,
            timeout: self.timeout,
            max_connections: self.max_connections,
            read_timeout: self.read_timeout,
            write_timeout: self.write_timeout,
            database_url: self.database_url.clone(),
            cache_enabled: self.cache_enabled,
            log_level,
        };

        log::debug!("built server config for {}:{}", config.host, config.port);
        Ok(config)
    }
}
