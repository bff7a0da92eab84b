//! Integration tests for the server configuration builder.

use creational_patterns::builder::{LogLevel, ServerConfig, ServerConfigBuilder, ValidationError};
use std::time::Duration;

#[test]
fn test_minimal_config() {
    let config = ServerConfigBuilder::new()
        .host("localhost")
        .port(8080)
        .build()
        .unwrap();

    assert_eq!(config.host(), "localhost");
    assert_eq!(config.port(), 8080);
    assert!(!config.ssl());
    assert_eq!(config.timeout(), Duration::from_secs(30));
    assert_eq!(config.max_connections(), 100);
    assert_eq!(config.log_level(), LogLevel::Info);
}

#[test]
fn test_full_config() {
    let config = ServerConfigBuilder::new()
        .host("api.example.com")
        .port(443)
        .enable_ssl(true)
        .timeout(Duration::from_secs(60))
        .max_connections(1000)
        .read_timeout(Duration::from_secs(30))
        .write_timeout(Duration::from_secs(30))
        .database_url("postgresql://localhost:5432/mydb")
        .enable_cache(true)
        .log_level("debug")
        .build()
        .unwrap();

    assert_eq!(config.host(), "api.example.com");
    assert_eq!(config.port(), 443);
    assert!(config.ssl());
    assert_eq!(config.timeout(), Duration::from_secs(60));
    assert_eq!(config.max_connections(), 1000);
    assert_eq!(config.read_timeout(), Duration::from_secs(30));
    assert_eq!(config.write_timeout(), Duration::from_secs(30));
    assert_eq!(
        config.database_url(),
        Some("postgresql://localhost:5432/mydb")
    );
    assert!(config.cache_enabled());
    assert_eq!(config.log_level(), LogLevel::Debug);
}

#[test]
fn test_partial_config_keeps_other_defaults() {
    let config = ServerConfig::builder()
        .host("staging.example.com")
        .port(3000)
        .enable_ssl(true)
        .log_level("warn")
        .build()
        .unwrap();

    assert!(config.ssl());
    assert_eq!(config.log_level(), LogLevel::Warn);
    assert_eq!(config.timeout(), Duration::from_secs(30));
    assert!(!config.cache_enabled());
}

#[test]
fn test_missing_host() {
    let err = ServerConfigBuilder::new().port(8080).build().unwrap_err();

    assert_eq!(
        err,
        ValidationError {
            field: "host",
            message: "host is required".to_string(),
        }
    );
}

#[test]
fn test_invalid_port() {
    let err = ServerConfigBuilder::new()
        .host("localhost")
        .port(99999)
        .build()
        .unwrap_err();

    assert_eq!(err.field, "port");
    assert_eq!(err.to_string(), "port: port must be between 1 and 65535");
}

#[test]
fn test_invalid_log_level() {
    let err = ServerConfigBuilder::new()
        .host("localhost")
        .port(8080)
        .log_level("invalid")
        .build()
        .unwrap_err();

    assert_eq!(err.field, "log_level");
    assert!(err.message.contains("debug, info, warn, error"));
}

#[test]
fn test_retry_after_correction() {
    let mut builder = ServerConfigBuilder::new();
    builder.host("localhost").port(99999);
    assert!(builder.build().is_err());

    builder.port(9090);
    assert_eq!(builder.build().unwrap().port(), 9090);
}
