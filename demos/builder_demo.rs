//! Builder walkthrough.
//!
//! Demonstrates:
//! - A minimal configuration relying on defaults
//! - A fully specified configuration
//! - Validation of host, port and log level
//!
//! Run with: `cargo run --example builder_demo`

#[path = "common/mod.rs"]
mod common;

use creational_patterns::builder::{ServerConfig, ServerConfigBuilder};
use std::time::Duration;

fn print_config(config: &ServerConfig) {
    println!("   Host: {}", config.host());
    println!("   Port: {}", config.port());
    println!("   SSL: {}", config.ssl());
    println!("   Timeout: {:?}", config.timeout());
    println!("   Max Connections: {}", config.max_connections());
    println!(
        "   Database URL: {}",
        config.database_url().unwrap_or("(none)")
    );
    println!("   Cache Enabled: {}", config.cache_enabled());
    println!("   Log Level: {}", config.log_level());
}

fn main() {
    common::init_logger();

    println!("=== Builder Pattern Demo ===\n");

    // -------------------------------------------------------------------------
    // 1. Minimal
    // -------------------------------------------------------------------------
    println!("1. Building a minimal server config:");

    match ServerConfigBuilder::new().host("localhost").port(8080).build() {
        Ok(config) => {
            println!(
                "   Host: {}, Port: {}, SSL: {}",
                config.host(),
                config.port(),
                config.ssl()
            );
            println!("   ✓ Only set what we need, defaults applied for the rest");
        }
        Err(err) => println!("   Error: {err}"),
    }

    // -------------------------------------------------------------------------
    // 2. Full
    // -------------------------------------------------------------------------
    println!("\n2. Building a full-featured server config:");

    let full = ServerConfigBuilder::new()
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
        .build();

    match full {
        Ok(config) => {
            print_config(&config);
            println!("   ✓ Readable, step-by-step construction");
        }
        Err(err) => println!("   Error: {err}"),
    }

    // -------------------------------------------------------------------------
    // 3. Partial
    // -------------------------------------------------------------------------
    println!("\n3. Building a config with some custom settings:");

    match ServerConfig::builder()
        .host("staging.example.com")
        .port(3000)
        .enable_ssl(true)
        .log_level("warn")
        .build()
    {
        Ok(config) => {
            println!(
                "   Host: {}, Port: {}, SSL: {}, Log Level: {}",
                config.host(),
                config.port(),
                config.ssl(),
                config.log_level()
            );
            println!("   Timeout (default): {:?}", config.timeout());
            println!("   ✓ Mix of custom and default values");
        }
        Err(err) => println!("   Error: {err}"),
    }

    // -------------------------------------------------------------------------
    // 4. Validation
    // -------------------------------------------------------------------------
    println!("\n4. Demonstrating validation:");

    if let Err(err) = ServerConfigBuilder::new().port(8080).build() {
        println!("   ✓ Validation caught missing host: {err}");
    }

    if let Err(err) = ServerConfigBuilder::new().host("localhost").port(99999).build() {
        println!("   ✓ Validation caught invalid port: {err}");
    }

    if let Err(err) = ServerConfigBuilder::new()
        .host("localhost")
        .port(8080)
        .log_level("invalid")
        .build()
    {
        println!("   ✓ Validation caught invalid log level: {err}");
    }
}
