//! # Creational Patterns
//!
//! Singleton, Factory and Builder, each usable on its own.
//!
//! The centre of the crate is [`LazySingleton`]: a value that creates its resource on
//! first access, runs the initializer at most once even under concurrent first
//! access, and hands every caller the same `Arc<T>`. A failed initializer poisons it
//! for good.
//!
//! ## Quick Start
//!
//! ```rust
//! use creational_patterns::{database::DatabaseConnection, LazySingleton};
//! use std::sync::Arc;
//!
//! let registry: LazySingleton<DatabaseConnection> = LazySingleton::new();
//!
//! let db1 = registry.get_or_init(DatabaseConnection::with_defaults).unwrap();
//! let db2 = registry.get_or_init(DatabaseConnection::with_defaults).unwrap();
//!
//! assert!(Arc::ptr_eq(&db1, &db2));
//! ```
//!
//! ## Features
//!
//! - **Thread-safe**: waiters block on a condition variable, never spin
//! - **Poisoning**: a failing or panicking initializer is reported identically to every caller
//! - **Explicit or global**: use a `LazySingleton` value, a `static`, the [`Singleton`] trait
//!   or [`define_singleton!`]
//! - **Tracing support**: optional per-singleton callback plus `log` records
//!
//! ## Modules
//!
//! - [`database`] - a simulated connection to use as a singleton resource
//! - [`factory`] - payment processors built from a closed set of methods
//! - [`builder`] - fluent, validating builder for a server configuration

mod lazy_singleton;
mod macros;
mod singleton_error;
mod singleton_event;
mod singleton_trait;

pub mod builder;
pub mod database;
pub mod factory;

pub use lazy_singleton::{InitState, LazySingleton, TraceCallback};
pub use singleton_error::SingletonError;
pub use singleton_event::SingletonEvent;
pub use singleton_trait::Singleton;
