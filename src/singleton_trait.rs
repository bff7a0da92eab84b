//! Core trait for types that own a process-wide lazy instance.
//!
//! This module provides the `Singleton` trait with default implementations for
//! first-access initialization and inspection of a type's single instance.
//!
//! Implementors only supply the `'static` cell holding the instance and the
//! initializer; `instance()` and friends come for free.

use std::sync::Arc;

use crate::{InitState, LazySingleton, SingletonError};

/// A type with exactly one lazily created, process-wide instance.
///
/// Provides default implementations for all access operations, requiring only
/// two methods (`cell` and `initialize`) to be implemented by the implementor.
///
/// # Examples
///
/// ```rust
/// use creational_patterns::{LazySingleton, Singleton};
/// use std::sync::Arc;
///
/// struct Settings {
///     name: String,
/// }
///
/// static SETTINGS: LazySingleton<Settings> = LazySingleton::new();
///
/// impl Singleton for Settings {
///     fn cell() -> &'static LazySingleton<Self> {
///         &SETTINGS
///     }
///
///     fn initialize() -> Result<Self, String> {
///         Ok(Settings { name: "demo".to_string() })
///     }
/// }
///
/// let a = Settings::instance().unwrap();
/// let b = Settings::instance().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(a.name, "demo");
/// ```
pub trait Singleton: Sized + Send + Sync + 'static {
    /// Access the cell holding this type's instance.
    fn cell() -> &'static LazySingleton<Self>;

    /// Build the instance. Runs at most once per process.
    ///
    /// # Errors
    ///
    /// Any error poisons the cell for the rest of the process.
    fn initialize() -> Result<Self, String>;

    /// The shared instance, created on first call.
    ///
    /// # Errors
    ///
    /// - [`SingletonError::InitializationFailure`] if `initialize` failed, now or earlier.
    fn instance() -> Result<Arc<Self>, SingletonError> {
        Self::cell().get_instance(Self::initialize)
    }

    /// The instance if it was already created; never initializes.
    fn existing() -> Option<Arc<Self>> {
        Self::cell().get()
    }

    /// Lifecycle state of the instance.
    fn init_state() -> InitState {
        Self::cell().state()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
