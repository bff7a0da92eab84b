//! Macros for declaring process-wide lazy singletons.
//!
//! This module provides a macro-based way to get the classic `get_instance()`
//! ergonomics on top of an explicit [`LazySingleton`](crate::LazySingleton) cell.

/// Declares a module holding one process-wide lazy singleton.
///
/// The macro generates a module containing:
/// - A hidden `static` [`LazySingleton`](crate::LazySingleton) cell
/// - `instance()`, which creates the value on first call and shares it afterwards
/// - `get()`, `state()`, `cell()` and the tracing setters
///
/// Two forms are accepted: `init = f` for an infallible `FnOnce() -> T`, and
/// `try_init = f` for a `FnOnce() -> Result<T, E>` whose failure poisons the cell.
///
/// The generated module glob-imports its parent, so the type and initializer may
/// name items declared next to the invocation.
///
/// # Examples
///
/// ```rust
/// use creational_patterns::define_singleton;
/// use std::sync::Arc;
///
/// pub struct Greeter {
///     greeting: String,
/// }
///
/// fn make_greeter() -> Greeter {
///     Greeter { greeting: "Hello".to_string() }
/// }
///
/// define_singleton!(greeter: Greeter, init = make_greeter);
///
/// fn main() {
///     let a = greeter::instance().unwrap();
///     let b = greeter::instance().unwrap();
///
///     assert!(Arc::ptr_eq(&a, &b));
///     assert_eq!(a.greeting, "Hello");
/// }
/// ```
///
/// # Fallible Initialization
///
/// ```rust
/// use creational_patterns::{define_singleton, InitState};
///
/// define_singleton!(port: u16, try_init = || "not a port".parse::<u16>());
///
/// fn main() {
///     assert!(port::instance().is_err());
///     assert_eq!(port::state(), InitState::Poisoned);
/// }
/// ```
#[macro_export]
macro_rules! define_singleton {
    ($name:ident : $ty:ty, init = $init:expr) => {
        $crate::define_singleton!(@module $name, $ty, |cell: &$crate::LazySingleton<$ty>| {
            cell.get_or_init($init)
        });
    };

    ($name:ident : $ty:ty, try_init = $init:expr) => {
        $crate::define_singleton!(@module $name, $ty, |cell: &$crate::LazySingleton<$ty>| {
            cell.get_instance($init)
        });
    };

    (@module $name:ident, $ty:ty, $access:expr) => {
        pub mod $name {
            #[allow(unused_imports)]
            use super::*;
            use std::sync::Arc;

            // Cell holding the instance (module-private)
            static CELL: $crate::LazySingleton<$ty> = $crate::LazySingleton::new();

            /// The underlying cell, for APIs that take a `LazySingleton` directly.
            #[allow(dead_code)]
            pub fn cell() -> &'static $crate::LazySingleton<$ty> {
                &CELL
            }

            /// The shared instance, created on first call.
            #[allow(dead_code)]
            pub fn instance() -> Result<Arc<$ty>, $crate::SingletonError> {
                let access = $access;
                access(&CELL)
            }

            /// The instance if it was already created.
            #[allow(dead_code)]
            pub fn get() -> Option<Arc<$ty>> {
                CELL.get()
            }

            /// Lifecycle state of the instance.
            #[allow(dead_code)]
            pub fn state() -> $crate::InitState {
                CELL.state()
            }

            /// Set a tracing callback for this singleton.
            #[allow(dead_code)]
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::SingletonEvent) + Send + Sync + 'static,
            ) {
                CELL.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            #[allow(dead_code)]
            pub fn clear_trace_callback() {
                CELL.clear_trace_callback()
            }
        }
    };
}
