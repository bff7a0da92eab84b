//! A lazily created, thread-safe single instance with poison-on-failure semantics.
//!
//! [`LazySingleton`] is an ordinary value: construct one per resource, keep it in a
//! `static` when a process-wide instance is wanted, or create a fresh one per test.
//! The first caller of [`LazySingleton::get_instance`] runs the initializer while every
//! other concurrent caller blocks on a condition variable; all of them end up with the
//! same `Arc<T>`.
//!
//! # Examples
//!
//! ```
//! use creational_patterns::LazySingleton;
//! use std::sync::Arc;
//!
//! let registry: LazySingleton<String> = LazySingleton::new();
//!
//! let first = registry.get_or_init(|| "Hello".to_string()).unwrap();
//! let second = registry.get_or_init(|| unreachable!()).unwrap();
//!
//! assert!(Arc::ptr_eq(&first, &second));
//! ```

use std::{
    any::{type_name, Any},
    convert::Infallible,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Condvar, Mutex, MutexGuard, OnceLock,
    },
};

use crate::{SingletonError, SingletonEvent};

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `SingletonEvent` every time the singleton is
/// accessed. It must be thread-safe because the singleton itself is shared.
pub type TraceCallback = dyn Fn(&SingletonEvent) + Send + Sync + 'static;

/// Observable lifecycle of a [`LazySingleton`].
///
/// `Uninitialized -> InProgress -> {Completed | Poisoned}`. Both end states are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitState {
    Uninitialized,
    InProgress,
    Completed,
    Poisoned,
}

type Outcome<T> = Result<Arc<T>, SingletonError>;

/// Holds at most one instance of `T`, created on first access.
///
/// The initializer runs at most once per `LazySingleton`, no matter how many threads
/// race on the first access. A failed (or panicking) initializer poisons the
/// singleton: that caller and every later one receive the same
/// [`SingletonError::InitializationFailure`], and no retry is ever attempted.
///
/// Only the singleton's own state is synchronized. Mutations of `T` made through the
/// returned `Arc<T>` are the resource's responsibility.
pub struct LazySingleton<T> {
    /// Published outcome. Written once, under `initializing`, before waiters are woken.
    outcome: OnceLock<Outcome<T>>,

    /// `true` while some caller is running the initializer.
    initializing: Mutex<bool>,

    settled: Condvar,

    tracing: AtomicBool,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

impl<T> LazySingleton<T> {
    /// Creates an empty, uninitialized singleton.
    pub const fn new() -> Self {
        Self {
            outcome: OnceLock::new(),
            initializing: Mutex::new(false),
            settled: Condvar::new(),
            tracing: AtomicBool::new(false),
            trace: Mutex::new(None),
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for this singleton.
    ///
    /// The callback will be invoked for every access (start, completion, failure,
    /// waiting and hits on a published outcome).
    ///
    /// # Lock Poisoning Recovery
    ///
    /// If the trace lock is poisoned, this method automatically recovers by
    /// extracting the inner value. Trace operations are non-critical.
    pub fn set_trace_callback(&self, callback: impl Fn(&SingletonEvent) + Send + Sync + 'static) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
        self.tracing.store(true, Ordering::Release);
    }

    /// Clear the tracing callback.
    pub fn clear_trace_callback(&self) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
        self.tracing.store(false, Ordering::Release);
    }

    /// Invokes the tracing callback, if any.
    ///
    /// The callback is cloned out of the lock before it runs, so it may itself touch
    /// this singleton without deadlocking on the trace lock.
    ///
    /// # Panics
    ///
    /// Never. A panicking callback is caught and logged; it must not skip publishing
    /// an outcome or unwind into the caller that is initializing.
    fn emit_event(&self, event: impl FnOnce() -> SingletonEvent) {
        if !self.tracing.load(Ordering::Acquire) {
            return;
        }

        let callback = self
            .trace
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();

        if let Some(callback) = callback {
            let event = event();
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback(&event))) {
                log::warn!(
                    "trace callback panicked on `{event}`: {}",
                    panic_message(&*payload)
                );
            }
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------------------------------

    /// Returns the instance, running `init` if this is the first access.
    ///
    /// Exactly one caller ever runs an initializer. Callers that arrive while it is
    /// running block until it returns, then share its outcome. Once an outcome is
    /// published this is a single acquire load.
    ///
    /// If `init` returns an error or panics, the singleton is poisoned and the same
    /// error is returned to this and all future callers. A panic is caught and
    /// converted; it does not unwind into this caller or into any waiter.
    ///
    /// Calling `get_instance` on the same singleton from inside `init` blocks forever.
    ///
    /// # Errors
    ///
    /// - [`SingletonError::InitializationFailure`] if this singleton is poisoned.
    pub fn get_instance<E, F>(&self, init: F) -> Result<Arc<T>, SingletonError>
    where
        E: fmt::Display,
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(outcome) = self.outcome.get() {
            self.emit_event(|| SingletonEvent::Hit {
                type_name: type_name::<T>(),
                found: outcome.is_ok(),
            });
            return outcome.clone();
        }

        if let Some(outcome) = self.wait_for_turn() {
            return outcome;
        }

        self.run_initializer(init)
    }

    /// Infallible flavour of [`get_instance`](Self::get_instance).
    ///
    /// # Errors
    ///
    /// Still fails when the singleton is poisoned, either by an earlier fallible
    /// initializer or because `init` panicked.
    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> Result<Arc<T>, SingletonError> {
        self.get_instance(|| Ok::<T, Infallible>(init()))
    }

    /// Returns the instance if it has been created, without ever initializing.
    pub fn get(&self) -> Option<Arc<T>> {
        self.outcome.get()?.as_ref().ok().cloned()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> InitState {
        match self.outcome.get() {
            Some(Ok(_)) => InitState::Completed,
            Some(Err(_)) => InitState::Poisoned,
            None if *self.lock_gate() => InitState::InProgress,
            None => InitState::Uninitialized,
        }
    }

    /// `true` once an instance has been published.
    pub fn is_initialized(&self) -> bool {
        matches!(self.outcome.get(), Some(Ok(_)))
    }

    /// Slow path gate.
    ///
    /// Returns `Some(outcome)` when another caller already settled the singleton (or
    /// settled it while we were blocked), `None` when this caller has claimed the
    /// initializer and must run it.
    fn wait_for_turn(&self) -> Option<Outcome<T>> {
        let mut announced = false;
        let mut initializing = self.lock_gate();

        loop {
            if let Some(outcome) = self.outcome.get() {
                return Some(outcome.clone());
            }

            if !*initializing {
                *initializing = true;
                return None;
            }

            if !announced {
                announced = true;
                drop(initializing);

                log::debug!("waiting for {} to finish initializing", type_name::<T>());
                self.emit_event(|| SingletonEvent::Waiting {
                    type_name: type_name::<T>(),
                });

                initializing = self.lock_gate();
                continue;
            }

            initializing = self
                .settled
                .wait(initializing)
                .unwrap_or_else(|p| p.into_inner());
        }
    }

    fn run_initializer<E, F>(&self, init: F) -> Outcome<T>
    where
        E: fmt::Display,
        F: FnOnce() -> Result<T, E>,
    {
        self.emit_event(|| SingletonEvent::InitStarted {
            type_name: type_name::<T>(),
        });

        let outcome = match panic::catch_unwind(AssertUnwindSafe(init)) {
            Ok(Ok(value)) => Ok(Arc::new(value)),
            Ok(Err(err)) => Err(SingletonError::initialization_failure::<T>(err.to_string())),
            Err(payload) => Err(SingletonError::initialization_failure::<T>(format!(
                "initializer panicked: {}",
                panic_message(&*payload)
            ))),
        };

        {
            let mut initializing = self.lock_gate();
            // Only the caller that flipped `initializing` reaches this point.
            let _ = self.outcome.set(outcome.clone());
            *initializing = false;
            self.settled.notify_all();
        }

        match &outcome {
            Ok(_) => {
                log::info!("{} initialized", type_name::<T>());
                self.emit_event(|| SingletonEvent::InitCompleted {
                    type_name: type_name::<T>(),
                });
            }
            Err(err) => {
                log::warn!("{err}; singleton is poisoned");
                self.emit_event(|| SingletonEvent::InitFailed {
                    type_name: type_name::<T>(),
                    reason: err.reason().to_string(),
                });
            }
        }

        outcome
    }

    /// The gate is never held while user code runs, so poisoning cannot leave it
    /// inconsistent; recover instead of failing.
    fn lock_gate(&self) -> MutexGuard<'_, bool> {
        self.initializing.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl<T> Default for LazySingleton<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for LazySingleton<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySingleton")
            .field("type_name", &type_name::<T>())
            .field("state", &self.state())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
