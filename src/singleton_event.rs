/// Events emitted by a [`LazySingleton`](crate::LazySingleton) while it is accessed.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use creational_patterns::SingletonEvent;
///
/// let event = SingletonEvent::InitStarted { type_name: "i32" };
/// assert_eq!(event.to_string(), "init_started { type_name: i32 }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingletonEvent {
    /// This caller won the race and is running the initializer.
    InitStarted {
        /// The type name of the resource (e.g., "i32", "alloc::string::String")
        type_name: &'static str,
    },

    /// The initializer returned successfully and the instance was published.
    InitCompleted { type_name: &'static str },

    /// The initializer failed and the registry is now poisoned.
    InitFailed {
        type_name: &'static str,
        /// The reason reported by the initializer.
        reason: String,
    },

    /// The caller found an initialization in progress and is blocking on it.
    Waiting { type_name: &'static str },

    /// The caller was served an already published outcome.
    Hit {
        type_name: &'static str,
        /// Whether the outcome was a live instance (false when poisoned).
        found: bool,
    },
}

impl std::fmt::Display for SingletonEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SingletonEvent::InitStarted { type_name } => {
                write!(f, "init_started {{ type_name: {} }}", type_name)
            }
            SingletonEvent::InitCompleted { type_name } => {
                write!(f, "init_completed {{ type_name: {} }}", type_name)
            }
            SingletonEvent::InitFailed { type_name, reason } => {
                write!(
                    f,
                    "init_failed {{ type_name: {}, reason: {} }}",
                    type_name, reason
                )
            }
            SingletonEvent::Waiting { type_name } => {
                write!(f, "waiting {{ type_name: {} }}", type_name)
            }
            SingletonEvent::Hit { type_name, found } => {
                write!(f, "hit {{ type_name: {}, found: {} }}", type_name, found)
            }
        }
    }
}
