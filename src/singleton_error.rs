use thiserror::Error;

/// Errors surfaced by a [`LazySingleton`](crate::LazySingleton).
///
/// A failed initializer poisons its registry for good, so every caller that
/// observes the failure receives an equal copy of the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SingletonError {
    /// The initializer returned an error or panicked.
    #[error("initialization of {type_name} failed: {reason}")]
    InitializationFailure {
        type_name: &'static str,
        reason: String,
    },
}

impl SingletonError {
    pub(crate) fn initialization_failure<T>(reason: impl Into<String>) -> Self {
        SingletonError::InitializationFailure {
            type_name: std::any::type_name::<T>(),
            reason: reason.into(),
        }
    }

    /// The failure reason reported by the initializer.
    pub fn reason(&self) -> &str {
        match self {
            SingletonError::InitializationFailure { reason, .. } => reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialization_failure_display() {
        let err = SingletonError::initialization_failure::<u32>("disk on fire");
        assert_eq!(
            err.to_string(),
            "initialization of u32 failed: disk on fire"
        );
    }

    #[test]
    fn test_reason() {
        let err = SingletonError::initialization_failure::<String>("timeout");
        assert_eq!(err.reason(), "timeout");
    }

    #[test]
    fn test_equality() {
        let a = SingletonError::initialization_failure::<u8>("x");
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, SingletonError::initialization_failure::<u8>("y"));
        assert_ne!(a, SingletonError::initialization_failure::<u16>("x"));
    }

    #[test]
    fn test_error_trait() {
        let err: &dyn std::error::Error = &SingletonError::initialization_failure::<i64>("nope");
        assert_eq!(err.to_string(), "initialization of i64 failed: nope");
    }
}
