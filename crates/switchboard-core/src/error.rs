//! Dispatch errors.
//!
//! The dispatch layer itself can fail in exactly two ways: a repository was
//! referenced before being configured with a strategy, or an operation name
//! outside the registration's declared set was invoked. Everything else is
//! a strategy or interceptor failure, which the layer forwards untouched.

use thiserror::Error;

/// Erased error type for strategy and interceptor failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors surfaced by the dispatch layer.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No strategy was configured for the repository.
    ///
    /// Raised when a dispatch plan is built for a repository identity whose
    /// registration declares no strategy, or for which no registration
    /// exists at all. Fatal for that identity; never retried.
    #[error("Repository '{repository}' has no strategy configured")]
    NotConfigured {
        /// Repository identity that was referenced before configuration.
        repository: String,
    },

    /// The operation name is not declared by the registration.
    #[error("Repository '{repository}' does not support operation '{operation}'")]
    UnsupportedOperation {
        /// Repository identity the call was made against.
        repository: String,
        /// Operation name that is not declared.
        operation: String,
    },

    /// A strategy or interceptor call failed.
    ///
    /// Forwarded with the originating error intact; the dispatch layer
    /// performs no catching, wrapping, or retries.
    #[error(transparent)]
    Hook(#[from] BoxError),
}

impl DispatchError {
    /// Wrap a strategy or interceptor failure for propagation.
    pub fn hook(err: impl Into<BoxError>) -> Self {
        DispatchError::Hook(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct StorageDown;

    impl fmt::Display for StorageDown {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "storage unavailable")
        }
    }

    impl std::error::Error for StorageDown {}

    #[test]
    fn test_not_configured_display() {
        let err = DispatchError::NotConfigured {
            repository: "users".to_string(),
        };
        assert_eq!(err.to_string(), "Repository 'users' has no strategy configured");
    }

    #[test]
    fn test_hook_is_transparent() {
        let err = DispatchError::hook(StorageDown);
        // Display delegates to the original error, no wrapping prefix.
        assert_eq!(err.to_string(), "storage unavailable");
    }

    #[test]
    fn test_hook_keeps_root_cause() {
        let err = DispatchError::hook(StorageDown);
        match err {
            DispatchError::Hook(inner) => {
                assert!(inner.downcast_ref::<StorageDown>().is_some());
            }
            other => panic!("expected Hook, got {:?}", other),
        }
    }
}
