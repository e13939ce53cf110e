//! Result and error types for Esperar.
//!
//! The error enum carries the human-facing condition; the retry decision is
//! made on a separate channel, [`FailureKind`], so that control flow
//! (retry-on-transient) and user-facing failure never share one hierarchy.

use thiserror::Error;

/// Result type for Esperar operations
pub type EsperarResult<T> = Result<T, EsperarError>;

/// Errors that can occur in Esperar
#[derive(Debug, Error)]
pub enum EsperarError {
    /// Element or descendant does not (yet) exist
    #[error("Element not found: {locator}")]
    NotFound {
        /// Locator or description of what was searched for
        locator: String,
    },

    /// Remote node reference is no longer attached to the document
    #[error("Stale element reference: {id}")]
    Stale {
        /// The invalidated element reference
        id: String,
    },

    /// Polling exhausted without success
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// An action required a specific element kind and the element does not qualify
    #[error("Type mismatch: {message}")]
    TypeMismatch {
        /// What was required and what was found
        message: String,
    },

    /// Malformed input to a control API
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// An expectation exhausted its poll without the predicate holding
    #[error("Assertion failed: {message}")]
    Assertion {
        /// Predicate and locator description
        message: String,
    },

    /// Failure reported by the underlying driver (transport, protocol,
    /// element not interactable, script fault)
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },
}

impl EsperarError {
    /// Classify this error for retry decisions
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::Stale { .. } => FailureKind::Stale,
            Self::Timeout { .. } => FailureKind::Timeout,
            Self::TypeMismatch { .. } => FailureKind::TypeMismatch,
            Self::InvalidArgument { .. } => FailureKind::InvalidArgument,
            Self::Assertion { .. } => FailureKind::Assertion,
            Self::Driver { .. } => FailureKind::Driver,
        }
    }
}

/// Failure classification consumed by the wait engine.
///
/// Only [`FailureKind::NotFound`] and [`FailureKind::Stale`] are transient
/// (retryable) by default; a [`crate::wait::Waiter`] may be configured to
/// additionally absorb other kinds during a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Element not (yet) present
    NotFound,
    /// Remote reference detached from the document
    Stale,
    /// Poll exhausted
    Timeout,
    /// Wrong element kind for the requested action
    TypeMismatch,
    /// Malformed control-API input
    InvalidArgument,
    /// Expectation failure
    Assertion,
    /// Driver-reported failure
    Driver,
}

impl FailureKind {
    /// Whether the wait engine absorbs this kind unconditionally during a poll
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::NotFound | Self::Stale)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod kind_tests {
        use super::*;

        #[test]
        fn test_not_found_kind() {
            let err = EsperarError::NotFound {
                locator: "css=#missing".to_string(),
            };
            assert_eq!(err.kind(), FailureKind::NotFound);
        }

        #[test]
        fn test_stale_kind() {
            let err = EsperarError::Stale {
                id: "abc".to_string(),
            };
            assert_eq!(err.kind(), FailureKind::Stale);
        }

        #[test]
        fn test_timeout_kind() {
            let err = EsperarError::Timeout { ms: 10_000 };
            assert_eq!(err.kind(), FailureKind::Timeout);
        }

        #[test]
        fn test_type_mismatch_kind() {
            let err = EsperarError::TypeMismatch {
                message: "expected checkbox".to_string(),
            };
            assert_eq!(err.kind(), FailureKind::TypeMismatch);
        }
    }

    mod transient_tests {
        use super::*;

        #[test]
        fn test_transient_kinds() {
            assert!(FailureKind::NotFound.is_transient());
            assert!(FailureKind::Stale.is_transient());
        }

        #[test]
        fn test_terminal_kinds() {
            assert!(!FailureKind::Timeout.is_transient());
            assert!(!FailureKind::TypeMismatch.is_transient());
            assert!(!FailureKind::InvalidArgument.is_transient());
            assert!(!FailureKind::Assertion.is_transient());
            assert!(!FailureKind::Driver.is_transient());
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn test_timeout_display() {
            let err = EsperarError::Timeout { ms: 500 };
            assert_eq!(err.to_string(), "Operation timed out after 500ms");
        }

        #[test]
        fn test_not_found_display_names_locator() {
            let err = EsperarError::NotFound {
                locator: "css=button.primary".to_string(),
            };
            assert!(err.to_string().contains("css=button.primary"));
        }
    }
}
