//! Error types returned by the retry executor
use std::fmt;

/// Error returned by [`Retrier::execute`](crate::Retrier::execute).
///
/// Usage errors are reported before the operation runs. `Inner` carries the error from the final
/// attempt unchanged; failures from earlier attempts are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryError<E> {
    /// A negative attempt budget was requested
    InvalidAttempts(i64),
    /// Zero attempts were requested, so the operation could not succeed
    ZeroAttempts,
    /// Every attempt failed; this is the last failure
    Inner(E),
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAttempts(n) => {
                write!(f, "retry only accepts non-negative attempts (got {})", n)
            }
            Self::ZeroAttempts => write!(f, "retry called with 0 attempts, must fail"),
            Self::Inner(e) => write!(f, "{}", e),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for RetryError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Inner(e) => Some(e),
            _ => None,
        }
    }
}

impl<E> RetryError<E> {
    /// True for errors caused by the attempt budget rather than the operation.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::InvalidAttempts(_) | Self::ZeroAttempts)
    }

    /// Check if this error wraps the operation's failure.
    pub fn is_inner(&self) -> bool {
        matches!(self, Self::Inner(_))
    }

    /// Get the operation's error if this is an `Inner` variant.
    pub fn into_inner(self) -> Option<E> {
        match self {
            Self::Inner(e) => Some(e),
            _ => None,
        }
    }

    /// Borrow the operation's error if present.
    pub fn as_inner(&self) -> Option<&E> {
        match self {
            Self::Inner(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors produced while building a [`Retrier`](crate::Retrier).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Jitter is drawn from `[0, range)`, which is empty for zero.
    #[error("jitter_range must be > 0")]
    ZeroJitterRange,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct DummyError(&'static str);

    impl fmt::Display for DummyError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl std::error::Error for DummyError {}

    #[test]
    fn invalid_attempts_display() {
        let err: RetryError<DummyError> = RetryError::InvalidAttempts(-3);
        let msg = err.to_string();
        assert!(msg.contains("non-negative"));
        assert!(msg.contains("-3"));
    }

    #[test]
    fn zero_attempts_display() {
        let err: RetryError<DummyError> = RetryError::ZeroAttempts;
        assert!(err.to_string().contains("0 attempts"));
    }

    #[test]
    fn inner_display_is_transparent() {
        let err = RetryError::Inner(DummyError("fail"));
        assert_eq!(err.to_string(), "fail");
    }

    #[test]
    fn source_points_at_inner() {
        let err = RetryError::Inner(io::Error::new(io::ErrorKind::Other, "disk"));
        assert_eq!(err.source().map(|s| s.to_string()), Some("disk".to_string()));

        let usage: RetryError<io::Error> = RetryError::ZeroAttempts;
        assert!(usage.source().is_none());
    }

    #[test]
    fn predicates_and_accessors() {
        let usage: RetryError<DummyError> = RetryError::InvalidAttempts(-1);
        assert!(usage.is_usage_error());
        assert!(!usage.is_inner());
        assert!(usage.as_inner().is_none());

        let inner = RetryError::Inner(DummyError("x"));
        assert!(!inner.is_usage_error());
        assert!(inner.is_inner());
        assert_eq!(inner.as_inner(), Some(&DummyError("x")));
        assert_eq!(inner.into_inner(), Some(DummyError("x")));
    }

    #[test]
    fn build_error_display() {
        assert_eq!(BuildError::ZeroJitterRange.to_string(), "jitter_range must be > 0");
    }
}
