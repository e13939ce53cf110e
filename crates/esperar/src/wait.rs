//! The wait engine: bounded poll-until-success.
//!
//! A [`Waiter`] retries a fallible probe at a fixed interval until it
//! succeeds or the timeout elapses. Failures classified as transient
//! ([`FailureKind::is_transient`]), plus any kinds on the waiter's
//! ignore-list, are swallowed as "not yet"; every other failure aborts the
//! poll immediately and propagates unchanged.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::result::{EsperarError, EsperarResult, FailureKind};

/// Default timeout for implicit waits (10 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Bounded polling construct that retries a predicate until success or timeout.
///
/// The poll blocks the calling thread; there is no cancellation primitive
/// beyond timeout expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waiter {
    timeout: Duration,
    poll_interval: Duration,
    ignored: Vec<FailureKind>,
}

impl Default for Waiter {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }
}

impl Waiter {
    /// Create a waiter with the given timeout in seconds
    #[must_use]
    pub const fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            ignored: Vec::new(),
        }
    }

    /// Create a waiter with a millisecond timeout (poll-interval tuning for
    /// fast test scenarios)
    #[must_use]
    pub const fn from_millis(timeout_ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(timeout_ms),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            ignored: Vec::new(),
        }
    }

    /// Additionally absorb these failure kinds while polling
    #[must_use]
    pub fn with_ignored(mut self, kinds: &[FailureKind]) -> Self {
        self.ignored = kinds.to_vec();
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval_ms: u64) -> Self {
        self.poll_interval = Duration::from_millis(interval_ms);
        self
    }

    /// The configured timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The configured polling interval
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// The additionally ignored failure kinds
    #[must_use]
    pub fn ignored(&self) -> &[FailureKind] {
        &self.ignored
    }

    fn absorbs(&self, error: &EsperarError) -> bool {
        let kind = error.kind();
        kind.is_transient() || self.ignored.contains(&kind)
    }

    /// Poll `probe` until it returns `Ok`, or fail with
    /// [`EsperarError::Timeout`] once the timeout elapses.
    ///
    /// The probe is always attempted at least once. Non-absorbed failures
    /// propagate immediately, aborting the poll early.
    pub fn until<T, F>(&self, mut probe: F) -> EsperarResult<T>
    where
        F: FnMut() -> EsperarResult<T>,
    {
        let start = Instant::now();
        loop {
            match probe() {
                Ok(value) => {
                    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "wait satisfied");
                    return Ok(value);
                }
                Err(error) if !self.absorbs(&error) => {
                    debug!(%error, "wait aborted by non-retryable failure");
                    return Err(error);
                }
                Err(error) => {
                    if start.elapsed() >= self.timeout {
                        debug!(%error, timeout_ms = self.timeout.as_millis() as u64, "wait exhausted");
                        return Err(EsperarError::Timeout {
                            ms: self.timeout.as_millis() as u64,
                        });
                    }
                    trace!(%error, "condition not yet met");
                    std::thread::sleep(self.poll_interval);
                }
            }
        }
    }

    /// Poll a boolean probe until it returns `Ok(true)`.
    ///
    /// `Ok(false)` is treated the same as a transient failure ("not yet").
    pub fn until_true<F>(&self, mut probe: F) -> EsperarResult<()>
    where
        F: FnMut() -> EsperarResult<bool>,
    {
        self.until(|| match probe() {
            Ok(true) => Ok(()),
            Ok(false) => Err(EsperarError::NotFound {
                locator: "<condition not yet true>".to_string(),
            }),
            Err(error) => Err(error),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fast_waiter(timeout_ms: u64) -> Waiter {
        Waiter::from_millis(timeout_ms).with_poll_interval(5)
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_default_timeout_is_ten_seconds() {
            let waiter = Waiter::default();
            assert_eq!(waiter.timeout(), Duration::from_secs(10));
        }

        #[test]
        fn test_new_sets_exact_timeout() {
            let waiter = Waiter::new(3);
            assert_eq!(waiter.timeout(), Duration::from_secs(3));
        }

        #[test]
        fn test_with_ignored() {
            let waiter = Waiter::new(1).with_ignored(&[FailureKind::Driver]);
            assert_eq!(waiter.ignored(), &[FailureKind::Driver]);
        }

        #[test]
        fn test_with_poll_interval() {
            let waiter = Waiter::new(1).with_poll_interval(25);
            assert_eq!(waiter.poll_interval(), Duration::from_millis(25));
        }
    }

    mod until_tests {
        use super::*;

        #[test]
        fn test_immediate_success_returns_value() {
            let waiter = fast_waiter(100);
            let result = waiter.until(|| Ok(42));
            assert_eq!(result.unwrap(), 42);
        }

        #[test]
        fn test_transient_failures_absorbed_until_success() {
            let waiter = fast_waiter(1000);
            let attempts = Cell::new(0);
            let result = waiter.until(|| {
                attempts.set(attempts.get() + 1);
                if attempts.get() < 4 {
                    Err(EsperarError::NotFound {
                        locator: "css=#late".to_string(),
                    })
                } else {
                    Ok("found")
                }
            });
            assert_eq!(result.unwrap(), "found");
            assert_eq!(attempts.get(), 4);
        }

        #[test]
        fn test_stale_is_absorbed() {
            let waiter = fast_waiter(1000);
            let attempts = Cell::new(0);
            let result: EsperarResult<()> = waiter.until(|| {
                attempts.set(attempts.get() + 1);
                if attempts.get() == 1 {
                    Err(EsperarError::Stale {
                        id: "old".to_string(),
                    })
                } else {
                    Ok(())
                }
            });
            assert!(result.is_ok());
        }

        #[test]
        fn test_non_retryable_aborts_early() {
            let waiter = fast_waiter(10_000);
            let start = Instant::now();
            let result: EsperarResult<()> = waiter.until(|| {
                Err(EsperarError::TypeMismatch {
                    message: "not a checkbox".to_string(),
                })
            });
            assert_eq!(result.unwrap_err().kind(), FailureKind::TypeMismatch);
            assert!(start.elapsed() < Duration::from_secs(1));
        }

        #[test]
        fn test_ignored_kind_is_absorbed() {
            let waiter = fast_waiter(1000).with_ignored(&[FailureKind::Driver]);
            let attempts = Cell::new(0);
            let result = waiter.until(|| {
                attempts.set(attempts.get() + 1);
                if attempts.get() < 3 {
                    Err(EsperarError::Driver {
                        message: "transient protocol hiccup".to_string(),
                    })
                } else {
                    Ok(())
                }
            });
            assert!(result.is_ok());
            assert_eq!(attempts.get(), 3);
        }

        #[test]
        fn test_never_matching_times_out() {
            let waiter = fast_waiter(60);
            let start = Instant::now();
            let result: EsperarResult<()> = waiter.until(|| {
                Err(EsperarError::NotFound {
                    locator: "css=#never".to_string(),
                })
            });
            let elapsed = start.elapsed();
            assert_eq!(result.unwrap_err().kind(), FailureKind::Timeout);
            assert!(elapsed >= Duration::from_millis(60));
            // Bounded overshoot: timeout plus a handful of poll intervals
            assert!(elapsed < Duration::from_millis(600));
        }

        #[test]
        fn test_timeout_error_carries_configured_ms() {
            let waiter = fast_waiter(50);
            let result: EsperarResult<()> = waiter.until(|| {
                Err(EsperarError::NotFound {
                    locator: "css=#never".to_string(),
                })
            });
            match result.unwrap_err() {
                EsperarError::Timeout { ms } => assert_eq!(ms, 50),
                other => panic!("expected timeout, got {other}"),
            }
        }

        #[test]
        fn test_probe_attempted_at_least_once() {
            // A zero timeout still probes once before giving up
            let waiter = Waiter::from_millis(0).with_poll_interval(5);
            let attempts = Cell::new(0);
            let result = waiter.until(|| {
                attempts.set(attempts.get() + 1);
                Ok("first try")
            });
            assert_eq!(result.unwrap(), "first try");
            assert_eq!(attempts.get(), 1);
        }
    }

    mod until_true_tests {
        use super::*;

        #[test]
        fn test_true_succeeds() {
            let waiter = fast_waiter(100);
            assert!(waiter.until_true(|| Ok(true)).is_ok());
        }

        #[test]
        fn test_false_polls_until_true() {
            let waiter = fast_waiter(1000);
            let attempts = Cell::new(0);
            let result = waiter.until_true(|| {
                attempts.set(attempts.get() + 1);
                Ok(attempts.get() >= 3)
            });
            assert!(result.is_ok());
            assert_eq!(attempts.get(), 3);
        }

        #[test]
        fn test_false_forever_times_out() {
            let waiter = fast_waiter(40);
            let result = waiter.until_true(|| Ok(false));
            assert_eq!(result.unwrap_err().kind(), FailureKind::Timeout);
        }

        #[test]
        fn test_terminal_error_propagates() {
            let waiter = fast_waiter(10_000);
            let result = waiter.until_true(|| {
                Err(EsperarError::InvalidArgument {
                    message: "bad direction".to_string(),
                })
            });
            assert_eq!(result.unwrap_err().kind(), FailureKind::InvalidArgument);
        }
    }
}
