// src/error_recovery.rs
//! Retry with linear backoff for API operations.
//!
//! Only failures classified as transient are repeated. Everything else,
//! including HTTP error responses, surfaces on the first attempt.

use crate::constants::{FETCH_BACKOFF_UNIT_MS, FETCH_MAX_ATTEMPTS};
use crate::error::AppError;
use std::time::Duration;

/// How many times to attempt an operation and how long to wait in between.
///
/// After the k-th failed attempt the wait is `k * backoff_unit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: FETCH_MAX_ATTEMPTS,
            backoff_unit: Duration::from_millis(FETCH_BACKOFF_UNIT_MS),
        }
    }
}

impl RetryPolicy {
    /// Wait after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_unit * attempt
    }
}

/// Observer for retry decisions, used for fetch statistics.
pub trait RetryObserver: Send + Sync {
    fn on_retry(&self, attempt: u32, delay: Duration, error: &AppError);
}

impl RetryObserver for () {
    fn on_retry(&self, _attempt: u32, _delay: Duration, _error: &AppError) {}
}

/// Retries an async operation while it fails with a transient network error.
///
/// On exhaustion the last failure is returned wrapped in
/// `AppError::TransientNetwork`; a non-transient failure is returned as-is.
pub async fn retry_transient<F, T, Fut>(
    mut operation: F,
    policy: RetryPolicy,
    observer: &dyn RetryObserver,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AppError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(AppError::Network(failure)) if failure.is_transient() => {
                if attempt >= max_attempts {
                    log::warn!(
                        "Giving up after {} attempts: {}",
                        attempt,
                        failure
                    );
                    return Err(AppError::TransientNetwork {
                        attempts: attempt,
                        source: failure,
                    });
                }

                let delay = policy.delay_after(attempt);
                let error = AppError::Network(failure);
                log::warn!(
                    "Attempt {} failed ({}), retrying after {:?}",
                    attempt,
                    error,
                    delay
                );
                observer.on_retry(attempt, delay, &error);
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NetworkFailure, NetworkFailureKind};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    fn reset() -> AppError {
        AppError::Network(NetworkFailure::new(
            NetworkFailureKind::ConnectionReset,
            std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer"),
        ))
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<(u32, Duration)>>);

    impl RetryObserver for Recorder {
        fn on_retry(&self, attempt: u32, delay: Duration, _error: &AppError) {
            self.0.lock().unwrap().push((attempt, delay));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_on_third_attempt_after_linear_backoff() {
        let calls = AtomicU32::new(0);
        let recorder = Recorder::default();
        let started = tokio::time::Instant::now();

        let result = retry_transient(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n < 3 {
                        Err(reset())
                    } else {
                        Ok(n)
                    }
                }
            },
            RetryPolicy::default(),
            &recorder,
        )
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(started.elapsed(), Duration::from_millis(3000));
        assert_eq!(
            *recorder.0.lock().unwrap(),
            vec![
                (1, Duration::from_millis(1000)),
                (2, Duration::from_millis(2000))
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_reports_attempts_and_cause() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_transient(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(reset()) }
            },
            RetryPolicy::default(),
            &(),
        )
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match result {
            Err(AppError::TransientNetwork { attempts, source }) => {
                assert_eq!(attempts, 3);
                assert_eq!(source.kind, NetworkFailureKind::ConnectionReset);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_transient(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(AppError::Auth {
                        status: 401,
                        message: "API token is invalid.".to_string(),
                    })
                }
            },
            RetryPolicy::default(),
            &(),
        )
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(AppError::Auth { status: 401, .. })));
    }
}
