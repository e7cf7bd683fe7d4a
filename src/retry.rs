//! Retry policy with exponential backoff.
//!
//! Every request the client issues funnels through [`with_retry`], which
//! re-invokes the attempt thunk on transient failure, doubling the delay
//! between attempts. Only idempotent operations are retried automatically;
//! creates and partial updates fail fast so an ambiguous failure can never
//! apply twice.

use std::future::Future;
use std::time::Duration;

use reqwest::Method;

use crate::error::{PsaError, Result};

/// Configuration for retry behavior.
///
/// Defaults to 3 retries with a 500 ms base delay, so a persistently
/// failing idempotent request is attempted 4 times over roughly 3.5 s.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Additional attempts after the first failure.
    pub retries: u32,
    /// Delay before the first retry; doubles on each subsequent retry.
    pub base_delay: Duration,
    /// Upper bound on the backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// A config that never retries. Useful in tests and for callers that
    /// handle resilience themselves.
    pub fn disabled() -> Self {
        Self {
            retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Backoff delay before retry number `attempt` (0-based), capped at
    /// `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        exp.min(self.max_delay)
    }
}

/// Whether an HTTP method is safe to re-issue when the outcome of the
/// previous attempt is unknown.
pub(crate) fn method_is_idempotent(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::PUT | Method::DELETE | Method::HEAD
    )
}

/// Run `op` under the retry policy.
///
/// Invokes the thunk once, then up to `config.retries` more times while the
/// error is transient and `idempotent` is true. Each retry is preceded by an
/// exponentially growing sleep and logged at warn level. The final error is
/// returned unchanged.
///
/// The `idempotent` flag is decided by the call site rather than derived
/// from the method alone: the query sub-resource is a POST but is a pure
/// read, so list operations pass `true`.
pub(crate) async fn with_retry<T, F, Fut>(
    config: &RetryConfig,
    endpoint: &str,
    method: &Method,
    idempotent: bool,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt: u32 = 0;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= config.retries || !idempotent || !err.is_retryable() {
                    return Err(err);
                }

                let delay = config.delay_for(attempt);
                attempt += 1;
                tracing::warn!(
                    endpoint,
                    method = %method,
                    attempt,
                    max_attempts = config.retries + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "request failed, retrying after backoff"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    fn transient_error() -> PsaError {
        PsaError::Api {
            message: "service unavailable".to_string(),
            status_code: Some(503),
        }
    }

    fn permanent_error() -> PsaError {
        PsaError::Api {
            message: "bad request".to_string(),
            status_code: Some(400),
        }
    }

    #[test]
    fn test_delay_doubles_per_attempt() {
        let config = RetryConfig::default();
        assert_eq!(config.delay_for(0), Duration::from_millis(500));
        assert_eq!(config.delay_for(1), Duration::from_millis(1000));
        assert_eq!(config.delay_for(2), Duration::from_millis(2000));
    }

    #[test]
    fn test_delay_is_capped() {
        let config = RetryConfig {
            retries: 10,
            base_delay: Duration::from_secs(10),
            max_delay: Duration::from_secs(30),
        };
        assert_eq!(config.delay_for(0), Duration::from_secs(10));
        assert_eq!(config.delay_for(1), Duration::from_secs(20));
        assert_eq!(config.delay_for(2), Duration::from_secs(30));
        assert_eq!(config.delay_for(5), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_transient_failures() {
        let config = RetryConfig::default();
        let calls = Arc::new(AtomicU32::new(0));
        let start = Instant::now();
        let mut attempt_times = Vec::new();

        let result = with_retry(&config, "Tickets", &Method::GET, true, || {
            let calls = calls.clone();
            attempt_times.push(start.elapsed());
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(transient_error())
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        // Paused clock: the elapsed gaps are exactly the backoff schedule.
        assert_eq!(attempt_times[0], Duration::ZERO);
        assert_eq!(attempt_times[1], Duration::from_millis(500));
        assert_eq!(attempt_times[2], Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_budget_and_returns_last_error() {
        let config = RetryConfig::default();
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<()> = with_retry(&config, "Tickets", &Method::GET, true, || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(transient_error())
            }
        })
        .await;

        // retries + 1 total invocations
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        match result.unwrap_err() {
            PsaError::Api { status_code, .. } => assert_eq!(status_code, Some(503)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_permanent_errors_fail_fast() {
        let config = RetryConfig::default();
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<()> = with_retry(&config, "Tickets", &Method::GET, true, || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(permanent_error())
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_non_idempotent_operations_are_not_retried() {
        let config = RetryConfig::default();
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<()> = with_retry(&config, "Tickets", &Method::POST, false, || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(transient_error())
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_method_idempotency() {
        assert!(method_is_idempotent(&Method::GET));
        assert!(method_is_idempotent(&Method::PUT));
        assert!(method_is_idempotent(&Method::DELETE));
        assert!(!method_is_idempotent(&Method::POST));
        assert!(!method_is_idempotent(&Method::PATCH));
    }
}
