//! Retry policy for queries
//!
//! The decision is a pure function of the failure count and the error kind,
//! so it can be tested without a cache or a network.

use fastadmin_core::QueryConfig;
use fastadmin_http::{ClientError, ErrorKind};
use std::future::Future;
use std::time::Duration;

/// Exponential backoff with a terminal 403
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&QueryConfig::default())
    }
}

impl From<&QueryConfig> for RetryPolicy {
    fn from(config: &QueryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: config.retry_base_delay(),
            max_delay: config.retry_max_delay(),
        }
    }
}

impl RetryPolicy {
    /// A policy that never waits between attempts
    pub const fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Decide whether to try again after `failure_count` earlier failures.
    ///
    /// A 403 means the token is provably bad: retrying only delays the
    /// redirect to login.
    pub fn should_retry(&self, failure_count: u32, kind: ErrorKind) -> bool {
        kind != ErrorKind::Forbidden && failure_count < self.max_retries
    }

    /// Backoff before retry number `failure_count` (zero-based)
    pub fn delay(&self, failure_count: u32) -> Duration {
        let factor = 2u32.checked_pow(failure_count).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Run `operation` until it succeeds or the policy gives up
pub async fn retry_with_policy<T, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut failure_count = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                let kind = error.kind();
                if !policy.should_retry(failure_count, kind) {
                    return Err(error);
                }
                let delay = policy.delay(failure_count);
                failure_count += 1;
                tracing::debug!(?kind, failure_count, ?delay, "Retrying query");
                sleep(delay).await;
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(delay: Duration) {
    if !delay.is_zero() {
        gloo_timers::future::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn forbidden_is_never_retried() {
        let policy = RetryPolicy::default();
        assert!(!policy.should_retry(0, ErrorKind::Forbidden));
    }

    #[test]
    fn other_failures_retry_three_times() {
        let policy = RetryPolicy::default();
        for kind in [
            ErrorKind::Network,
            ErrorKind::Server,
            ErrorKind::Unauthorized,
            ErrorKind::Decode,
        ] {
            assert!(policy.should_retry(0, kind));
            assert!(policy.should_retry(2, kind));
            assert!(!policy.should_retry(3, kind));
        }
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(0), Duration::from_secs(1));
        assert_eq!(policy.delay(1), Duration::from_secs(2));
        assert_eq!(policy.delay(2), Duration::from_secs(4));
        assert_eq!(policy.delay(5), Duration::from_secs(30));
        assert_eq!(policy.delay(40), Duration::from_secs(30));
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let attempts = Cell::new(0);
        let result: Result<(), _> = retry_with_policy(&RetryPolicy::immediate(3), || {
            attempts.set(attempts.get() + 1);
            async {
                Err(ClientError::ServerError {
                    status: 503,
                    message: String::new(),
                })
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.get(), 4);
    }

    #[tokio::test]
    async fn stops_at_first_forbidden() {
        let attempts = Cell::new(0);
        let result: Result<(), _> = retry_with_policy(&RetryPolicy::immediate(3), || {
            attempts.set(attempts.get() + 1);
            async { Err(ClientError::Forbidden(String::new())) }
        })
        .await;

        assert!(result.unwrap_err().is_forbidden());
        assert_eq!(attempts.get(), 1);
    }

    #[tokio::test]
    async fn recovers_after_transient_failure() {
        let attempts = Cell::new(0);
        let result = retry_with_policy(&RetryPolicy::immediate(3), || {
            attempts.set(attempts.get() + 1);
            let attempt = attempts.get();
            async move {
                if attempt < 3 {
                    Err(ClientError::ServerError {
                        status: 500,
                        message: String::new(),
                    })
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
    }
}
