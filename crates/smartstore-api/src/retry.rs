// Fixed-count retry for API calls.
//
// Every verb goes through the same policy, including POST. Errors are not
// inspected: a 404 is retried just like a refused connection.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::Error;

/// How many times a failed request is re-sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub retries: u32,
    /// Pause between attempts. Zero means retry immediately.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            backoff: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    /// A policy that sends each request exactly once.
    pub const fn none() -> Self {
        Self {
            retries: 0,
            backoff: Duration::ZERO,
        }
    }

    pub const fn with_retries(retries: u32) -> Self {
        Self {
            retries,
            backoff: Duration::ZERO,
        }
    }

    /// Total number of attempts, initial one included.
    pub fn attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Run `attempt` until it succeeds or the retry budget is spent.
    ///
    /// The error of the final attempt is returned unchanged.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut attempt: F) -> Result<T, Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let mut n: u32 = 1;
        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(err) if n <= self.retries => {
                    warn!(operation, attempt = n, error = %err, "request failed, retrying");
                    n += 1;
                    if !self.backoff.is_zero() {
                        tokio::time::sleep(self.backoff).await;
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn failure() -> Error {
        Error::Http {
            status: 503,
            message: None,
            body: String::new(),
        }
    }

    #[tokio::test]
    async fn gives_up_after_initial_plus_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::default();

        let result: Result<(), Error> = policy
            .run("list", || {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(failure())
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(policy.attempts(), 4);
    }

    #[tokio::test]
    async fn stops_at_first_success() {
        let calls = Arc::new(AtomicU32::new(0));

        let result = RetryPolicy::default()
            .run("get", || {
                let calls = Arc::clone(&calls);
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(failure())
                    } else {
                        Ok(7)
                    }
                }
            })
            .await;

        assert_eq!(result.ok(), Some(7));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_backoff_between_attempts() {
        let policy = RetryPolicy {
            retries: 2,
            backoff: Duration::from_secs(5),
        };
        let started = tokio::time::Instant::now();

        let result: Result<(), Error> = policy.run("delete", || async { Err(failure()) }).await;

        assert!(result.is_err());
        assert!(started.elapsed() >= Duration::from_secs(10));
    }

    #[tokio::test]
    async fn none_sends_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let _: Result<(), Error> = RetryPolicy::none()
            .run("create", || {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(failure())
                }
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
