// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bounded retry with linear backoff for flaky upstream endpoints.

use crate::error::AppError;
use std::future::Future;
use std::time::Duration;

/// Retry policy: how many attempts, how long to wait, and which failures count.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Wait after the n-th failed attempt is `n * backoff_step`
    pub backoff_step: Duration,
    /// HTTP statuses worth retrying
    pub retryable_statuses: Vec<u16>,
}

impl RetryPolicy {
    /// Policy used for the Strava activity list: HTTP 500 only, 3 attempts, 2s/4s waits.
    pub fn server_errors() -> Self {
        Self {
            max_attempts: 3,
            backoff_step: Duration::from_secs(2),
            retryable_statuses: vec![500],
        }
    }

    /// Same policy with a different backoff step (tests use milliseconds).
    pub fn with_backoff_step(mut self, step: Duration) -> Self {
        self.backoff_step = step;
        self
    }

    pub fn is_retryable(&self, err: &AppError) -> bool {
        err.http_status()
            .is_some_and(|status| self.retryable_statuses.contains(&status))
    }

    /// Delay before the next attempt, given the 1-based attempt that just failed.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_step * attempt
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or
    /// attempts run out. The last error is returned.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, AppError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(attempt, "Upstream recovered after retry");
                    }
                    return Ok(value);
                }
                Err(e) if attempt < self.max_attempts && self.is_retryable(&e) => {
                    let wait = self.delay_after(attempt);
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        wait_secs = wait.as_secs_f64(),
                        error = %e,
                        "Retryable upstream error, backing off"
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::server_errors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::server_errors().with_backoff_step(Duration::from_millis(1))
    }

    #[test]
    fn test_linear_backoff_schedule() {
        let policy = RetryPolicy::server_errors();
        assert_eq!(policy.delay_after(1), Duration::from_secs(2));
        assert_eq!(policy.delay_after(2), Duration::from_secs(4));
        assert_eq!(policy.delay_after(3), Duration::from_secs(6));
    }

    #[test]
    fn test_only_500_is_retryable() {
        let policy = RetryPolicy::server_errors();
        assert!(policy.is_retryable(&AppError::status("strava", 500, "")));
        assert!(!policy.is_retryable(&AppError::status("strava", 503, "")));
        assert!(!policy.is_retryable(&AppError::transport("strava", "connection reset")));
    }

    #[tokio::test]
    async fn test_recovers_after_server_errors() {
        let calls = AtomicU32::new(0);
        let result = fast_policy()
            .run(|attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 3 {
                        Err(AppError::status("strava", 500, "boom"))
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = fast_policy()
            .run(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(AppError::status("strava", 500, "still down")) }
            })
            .await;

        assert_eq!(result.unwrap_err().http_status(), Some(500));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_fails_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = fast_policy()
            .run(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(AppError::status("strava", 404, "missing")) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
