//! Retry policy for transient product API failures.
//!
//! A 429 carries the server's `Retry-After` hint, which becomes the floor for
//! the next wait. A hint longer than [`MAX_WAIT`] is not worth blocking a
//! catalog load on, so the error is returned instead.

use std::future::Future;
use std::time::Duration;

use crate::error::CatalogError;

/// Longest single wait between attempts.
pub(crate) const MAX_WAIT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    /// Extra attempts after the first.
    pub(crate) max_retries: u32,
    pub(crate) backoff_base: Duration,
}

impl RetryPolicy {
    /// Wait before retry number `retry` (0-based) after `err`, or `None` when
    /// `err` should be returned as is.
    pub(crate) fn delay_for(&self, retry: u32, err: &CatalogError) -> Option<Duration> {
        if retry >= self.max_retries {
            return None;
        }
        let backoff = self
            .backoff_base
            .saturating_mul(1u32 << retry.min(31))
            .min(MAX_WAIT);

        match err {
            CatalogError::Http(_) => Some(backoff),
            CatalogError::RateLimited { retry_after_secs } => {
                let hinted = Duration::from_secs(*retry_after_secs);
                (hinted <= MAX_WAIT).then(|| backoff.max(hinted))
            }
            _ => None,
        }
    }

    /// Runs `operation` until it succeeds or [`RetryPolicy::delay_for`] gives up.
    pub(crate) async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, CatalogError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CatalogError>>,
    {
        let mut retry = 0u32;
        loop {
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            let Some(delay) = self.delay_for(retry, &err) else {
                return Err(err);
            };
            tracing::warn!(
                retry,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "product API request failed, retrying"
            );
            tokio::time::sleep(delay).await;
            retry += 1;
        }
    }
}
