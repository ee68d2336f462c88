//! Retry policy for idempotent storefront reads.
//!
//! Only product lookups go through here. Cart adds are not idempotent: a
//! blind retry after a timeout can put the item in the cart twice, so they
//! are always attempted exactly once.
//!
//! Shopify answers a throttled request with 429 and a `Retry-After` hint
//! (often fractional, e.g. `2.0`). The wait before a retry is the larger of
//! that hint and the exponential backoff, with the hint capped at
//! [`MAX_HINTED_WAIT`].

use std::future::Future;
use std::time::Duration;

use crate::error::StorefrontError;

/// Upper bound on a server-supplied `Retry-After` wait.
pub(crate) const MAX_HINTED_WAIT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    /// Extra attempts after the first one.
    pub(crate) max_retries: u32,
    /// Backoff before the first retry; doubles for each later one.
    pub(crate) backoff_base: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub(crate) fn new(max_retries: u32, backoff_base_secs: u64) -> Self {
        Self {
            max_retries,
            backoff_base: Duration::from_secs(backoff_base_secs),
        }
    }

    /// How long to wait before retry number `retry` (0-based) after `err`,
    /// or `None` if the lookup should give up.
    ///
    /// Only throttling and transport failures are retried. A 404, an
    /// unexpected status or an undecodable body would fail the same way
    /// again.
    pub(crate) fn wait_before(&self, retry: u32, err: &StorefrontError) -> Option<Duration> {
        if retry >= self.max_retries {
            return None;
        }
        let backoff = self
            .backoff_base
            .saturating_mul(2u32.saturating_pow(retry.min(31)));
        match err {
            StorefrontError::RateLimited {
                retry_after_secs, ..
            } => {
                let hinted = Duration::from_secs(*retry_after_secs).min(MAX_HINTED_WAIT);
                Some(backoff.max(hinted))
            }
            StorefrontError::Http(_) => Some(backoff),
            _ => None,
        }
    }

    /// Runs `lookup` until it succeeds or [`RetryPolicy::wait_before`] says
    /// to stop, returning the last error in that case.
    pub(crate) async fn run<T, F, Fut>(
        &self,
        what: &str,
        mut lookup: F,
    ) -> Result<T, StorefrontError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, StorefrontError>>,
    {
        let mut retry = 0u32;
        loop {
            let err = match lookup().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            let Some(wait) = self.wait_before(retry, &err) else {
                return Err(err);
            };
            tracing::warn!(
                what,
                retry = retry + 1,
                max_retries = self.max_retries,
                wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "storefront lookup failed, retrying"
            );
            tokio::time::sleep(wait).await;
            retry += 1;
        }
    }
}

/// Parses a `Retry-After` value given in seconds, rounding fractions up.
///
/// Accepts `"3"` and Shopify's `"2.0"` / `"0.5"`. HTTP-date values and
/// anything else unreadable yield `None`.
pub(crate) fn parse_retry_after(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    let (whole, frac) = raw.split_once('.').unwrap_or((raw, ""));
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let whole: u64 = if whole.is_empty() && !frac.is_empty() {
        0
    } else {
        whole.parse().ok()?
    };
    if frac.trim_end_matches('0').is_empty() {
        Some(whole)
    } else {
        whole.checked_add(1)
    }
}
