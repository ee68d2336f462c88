//! HTTP client for the Shopify storefront AJAX API.

mod cart;
mod origin;
mod product;

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Url};

use quickview_core::AppConfig;

use crate::error::StorefrontError;
use crate::rate_limit::{parse_retry_after, RetryPolicy};

pub use origin::store_origin;

/// Characters `encodeURIComponent` leaves alone, so handles encode the same
/// way the theme's own scripts encode them.
const HANDLE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// HTTP client for `/cart/add.js` and `/products/{handle}.js`.
///
/// Keeps a cookie store so every request made through one client lands in
/// the same cart session.
///
/// Product lookups are retried on 429 and network failures, up to
/// `max_retries` extra attempts, waiting for the longer of the exponential
/// backoff and the store's `Retry-After` hint. Cart adds never are.
pub struct StorefrontClient {
    pub(super) client: Client,
    pub(super) origin: Url,
    pub(super) retry: RetryPolicy,
}

impl StorefrontClient {
    /// Creates a client for the store at `store_url`.
    ///
    /// `max_retries` applies to product lookups only; set it to `0` to
    /// disable retries. `backoff_base_secs` is the wait before the first
    /// retry, doubling on each subsequent one.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::InvalidStoreUrl`] if `store_url` is not an
    ///   `http(s)` URL with a host.
    /// - [`StorefrontError::Http`] if the underlying `reqwest::Client`
    ///   cannot be constructed.
    pub fn new(
        store_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, StorefrontError> {
        let origin = store_origin(store_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .cookie_store(true)
            .build()?;
        Ok(Self {
            client,
            origin,
            retry: RetryPolicy::new(max_retries, backoff_base_secs),
        })
    }

    /// Creates a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, StorefrontError> {
        Self::new(
            &config.store_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    /// The store origin every request is addressed to.
    #[must_use]
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub(super) fn domain(&self) -> String {
        self.origin.host_str().unwrap_or_default().to_owned()
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.origin.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(super) fn cart_add_url(&self) -> String {
        self.endpoint("cart/add.js")
    }

    pub(super) fn product_url(&self, handle: &str) -> String {
        let encoded = utf8_percent_encode(handle, HANDLE_ENCODE_SET);
        self.endpoint(&format!("products/{encoded}.js"))
    }

    /// Reads `Retry-After` in whole seconds, rounding up. `0` when the
    /// header is absent or not a number of seconds.
    pub(super) fn retry_after_secs(response: &reqwest::Response) -> u64 {
        response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after)
            .unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
