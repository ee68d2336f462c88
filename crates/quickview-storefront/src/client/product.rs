//! `GET /products/{handle}.js`.

use quickview_core::Product;

use crate::decode::decode_product;
use crate::error::StorefrontError;

use super::StorefrontClient;

impl StorefrontClient {
    /// Looks up a product by handle, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::NotFound`] on HTTP 404 (not retried).
    /// - [`StorefrontError::RateLimited`] on HTTP 429 after all retries.
    ///   Each retry waits at least as long as the store's `Retry-After`.
    /// - [`StorefrontError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`StorefrontError::Http`] on network failure after all retries.
    /// - [`StorefrontError::Decode`] if the body is not a usable product.
    pub async fn fetch_product(&self, handle: &str) -> Result<Product, StorefrontError> {
        let url = self.product_url(handle);
        let what = format!("product {handle}");

        self.retry.run(&what, || {
            let url = url.clone();
            async move {
                tracing::debug!(handle, %url, "fetching product");
                let response = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    return Err(StorefrontError::RateLimited {
                        domain: self.domain(),
                        retry_after_secs: Self::retry_after_secs(&response),
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(StorefrontError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(StorefrontError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let body = response.text().await?;
                decode_product(&body).map_err(|source| StorefrontError::Decode {
                    handle: handle.to_owned(),
                    source,
                })
            }
        })
        .await
    }
}
