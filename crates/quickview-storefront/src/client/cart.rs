//! `POST /cart/add.js`.

use quickview_core::CartLineRequest;

use crate::error::StorefrontError;
use crate::types::{CartErrorBody, CartItem};

use super::StorefrontClient;

impl StorefrontClient {
    /// Adds one line to the session's cart.
    ///
    /// Attempted exactly once regardless of `max_retries`: a repeated add
    /// after an ambiguous failure could double the line.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::CartRejected`] when the store answers non-2xx
    ///   with its JSON error envelope (sold out, quantity limits).
    /// - [`StorefrontError::RateLimited`] on HTTP 429.
    /// - [`StorefrontError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`StorefrontError::Http`] on network or TLS failure.
    /// - [`StorefrontError::Deserialize`] if the success body is not a line item.
    pub async fn add_to_cart(&self, line: CartLineRequest) -> Result<CartItem, StorefrontError> {
        let url = self.cart_add_url();
        tracing::debug!(
            variant_id = %line.id,
            quantity = line.quantity.get(),
            %url,
            "adding line to cart"
        );

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&line)
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(StorefrontError::RateLimited {
                domain: self.domain(),
                retry_after_secs: Self::retry_after_secs(&response),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(cart_failure(status.as_u16(), &body, url));
        }

        let body = response.text().await?;
        serde_json::from_str::<CartItem>(&body).map_err(|e| StorefrontError::Deserialize {
            context: format!("cart add response for variant {}", line.id),
            source: e,
        })
    }
}

/// Maps a non-2xx cart response to an error, keeping Shopify's own wording
/// when the body carries it.
fn cart_failure(status: u16, body: &str, url: String) -> StorefrontError {
    match serde_json::from_str::<CartErrorBody>(body) {
        Ok(CartErrorBody {
            message,
            description,
        }) if message.is_some() || description.is_some() => StorefrontError::CartRejected {
            status,
            message: message.unwrap_or_else(|| "Cart Error".to_owned()),
            description: description.unwrap_or_default(),
        },
        _ => StorefrontError::UnexpectedStatus { status, url },
    }
}
