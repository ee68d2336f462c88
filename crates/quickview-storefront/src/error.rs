use quickview_core::{CoreError, VariantId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not decode product {handle}: {source}")]
    Decode {
        handle: String,
        #[source]
        source: DecodeError,
    },

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The cart endpoint refused the line, e.g. sold out or quantity limit.
    /// `description` is Shopify's shopper-facing text, passed through as-is.
    #[error("{message}: {description}")]
    CartRejected {
        status: u16,
        message: String,
        description: String,
    },

    #[error("invalid store URL \"{store_url}\": {reason}")]
    InvalidStoreUrl { store_url: String, reason: String },
}

/// Failure to turn an opaque product payload into a [`quickview_core::Product`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is empty")]
    Empty,

    #[error("payload is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("variant {variant} has an unreadable price \"{raw}\"")]
    InvalidPrice { variant: VariantId, raw: String },

    #[error("payload violates the product model: {0}")]
    Invalid(#[from] CoreError),
}
