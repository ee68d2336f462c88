//! Store origin validation.

use reqwest::Url;

use crate::error::StorefrontError;

/// Reduces a configured store URL to its scheme+host origin.
///
/// Given `"https://shop.example.com/collections/all"`, returns
/// `https://shop.example.com/`, so the AJAX endpoints are always addressed
/// from the store root no matter which page the URL was copied from.
///
/// # Errors
///
/// Returns [`StorefrontError::InvalidStoreUrl`] if the URL does not parse,
/// is not `http`/`https`, or has no host.
pub fn store_origin(store_url: &str) -> Result<Url, StorefrontError> {
    let invalid = |reason: String| StorefrontError::InvalidStoreUrl {
        store_url: store_url.to_owned(),
        reason,
    };

    let parsed = Url::parse(store_url.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme \"{}\"", parsed.scheme())));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".to_owned()));
    }

    Url::parse(&parsed.origin().ascii_serialization()).map_err(|e| invalid(e.to_string()))
}
