//! Wire types for the Shopify storefront AJAX endpoints.
//!
//! ## `GET /products/{handle}.js`
//!
//! Prices are **integer minor units** (`2500` for 25.00), unlike
//! `products.json`, which returns decimal strings. Both are accepted.
//!
//! `options` is an array of objects `{ "name", "position", "values" }` on the
//! `.js` endpoint, but a bare array of option *names* when the payload comes
//! from Liquid's `product | json` filter. Both shapes are accepted; when only
//! names are present the values are derived from the variants.
//!
//! Variants carry their option values twice: as `option1`/`option2`/`option3`
//! (`null` when unused) and as an `options` array. The array is preferred;
//! Liquid's `product.variants | json` sometimes omits it.
//!
//! `featured_image` and `images` entries are protocol-relative strings
//! (`"//cdn.shopify.com/..."`) on the `.js` endpoint and `{ "src": ... }`
//! objects on `products.json`.
//!
//! ## `POST /cart/add.js`
//!
//! Success returns the added line item. Failure returns a non-2xx status
//! with `{ "status", "message", "description" }`, where `status` is either a
//! number (`422`) or a string (`"bad_request"`).

use serde::Deserialize;

/// Product payload from `/products/{handle}.js` or a Liquid `json` dump.
#[derive(Debug, Deserialize)]
pub struct StorefrontProduct {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub handle: String,
    /// `description` on the `.js` endpoint, `body_html` on `products.json`.
    #[serde(default, alias = "body_html")]
    pub description: Option<String>,
    #[serde(default)]
    pub featured_image: Option<StorefrontImage>,
    #[serde(default)]
    pub images: Vec<StorefrontImage>,
    #[serde(default)]
    pub options: Vec<StorefrontOption>,
    #[serde(default)]
    pub variants: Vec<StorefrontVariant>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StorefrontOption {
    Full {
        name: String,
        #[serde(default)]
        values: Vec<String>,
    },
    Name(String),
}

impl StorefrontOption {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            StorefrontOption::Full { name, .. } | StorefrontOption::Name(name) => name,
        }
    }

    /// Declared values; empty when the payload only names the option.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            StorefrontOption::Full { values, .. } => values,
            StorefrontOption::Name(_) => &[],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StorefrontImage {
    Url(String),
    Object { src: String },
}

impl StorefrontImage {
    #[must_use]
    pub fn src(&self) -> &str {
        match self {
            StorefrontImage::Url(src) | StorefrontImage::Object { src } => src,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StorefrontVariant {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub price: Option<StorefrontPrice>,
    /// Defaults to `true` when absent (optimistic, matching older themes).
    #[serde(default = "default_available")]
    pub available: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StorefrontPrice {
    MinorUnits(i64),
    Decimal(String),
}

/// Line item returned by `POST /cart/add.js`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub variant_id: i64,
    pub quantity: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub handle: Option<String>,
    /// Unit price in minor units.
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub line_price: i64,
    /// Opaque line key, `"<variant id>:<hash>"`.
    #[serde(default)]
    pub key: Option<String>,
}

/// Error envelope from the cart endpoints.
#[derive(Debug, Deserialize)]
pub struct CartErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_available() -> bool {
    true
}
