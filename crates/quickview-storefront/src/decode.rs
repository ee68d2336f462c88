//! Decoding product payloads at the serialization boundary.
//!
//! Payloads arrive as opaque strings: a `/products/{handle}.js` response body,
//! or JSON that a theme rendered into an HTML attribute. Attribute JSON is
//! often entity-escaped (`&quot;`), so a failed parse is retried once after
//! unescaping.

use serde::de::DeserializeOwned;

use quickview_core::{
    parse_decimal_to_minor_units, OptionAxis, Product, ProductParts, Variant, VariantId,
};

use crate::error::DecodeError;
use crate::types::{StorefrontImage, StorefrontPrice, StorefrontProduct, StorefrontVariant};

/// Tile attributes of a product block in a collection grid.
///
/// Mirrors the `data-product-*` attributes and the tile's `<img>`: the
/// variants arrive as a JSON array, everything else as plain strings.
#[derive(Debug, Clone, Default)]
pub struct ProductBlock<'a> {
    pub id: i64,
    pub handle: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub image_src: Option<&'a str>,
    pub variants_json: &'a str,
}

/// Decodes a full product payload.
///
/// # Errors
///
/// - [`DecodeError::Empty`] for a blank payload.
/// - [`DecodeError::Json`] if neither the raw nor the unescaped payload parses.
/// - [`DecodeError::InvalidPrice`] for a decimal price that does not parse.
/// - [`DecodeError::Invalid`] if the decoded data breaks the product model.
pub fn decode_product(payload: &str) -> Result<Product, DecodeError> {
    let raw: StorefrontProduct = parse_json(payload)?;
    product_from_storefront(raw)
}

/// Decodes a product from grid-tile attributes.
///
/// # Errors
///
/// Same as [`decode_product`], applied to `block.variants_json`.
pub fn decode_block(block: &ProductBlock<'_>) -> Result<Product, DecodeError> {
    let variants: Vec<StorefrontVariant> = parse_json(block.variants_json)?;
    product_from_storefront(StorefrontProduct {
        id: block.id,
        title: block.name.to_owned(),
        handle: block.handle.to_owned(),
        description: block.description.map(str::to_owned),
        featured_image: block.image_src.map(|s| StorefrontImage::Url(s.to_owned())),
        images: Vec::new(),
        options: Vec::new(),
        variants,
    })
}

/// Converts a parsed storefront product into the validated model.
///
/// # Errors
///
/// [`DecodeError::InvalidPrice`] or [`DecodeError::Invalid`].
pub fn product_from_storefront(raw: StorefrontProduct) -> Result<Product, DecodeError> {
    let variants = raw
        .variants
        .into_iter()
        .map(variant_from_storefront)
        .collect::<Result<Vec<_>, _>>()?;

    let axis_count = if raw.options.is_empty() {
        variants.iter().map(|v| v.options.len()).max().unwrap_or(0)
    } else {
        raw.options.len()
    };

    let axes = (0..axis_count)
        .map(|idx| {
            let declared = raw.options.get(idx);
            let name = declared.map_or_else(
                || format!("Option {}", idx + 1),
                |o| o.name().to_owned(),
            );
            let values = match declared {
                Some(option) if !option.values().is_empty() => option.values().to_vec(),
                _ => values_seen_at(&variants, idx),
            };
            OptionAxis::new(name, values)
        })
        .collect();

    let featured_image = raw
        .featured_image
        .as_ref()
        .or_else(|| raw.images.first())
        .map(|img| absolute_url(img.src()));

    let description = raw.description.filter(|d| !d.trim().is_empty());

    Ok(Product::new(ProductParts {
        id: raw.id,
        handle: raw.handle,
        title: raw.title,
        description,
        featured_image,
        axes,
        variants,
    })?)
}

fn variant_from_storefront(raw: StorefrontVariant) -> Result<Variant, DecodeError> {
    let id = VariantId(raw.id);

    let options = if raw.options.is_empty() {
        [raw.option1, raw.option2, raw.option3]
            .into_iter()
            .flatten()
            .filter(|o| !o.is_empty())
            .collect()
    } else {
        raw.options
    };

    let price = match raw.price {
        None => 0,
        Some(StorefrontPrice::MinorUnits(p)) => p,
        Some(StorefrontPrice::Decimal(s)) => match parse_decimal_to_minor_units(&s) {
            Some(p) => p,
            None => return Err(DecodeError::InvalidPrice { variant: id, raw: s }),
        },
    };

    let title = raw
        .title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| options.join(" / "));

    Ok(Variant {
        id,
        title,
        options,
        price,
        available: raw.available,
    })
}

/// Values at option index `idx`, in first-seen order.
fn values_seen_at(variants: &[Variant], idx: usize) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in variants.iter().filter_map(|v| v.options.get(idx)) {
        if !seen.contains(value) {
            seen.push(value.clone());
        }
    }
    seen
}

/// Shopify CDN URLs are protocol-relative on the `.js` endpoints.
fn absolute_url(src: &str) -> String {
    if src.starts_with("//") {
        format!("https:{src}")
    } else {
        src.to_owned()
    }
}

fn parse_json<T: DeserializeOwned>(payload: &str) -> Result<T, DecodeError> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::Empty);
    }
    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(value),
        Err(first) => {
            let unescaped = unescape_html_entities(trimmed);
            if unescaped == trimmed {
                return Err(DecodeError::Json(first));
            }
            tracing::debug!("payload did not parse as-is; retrying with HTML entities unescaped");
            serde_json::from_str(&unescaped).map_err(DecodeError::Json)
        }
    }
}

/// Undoes the escaping Liquid applies to attribute values. `&amp;` goes
/// after `&quot;` so `&amp;quot;` decodes to the literal `&quot;`.
#[must_use]
pub fn unescape_html_entities(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

#[cfg(test)]
#[path = "decode_test.rs"]
mod tests;
