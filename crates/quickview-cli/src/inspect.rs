//! Read-only commands: `product`, `resolve` and `decode`.

use std::path::Path;

use anyhow::Context;

use quickview_core::{format_minor_units, AppConfig, PopupSession, Product};
use quickview_storefront::{decode_block, decode_product, ProductBlock, StorefrontClient};

pub(crate) async fn run_product(config: &AppConfig, handle: &str) -> anyhow::Result<()> {
    let client = StorefrontClient::from_config(config)?;
    let product = client.fetch_product(handle).await?;
    print_product(&product, &config.currency);
    Ok(())
}

pub(crate) async fn run_resolve(
    config: &AppConfig,
    handle: &str,
    options: &[String],
) -> anyhow::Result<()> {
    let client = StorefrontClient::from_config(config)?;
    let product = client.fetch_product(handle).await?;
    let session = open_session(product, options)?;

    let view = session.view(&config.currency);
    println!("{}", serde_json::to_string_pretty(&view)?);
    match session.resolution().variant() {
        Some(variant) => println!("variant: {} ({})", variant.id, variant.title),
        None => println!("variant: none"),
    }
    Ok(())
}

pub(crate) fn run_decode(path: &Path, currency: &str) -> anyhow::Result<()> {
    let product = decode_file(path)?;
    print_product(&product, currency);
    Ok(())
}

/// Decodes a payload file. A bare JSON array is treated as grid-tile variant
/// data, with the file stem standing in for handle and name.
pub(crate) fn decode_file(path: &Path) -> anyhow::Result<Product> {
    let payload = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("product");

    if payload.trim_start().starts_with('[') {
        decode_block(&ProductBlock {
            handle: stem,
            name: stem,
            variants_json: &payload,
            ..ProductBlock::default()
        })
    } else {
        decode_product(&payload)
    }
    .with_context(|| format!("failed to decode {}", path.display()))
}

/// Opens a popup session and applies `options` in axis order.
pub(crate) fn open_session(product: Product, options: &[String]) -> anyhow::Result<PopupSession> {
    let mut session = PopupSession::open(product);
    for (axis, value) in options.iter().enumerate() {
        session
            .select(axis, value)
            .with_context(|| format!("cannot select \"{value}\" on axis {axis}"))?;
    }
    Ok(session)
}

fn print_product(product: &Product, currency: &str) {
    println!("{} ({})", product.title(), product.handle());
    if let Some(image) = product.featured_image() {
        println!("  image: {image}");
    }
    for axis in product.axes() {
        println!("  {}: {}", axis.name, axis.values.join(", "));
    }
    for variant in product.variants() {
        println!(
            "  - {} {} {} {}",
            variant.id,
            variant.title,
            format_minor_units(variant.price, currency),
            if variant.available { "available" } else { "sold out" }
        );
    }
}
