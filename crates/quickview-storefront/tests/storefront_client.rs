//! Integration tests for `StorefrontClient` against a `wiremock` storefront.
//!
//! Covers the product lookup (decode, 404, retry on 429) and the cart add
//! (request shape, line item parsing, rejection envelope, no retries).

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use quickview_core::{CartLineRequest, VariantId};
use quickview_storefront::{StorefrontClient, StorefrontError};

/// 5-second timeout, no retries.
fn test_client(server: &MockServer) -> StorefrontClient {
    StorefrontClient::new(&server.uri(), 5, "quickview-test/0.1", 0, 0)
        .expect("failed to build test StorefrontClient")
}

fn test_client_with_retries(server: &MockServer, max_retries: u32) -> StorefrontClient {
    StorefrontClient::new(&server.uri(), 5, "quickview-test/0.1", max_retries, 0)
        .expect("failed to build test StorefrontClient")
}

fn jacket_js() -> serde_json::Value {
    json!({
        "id": 555,
        "title": "Soft Winter Jacket",
        "handle": "soft-winter-jacket",
        "description": "<p>Warm</p>",
        "featured_image": "//cdn.shopify.com/jacket.jpg",
        "options": [{ "name": "Size", "position": 1, "values": ["Small", "Medium"] }],
        "variants": [
            { "id": 9001, "title": "Small", "option1": "Small", "option2": null, "option3": null,
              "options": ["Small"], "price": 12900, "available": false },
            { "id": 9002, "title": "Medium", "option1": "Medium", "option2": null, "option3": null,
              "options": ["Medium"], "price": 12900, "available": true }
        ]
    })
}

fn cart_item_json(variant_id: i64) -> serde_json::Value {
    json!({
        "id": variant_id,
        "variant_id": variant_id,
        "key": format!("{variant_id}:0f1e2d"),
        "quantity": 1,
        "title": "Classic Tee - Black / Medium",
        "price": 2500,
        "line_price": 2500,
        "handle": "classic-tee"
    })
}

// ---------------------------------------------------------------------------
// Product lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_product_decodes_products_js() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/soft-winter-jacket.js"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jacket_js()))
        .expect(1)
        .mount(&server)
        .await;

    let product = test_client(&server)
        .fetch_product("soft-winter-jacket")
        .await
        .expect("expected product");

    assert_eq!(product.title(), "Soft Winter Jacket");
    assert_eq!(
        product.featured_image(),
        Some("https://cdn.shopify.com/jacket.jpg")
    );
    assert_eq!(
        product.first_available_variant().map(|v| v.id),
        Some(VariantId(9002))
    );
}

#[tokio::test]
async fn fetch_product_404_is_not_found_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/missing.js"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client_with_retries(&server, 3)
        .fetch_product("missing")
        .await;

    assert!(
        matches!(result, Err(StorefrontError::NotFound { ref url }) if url.ends_with("/products/missing.js")),
        "expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_product_retries_after_429_and_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/soft-winter-jacket.js"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/soft-winter-jacket.js"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jacket_js()))
        .mount(&server)
        .await;

    let result = test_client_with_retries(&server, 1)
        .fetch_product("soft-winter-jacket")
        .await;

    assert!(result.is_ok(), "expected Ok after retry, got: {result:?}");
}

#[tokio::test]
async fn fetch_product_gives_up_after_exhausting_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/soft-winter-jacket.js"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(3) // 1 initial + 2 retries
        .mount(&server)
        .await;

    let result = test_client_with_retries(&server, 2)
        .fetch_product("soft-winter-jacket")
        .await;

    assert!(
        matches!(result, Err(StorefrontError::RateLimited { .. })),
        "expected RateLimited, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_product_waits_for_retry_after_before_retrying() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/soft-winter-jacket.js"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1.0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/soft-winter-jacket.js"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jacket_js()))
        .expect(1)
        .mount(&server)
        .await;

    // Backoff base is 0, so any wait comes from the header.
    let started = std::time::Instant::now();
    let result = test_client_with_retries(&server, 1)
        .fetch_product("soft-winter-jacket")
        .await;

    assert!(result.is_ok(), "expected Ok after retry, got: {result:?}");
    assert!(
        started.elapsed() >= std::time::Duration::from_secs(1),
        "retried after only {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn fetch_product_with_garbage_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/broken.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = test_client(&server).fetch_product("broken").await;

    assert!(
        matches!(result, Err(StorefrontError::Decode { ref handle, .. }) if handle == "broken"),
        "expected Decode, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_product_5xx_is_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/soft-winter-jacket.js"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client_with_retries(&server, 2)
        .fetch_product("soft-winter-jacket")
        .await;

    assert!(
        matches!(
            result,
            Err(StorefrontError::UnexpectedStatus { status: 503, .. })
        ),
        "expected UnexpectedStatus(503), got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Cart add
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_to_cart_posts_id_and_quantity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cart/add.js"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "id": 12, "quantity": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_item_json(12)))
        .expect(1)
        .mount(&server)
        .await;

    let item = test_client(&server)
        .add_to_cart(CartLineRequest::single(VariantId(12)))
        .await
        .expect("expected cart item");

    assert_eq!(item.variant_id, 12);
    assert_eq!(item.quantity, 1);
    assert_eq!(item.key.as_deref(), Some("12:0f1e2d"));
}

#[tokio::test]
async fn add_to_cart_rejection_surfaces_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cart/add.js"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "status": 422,
            "message": "Cart Error",
            "description": "The product 'Classic Tee - Black / Medium' is already sold out."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .add_to_cart(CartLineRequest::single(VariantId(12)))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Cart Error: The product 'Classic Tee - Black / Medium' is already sold out."
    );
}

#[tokio::test]
async fn add_to_cart_is_never_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cart/add.js"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client_with_retries(&server, 3)
        .add_to_cart(CartLineRequest::single(VariantId(12)))
        .await;

    assert!(
        matches!(
            result,
            Err(StorefrontError::RateLimited {
                retry_after_secs: 7,
                ..
            })
        ),
        "expected RateLimited, got: {result:?}"
    );
}

#[tokio::test]
async fn add_to_cart_with_unexpected_body_is_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cart/add.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .add_to_cart(CartLineRequest::single(VariantId(12)))
        .await;

    assert!(
        matches!(result, Err(StorefrontError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}
