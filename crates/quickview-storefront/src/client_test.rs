use super::*;

fn client(store_url: &str) -> StorefrontClient {
    StorefrontClient::new(store_url, 5, "quickview-test/0.1", 0, 0).unwrap()
}

#[test]
fn product_url_from_collection_page() {
    let c = client("https://shop.example.com/collections/all");
    assert_eq!(
        c.product_url("soft-winter-jacket"),
        "https://shop.example.com/products/soft-winter-jacket.js"
    );
}

#[test]
fn product_url_encodes_like_encode_uri_component() {
    let c = client("https://shop.example.com");
    assert_eq!(
        c.product_url("tee/black & white"),
        "https://shop.example.com/products/tee%2Fblack%20%26%20white.js"
    );
    assert_eq!(
        c.product_url("it's_(new)"),
        "https://shop.example.com/products/it's_(new).js"
    );
}

#[test]
fn cart_add_url_strips_trailing_slash() {
    let c = client("https://shop.example.com/");
    assert_eq!(c.cart_add_url(), "https://shop.example.com/cart/add.js");
}

#[test]
fn origin_keeps_non_default_port() {
    let c = client("http://127.0.0.1:8123/products/x");
    assert_eq!(c.cart_add_url(), "http://127.0.0.1:8123/cart/add.js");
    assert_eq!(c.domain(), "127.0.0.1");
}

#[test]
fn rejects_invalid_store_url() {
    let result = StorefrontClient::new("not-a-url", 5, "ua", 0, 0);
    assert!(
        matches!(result, Err(StorefrontError::InvalidStoreUrl { .. })),
        "expected InvalidStoreUrl"
    );
}

#[test]
fn rejects_non_http_scheme() {
    let result = store_origin("ftp://shop.example.com");
    assert!(
        matches!(result, Err(StorefrontError::InvalidStoreUrl { ref reason, .. }) if reason.contains("ftp")),
        "got: {result:?}"
    );
}
