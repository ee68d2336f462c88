use std::future::Future;

use quickview_core::{CartLineRequest, Product};

use crate::client::StorefrontClient;
use crate::error::StorefrontError;
use crate::types::CartItem;

/// The two storefront calls the cart orchestrator depends on.
pub trait Storefront {
    fn add_to_cart(
        &self,
        line: CartLineRequest,
    ) -> impl Future<Output = Result<CartItem, StorefrontError>> + Send;

    fn fetch_product(
        &self,
        handle: &str,
    ) -> impl Future<Output = Result<Product, StorefrontError>> + Send;
}

impl Storefront for StorefrontClient {
    fn add_to_cart(
        &self,
        line: CartLineRequest,
    ) -> impl Future<Output = Result<CartItem, StorefrontError>> + Send {
        StorefrontClient::add_to_cart(self, line)
    }

    fn fetch_product(
        &self,
        handle: &str,
    ) -> impl Future<Output = Result<Product, StorefrontError>> + Send {
        StorefrontClient::fetch_product(self, handle)
    }
}
