pub mod client;
pub mod decode;
pub mod error;
pub mod orchestrator;
mod rate_limit;
pub mod storefront;
pub mod types;

pub use client::StorefrontClient;
pub use decode::{decode_block, decode_product, ProductBlock};
pub use error::{DecodeError, StorefrontError};
pub use orchestrator::{
    CartAddOrchestrator, CompanionStatus, SubmitError, SubmitOutcome, SubmitState,
};
pub use storefront::Storefront;
pub use types::CartItem;
