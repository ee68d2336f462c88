pub mod app_config;
pub mod config;
pub mod money;
pub mod products;
pub mod resolver;
pub mod rule;
pub mod selection;
pub mod session;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, load_currency};
pub use money::{format_minor_units, parse_decimal_to_minor_units};
pub use products::{CartLineRequest, OptionAxis, Product, ProductParts, Variant, VariantId};
pub use resolver::{resolve, Resolution, VariantView};
pub use rule::AutoAddRule;
pub use selection::SelectionState;
pub use session::{PopupSession, SubmitRequest};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("product {product} has no option axes")]
    NoAxes { product: String },

    #[error("product {product}: axis \"{axis}\" has no values")]
    EmptyAxis { product: String, axis: String },

    #[error("variant {variant} has {actual} option values, expected {expected}")]
    OptionCountMismatch {
        variant: VariantId,
        expected: usize,
        actual: usize,
    },

    #[error("\"{value}\" is not a value of axis \"{axis}\"")]
    UnknownOptionValue { axis: String, value: String },

    #[error("axis index {axis} out of range (product has {axis_count} axes)")]
    AxisOutOfRange { axis: usize, axis_count: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
