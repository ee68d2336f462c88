use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Shopify numeric variant ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(pub i64);

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One selectable dimension of a product, e.g. `Color` or `Size`.
///
/// Axis order matters: axis 0 drives the primary (button) selector, later
/// axes drive the dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionAxis {
    pub name: String,
    pub values: Vec<String>,
}

impl OptionAxis {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Returns `true` if `value` is one of this axis' allowed values.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// A single purchasable combination of axis values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    /// Display title, e.g. `"Black / Medium"`.
    pub title: String,
    /// One value per product axis, in axis order.
    pub options: Vec<String>,
    /// Price in minor currency units (cents).
    pub price: i64,
    pub available: bool,
}

/// A product as shown in the quick-view popup.
///
/// Only constructible through [`Product::new`], so every `Product` in
/// circulation satisfies `variant.options[i] ∈ axes[i].values`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: i64,
    handle: String,
    title: String,
    description: Option<String>,
    featured_image: Option<String>,
    axes: Vec<OptionAxis>,
    variants: Vec<Variant>,
}

/// Unvalidated product fields, passed to [`Product::new`].
#[derive(Debug, Clone, Default)]
pub struct ProductParts {
    pub id: i64,
    pub handle: String,
    pub title: String,
    pub description: Option<String>,
    pub featured_image: Option<String>,
    pub axes: Vec<OptionAxis>,
    pub variants: Vec<Variant>,
}

impl Product {
    /// Validates `parts` and builds a [`Product`].
    ///
    /// # Errors
    ///
    /// - [`CoreError::NoAxes`] if there are no axes.
    /// - [`CoreError::EmptyAxis`] if an axis has no values.
    /// - [`CoreError::OptionCountMismatch`] if a variant's option count differs
    ///   from the axis count.
    /// - [`CoreError::UnknownOptionValue`] if a variant option is not a member
    ///   of its axis.
    pub fn new(parts: ProductParts) -> Result<Self, CoreError> {
        if parts.axes.is_empty() {
            return Err(CoreError::NoAxes {
                product: parts.handle,
            });
        }
        if let Some(axis) = parts.axes.iter().find(|a| a.values.is_empty()) {
            return Err(CoreError::EmptyAxis {
                product: parts.handle.clone(),
                axis: axis.name.clone(),
            });
        }

        for variant in &parts.variants {
            if variant.options.len() != parts.axes.len() {
                return Err(CoreError::OptionCountMismatch {
                    variant: variant.id,
                    expected: parts.axes.len(),
                    actual: variant.options.len(),
                });
            }
            for (axis, value) in parts.axes.iter().zip(&variant.options) {
                if !axis.contains(value) {
                    return Err(CoreError::UnknownOptionValue {
                        axis: axis.name.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(Self {
            id: parts.id,
            handle: parts.handle,
            title: parts.title,
            description: parts.description,
            featured_image: parts.featured_image,
            axes: parts.axes,
            variants: parts.variants,
        })
    }

    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// URL slug, e.g. `"soft-winter-jacket"`.
    #[must_use]
    pub fn handle(&self) -> &str {
        &self.handle
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn featured_image(&self) -> Option<&str> {
        self.featured_image.as_deref()
    }

    #[must_use]
    pub fn axes(&self) -> &[OptionAxis] {
        &self.axes
    }

    #[must_use]
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Returns the first variant flagged as available, in source order.
    #[must_use]
    pub fn first_available_variant(&self) -> Option<&Variant> {
        self.variants.iter().find(|v| v.available)
    }
}

/// One line submitted to the cart endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartLineRequest {
    pub id: VariantId,
    pub quantity: NonZeroU32,
}

impl CartLineRequest {
    /// A single unit of `id`.
    #[must_use]
    pub fn single(id: VariantId) -> Self {
        Self {
            id,
            quantity: NonZeroU32::MIN,
        }
    }
}
