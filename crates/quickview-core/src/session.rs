//! Per-popup state: the product on display and the shopper's selection.
//!
//! Each opened popup gets its own [`PopupSession`]. Nothing here is global;
//! opening another product builds a new session.

use crate::products::{Product, Variant};
use crate::resolver::{resolve, Resolution, VariantView};
use crate::selection::SelectionState;
use crate::CoreError;

#[derive(Debug, Clone)]
pub struct PopupSession {
    product: Product,
    selection: SelectionState,
}

/// Everything a cart submission needs, copied out of the session at submit
/// time. Later selection changes do not reach an existing snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    /// The resolved variant, or `None` when the selection did not resolve.
    pub variant: Option<Variant>,
    pub selection: SelectionState,
}

impl SubmitRequest {
    #[must_use]
    pub fn new(resolution: Resolution<'_>, selection: &SelectionState) -> Self {
        Self {
            variant: resolution.variant().cloned(),
            selection: selection.clone(),
        }
    }
}

impl PopupSession {
    /// Opens a popup for `product` with every axis at its first value.
    #[must_use]
    pub fn open(product: Product) -> Self {
        let selection = SelectionState::defaults(&product);
        Self { product, selection }
    }

    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Applies a variant-control change and returns the new resolution.
    ///
    /// # Errors
    ///
    /// - [`CoreError::AxisOutOfRange`] if `axis` is not one of the product's axes.
    /// - [`CoreError::UnknownOptionValue`] if `value` is not allowed on that axis.
    pub fn select(&mut self, axis: usize, value: &str) -> Result<Resolution<'_>, CoreError> {
        let Some(option_axis) = self.product.axes().get(axis) else {
            return Err(CoreError::AxisOutOfRange {
                axis,
                axis_count: self.product.axes().len(),
            });
        };
        if !option_axis.contains(value) {
            return Err(CoreError::UnknownOptionValue {
                axis: option_axis.name.clone(),
                value: value.to_owned(),
            });
        }
        self.selection.set(axis, value);
        Ok(self.resolution())
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution<'_> {
        resolve(&self.product, &self.selection)
    }

    #[must_use]
    pub fn view(&self, currency: &str) -> VariantView {
        VariantView::from_resolution(self.resolution(), currency)
    }

    #[must_use]
    pub fn snapshot(&self) -> SubmitRequest {
        SubmitRequest::new(self.resolution(), &self.selection)
    }
}
