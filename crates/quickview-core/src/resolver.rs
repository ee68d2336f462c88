//! Variant resolution: which concrete variant does the current selection name?
//!
//! Resolution is a pure function of the product and the selection. It never
//! performs I/O and never mutates its inputs, so the popup can call it on
//! every control change.

use serde::Serialize;

use crate::money::format_minor_units;
use crate::products::{Product, Variant};
use crate::selection::SelectionState;

/// Outcome of [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'p> {
    Matched(&'p Variant),
    /// No variant carries this combination, or an axis has no selected value.
    NotFound,
}

impl<'p> Resolution<'p> {
    #[must_use]
    pub fn variant(self) -> Option<&'p Variant> {
        match self {
            Resolution::Matched(v) => Some(v),
            Resolution::NotFound => None,
        }
    }

    #[must_use]
    pub fn price(self) -> Option<i64> {
        self.variant().map(|v| v.price)
    }

    /// `false` for [`Resolution::NotFound`].
    #[must_use]
    pub fn is_available(self) -> bool {
        self.variant().is_some_and(|v| v.available)
    }

    /// `true` only when add-to-cart may be offered.
    #[must_use]
    pub fn is_purchasable(self) -> bool {
        self.is_available()
    }
}

/// Resolves `selection` against `product`.
///
/// A variant matches when every option equals the selected value for that
/// axis (exact, case-sensitive). Any axis without a selected value yields
/// [`Resolution::NotFound`]. Should malformed data produce more than one
/// match, the first in source order wins.
#[must_use]
pub fn resolve<'p>(product: &'p Product, selection: &SelectionState) -> Resolution<'p> {
    let axis_count = product.axes().len();
    let mut wanted = Vec::with_capacity(axis_count);
    for axis in 0..axis_count {
        match selection.get(axis) {
            Some(value) => wanted.push(value),
            None => return Resolution::NotFound,
        }
    }

    product
        .variants()
        .iter()
        .find(|variant| {
            variant.options.len() == axis_count
                && variant
                    .options
                    .iter()
                    .zip(&wanted)
                    .all(|(have, want)| have == want)
        })
        .map_or(Resolution::NotFound, Resolution::Matched)
}

/// What the popup shows for the current resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantView {
    pub price: Option<i64>,
    pub price_display: Option<String>,
    pub available: bool,
    pub add_to_cart_enabled: bool,
    /// Button label: `"Add to Cart"`, `"Sold Out"` or `"Unavailable"`.
    pub label: &'static str,
}

impl VariantView {
    #[must_use]
    pub fn from_resolution(resolution: Resolution<'_>, currency: &str) -> Self {
        let label = match resolution {
            Resolution::Matched(v) if v.available => "Add to Cart",
            Resolution::Matched(_) => "Sold Out",
            Resolution::NotFound => "Unavailable",
        };
        Self {
            price: resolution.price(),
            price_display: resolution
                .price()
                .map(|p| format_minor_units(p, currency)),
            available: resolution.is_available(),
            add_to_cart_enabled: resolution.is_purchasable(),
            label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::fixtures::{tee, variant};
    use crate::products::{OptionAxis, ProductParts, VariantId};

    #[test]
    fn every_combination_resolves_to_its_variant() {
        let product = tee();
        for color in &product.axes()[0].values {
            for size in &product.axes()[1].values {
                let selection = SelectionState::from_values([color.as_str(), size.as_str()]);
                let matched = resolve(&product, &selection)
                    .variant()
                    .unwrap_or_else(|| panic!("{color}/{size} should resolve"));
                assert_eq!(matched.options, vec![color.clone(), size.clone()]);
            }
        }
    }

    #[test]
    fn missing_axis_is_not_found() {
        let product = tee();
        let mut selection = SelectionState::defaults(&product);
        selection.clear(1);
        assert_eq!(resolve(&product, &selection), Resolution::NotFound);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let product = tee();
        let selection = SelectionState::from_values(["black", "small"]);
        assert_eq!(resolve(&product, &selection), Resolution::NotFound);
    }

    #[test]
    fn unavailable_variant_is_matched_but_not_purchasable() {
        let product = tee();
        let selection = SelectionState::from_values(["Red", "Medium"]);
        let resolution = resolve(&product, &selection);
        assert_eq!(resolution.variant().map(|v| v.id), Some(VariantId(14)));
        assert!(!resolution.is_available());
        assert!(!resolution.is_purchasable());
        assert_eq!(resolution.price(), Some(2500));
    }

    #[test]
    fn duplicate_combinations_pick_first() {
        let product = crate::Product::new(ProductParts {
            handle: "dup".to_owned(),
            axes: vec![
                OptionAxis::new("Color", vec!["Black".to_owned()]),
                OptionAxis::new("Size", vec!["Small".to_owned()]),
            ],
            variants: vec![
                variant(1, "Black", "Small", false),
                variant(2, "Black", "Small", true),
            ],
            ..ProductParts::default()
        })
        .unwrap();
        let selection = SelectionState::from_values(["Black", "Small"]);
        assert_eq!(
            resolve(&product, &selection).variant().map(|v| v.id),
            Some(VariantId(1))
        );
    }

    #[test]
    fn resolve_is_pure() {
        let product = tee();
        let selection = SelectionState::from_values(["Black", "Medium"]);
        let before = (product.clone(), selection.clone());
        let first = resolve(&product, &selection);
        let second = resolve(&product, &selection);
        assert_eq!(first, second);
        assert_eq!((product.clone(), selection.clone()), before);
    }

    #[test]
    fn view_for_each_resolution_kind() {
        let product = tee();

        let ok = resolve(&product, &SelectionState::from_values(["Black", "Small"]));
        let view = VariantView::from_resolution(ok, "USD");
        assert!(view.add_to_cart_enabled);
        assert_eq!(view.label, "Add to Cart");
        assert_eq!(view.price_display.as_deref(), Some("25.00 USD"));

        let sold_out = resolve(&product, &SelectionState::from_values(["Red", "Medium"]));
        let view = VariantView::from_resolution(sold_out, "USD");
        assert!(!view.add_to_cart_enabled);
        assert_eq!(view.label, "Sold Out");

        let view = VariantView::from_resolution(Resolution::NotFound, "USD");
        assert!(!view.add_to_cart_enabled);
        assert_eq!(view.label, "Unavailable");
        assert!(view.price.is_none());
    }
}
