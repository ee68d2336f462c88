use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::products::Product;

/// The shopper's current pick, one value per axis index.
///
/// Owned by a single popup session. Normally fully populated (see
/// [`SelectionState::defaults`]); an axis can only go missing through
/// [`SelectionState::clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    values: BTreeMap<usize, String>,
}

impl SelectionState {
    /// First value of every axis, the state of a freshly opened popup.
    #[must_use]
    pub fn defaults(product: &Product) -> Self {
        let values = product
            .axes()
            .iter()
            .enumerate()
            .filter_map(|(idx, axis)| axis.values.first().map(|v| (idx, v.clone())))
            .collect();
        Self { values }
    }

    /// Builds a selection from values listed in axis order.
    #[must_use]
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .enumerate()
                .map(|(idx, v)| (idx, v.into()))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, axis: usize) -> Option<&str> {
        self.values.get(&axis).map(String::as_str)
    }

    pub fn set(&mut self, axis: usize, value: impl Into<String>) {
        self.values.insert(axis, value.into());
    }

    pub fn clear(&mut self, axis: usize) {
        self.values.remove(&axis);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
