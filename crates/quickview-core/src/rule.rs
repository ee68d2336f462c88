use serde::{Deserialize, Serialize};

use crate::selection::SelectionState;

/// Adds a companion product when a configured color/size pair is selected.
///
/// The predicate looks at the raw selected option values (axis 0 for color,
/// axis 1 for size), compared case-insensitively. It never looks at variant
/// ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoAddRule {
    /// Handle of the product to add, e.g. `"soft-winter-jacket"`.
    pub companion_handle: String,
    pub color: String,
    pub size: String,
}

impl AutoAddRule {
    #[must_use]
    pub fn new(
        companion_handle: impl Into<String>,
        color: impl Into<String>,
        size: impl Into<String>,
    ) -> Self {
        Self {
            companion_handle: companion_handle.into(),
            color: color.into(),
            size: size.into(),
        }
    }

    #[must_use]
    pub fn matches(&self, selection: &SelectionState) -> bool {
        let (Some(color), Some(size)) = (selection.get(0), selection.get(1)) else {
            return false;
        };
        eq_ignore_case(color, &self.color) && eq_ignore_case(size, &self.size)
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
