//! Category labels
//!
//! Categories are free-text labels with no foreign key. Two labels refer to
//! the same category when they are equal after trimming and case-folding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bucket for entries without a usable category label
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A normalized category label used as a grouping key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(String);

impl CategoryKey {
    /// Normalize a raw label: trim whitespace, case-fold, and map empty or
    /// missing labels to the uncategorized bucket
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(label) if !label.is_empty() => Self(label.to_lowercase()),
            _ => Self::uncategorized(),
        }
    }

    /// Shorthand for a present label
    pub fn from_label(label: &str) -> Self {
        Self::normalize(Some(label))
    }

    pub fn uncategorized() -> Self {
        Self(UNCATEGORIZED.to_lowercase())
    }

    pub fn is_uncategorized(&self) -> bool {
        self.0 == UNCATEGORIZED.to_lowercase()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether a raw label belongs to this category
    pub fn matches(&self, raw: Option<&str>) -> bool {
        *self == Self::normalize(raw)
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed display form of a raw label
pub fn display_label(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => UNCATEGORIZED.to_string(),
    }
}
