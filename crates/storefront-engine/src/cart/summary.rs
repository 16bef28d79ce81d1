//! Derived cart totals.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// What a cart reports to its readers.
///
/// An empty cart is its own state rather than a populated cart with zero
/// lines, so callers can render the two differently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CartSummary {
    /// No lines.
    Empty,
    /// At least one line.
    Populated {
        /// Distinct lines (not units).
        items: usize,
        /// Sum of line totals.
        total: Money,
    },
}

impl CartSummary {
    /// Number of distinct lines.
    pub fn items(&self) -> usize {
        match self {
            CartSummary::Empty => 0,
            CartSummary::Populated { items, .. } => *items,
        }
    }

    /// Total price, if there is anything to pay for.
    pub fn total(&self) -> Option<Money> {
        match self {
            CartSummary::Empty => None,
            CartSummary::Populated { total, .. } => Some(*total),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CartSummary::Empty)
    }

    /// Short label for cart headers ("1 items").
    pub fn label(&self) -> String {
        format!("{} items", self.items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_empty_summary() {
        let summary = CartSummary::Empty;
        assert!(summary.is_empty());
        assert_eq!(summary.items(), 0);
        assert_eq!(summary.total(), None);
        assert_eq!(summary.label(), "0 items");
    }

    #[test]
    fn test_populated_summary() {
        let summary = CartSummary::Populated {
            items: 1,
            total: Money::from_major(100, Currency::USD),
        };
        assert!(!summary.is_empty());
        assert_eq!(summary.label(), "1 items");
        assert_eq!(summary.total().unwrap().display(), "US$100");
    }

    #[test]
    fn test_summary_serializes_state_tag() {
        let json = serde_json::to_string(&CartSummary::Empty).unwrap();
        assert_eq!(json, r#"{"state":"empty"}"#);
    }
}
