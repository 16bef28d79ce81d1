//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// The product already has a line in the ledger.
    #[error("Item already in cart: {0}")]
    DuplicateItem(String),

    /// Requested quantity cannot be satisfied by the available stock.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: String,
        requested: u32,
        available: u32,
    },

    /// Checkout was attempted with no cart lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// A remote collaborator failed. The message is passed through verbatim.
    #[error("{0}")]
    NetworkFailure(String),

    /// The order service answered but did not accept the order.
    #[error("Order was not accepted by the order service")]
    OrderRejected,

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// A persisted snapshot violates a ledger invariant.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Shipping details are incomplete.
    #[error("Invalid shipping information: missing {0}")]
    InvalidShipping(String),

    /// Invalid engine configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CommerceError {
    /// Policy rejections are reported to the shopper and never mutate state.
    pub fn is_policy_rejection(&self) -> bool {
        matches!(
            self,
            CommerceError::DuplicateItem(_) | CommerceError::OutOfStock { .. }
        )
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_failure_message_is_verbatim() {
        let err = CommerceError::NetworkFailure("Payment failed".to_string());
        assert_eq!(err.to_string(), "Payment failed");
    }

    #[test]
    fn test_policy_rejection() {
        assert!(CommerceError::DuplicateItem("p1".into()).is_policy_rejection());
        assert!(CommerceError::OutOfStock {
            product_id: "p1".into(),
            requested: 1,
            available: 0,
        }
        .is_policy_rejection());
        assert!(!CommerceError::EmptyCart.is_policy_rejection());
    }
}
