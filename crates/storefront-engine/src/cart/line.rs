//! Cart line items.

use crate::catalog::{ImageRef, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A line item in the cart.
///
/// Prices and stock are captured when the line is created, so later catalog
/// price changes never alter an existing line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product this line is for. Unique within a ledger.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Quantity, always within `1..=stock`.
    pub qty: u32,
    /// Price before the discount, at add time.
    pub original_price: Money,
    /// Unit price charged, at add time.
    pub discount_price: Money,
    /// Stock available at add time.
    pub stock: u32,
    /// Product images (denormalized for display).
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

impl CartLine {
    /// Build a line from a product snapshot.
    pub(crate) fn from_product(product: &Product, qty: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            qty,
            original_price: product.original_price,
            discount_price: product.discount_price,
            stock: product.stock,
            images: product.images.clone(),
        }
    }

    /// Line total (`qty * discount_price`).
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.discount_price
            .try_multiply(self.qty)
            .ok_or(CommerceError::Overflow)
    }

    /// Check if the quantity is already at the stock ceiling.
    pub fn is_at_stock_limit(&self) -> bool {
        self.qty >= self.stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_line_total() {
        let product = Product::new("1", "Product 1", Money::from_major(50, Currency::USD), 5);
        let line = CartLine::from_product(&product, 2);
        assert_eq!(line.line_total().unwrap(), Money::from_major(100, Currency::USD));
        assert!(!line.is_at_stock_limit());
    }

    #[test]
    fn test_line_total_overflow() {
        let product = Product::new("1", "Pricey", Money::new(i64::MAX, Currency::USD), 5);
        let line = CartLine::from_product(&product, 2);
        assert_eq!(line.line_total(), Err(CommerceError::Overflow));
    }
}
