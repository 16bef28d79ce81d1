//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product image reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRef {
    /// URL to the image file.
    pub url: String,
}

impl ImageRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// A product in the catalog.
///
/// Owned by the catalog service; the engine only reads it and copies the
/// fields it needs into cart lines and wishlist entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price before the discount.
    pub original_price: Money,
    /// Price the shopper pays.
    pub discount_price: Money,
    /// Units in stock.
    pub stock: u32,
    /// Units sold so far.
    #[serde(default)]
    pub sold_out: u32,
    /// Product images, in display order.
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

impl Product {
    /// Create a product with the discount price equal to the original price.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            original_price: price,
            discount_price: price,
            stock,
            sold_out: 0,
            images: Vec::new(),
        }
    }

    /// Set the discounted price.
    pub fn with_discount_price(mut self, price: Money) -> Self {
        self.discount_price = price;
        self
    }

    /// Append an image.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(ImageRef::new(url));
        self
    }

    /// Check if any stock is left.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_product_creation() {
        let product = Product::new("prod-1", "Test Product", Money::from_major(30, Currency::USD), 5)
            .with_discount_price(Money::from_major(20, Currency::USD))
            .with_image("image1.jpg")
            .with_image("image2.jpg");

        assert!(product.is_in_stock());
        assert_eq!(product.discount_price, Money::from_major(20, Currency::USD));
        assert_eq!(product.images[0].url, "image1.jpg");
    }

    #[test]
    fn test_product_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "prod-2",
            "name": "Plain",
            "original_price": {"amount_cents": 1000, "currency": "USD"},
            "discount_price": {"amount_cents": 800, "currency": "USD"},
            "stock": 0
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(!product.is_in_stock());
        assert!(product.images.is_empty());
        assert_eq!(product.sold_out, 0);
    }
}
