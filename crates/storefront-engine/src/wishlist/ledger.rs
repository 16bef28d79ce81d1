//! Wishlist ledger.

use crate::catalog::{ImageRef, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A saved product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WishlistEntry {
    pub product_id: ProductId,
    pub name: String,
    pub discount_price: Money,
    /// Stock when the product was saved, so "add to cart" can be offered.
    pub stock: u32,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

impl WishlistEntry {
    fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            discount_price: product.discount_price,
            stock: product.stock,
            images: product.images.clone(),
        }
    }
}

/// Serializable wishlist contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WishlistSnapshot {
    pub lines: Vec<WishlistEntry>,
}

/// The shopper's wishlist.
///
/// `add` is idempotent: saving a product twice keeps one entry and is not an
/// error, which matches the add/remove toggle the storefront shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WishlistLedger {
    entries: Vec<WishlistEntry>,
}

impl WishlistLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a product. Returns `false` if it was already saved.
    pub fn add(&mut self, product: &Product) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        self.entries.push(WishlistEntry::from_product(product));
        tracing::debug!(product_id = %product.id, "added wishlist entry");
        true
    }

    /// Forget a product. Returns whether an entry was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|e| &e.product_id != product_id);
        let removed = self.entries.len() < len_before;
        if removed {
            tracing::debug!(%product_id, "removed wishlist entry");
        }
        removed
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entries.iter().any(|e| &e.product_id == product_id)
    }

    /// Flip membership. Returns `true` if the product is saved afterwards.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.remove(&product.id) {
            false
        } else {
            self.add(product)
        }
    }

    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn snapshot(&self) -> WishlistSnapshot {
        WishlistSnapshot {
            lines: self.entries.clone(),
        }
    }

    /// Rebuild from a snapshot; duplicate product ids are rejected.
    pub fn rehydrate(snapshot: WishlistSnapshot) -> Result<Self, CommerceError> {
        let mut seen = HashSet::new();
        if let Some(dup) = snapshot
            .lines
            .iter()
            .find(|e| !seen.insert(e.product_id.clone()))
        {
            return Err(CommerceError::InvalidSnapshot(format!(
                "duplicate wishlist entry for product {}",
                dup.product_id
            )));
        }
        Ok(Self {
            entries: snapshot.lines,
        })
    }
}
