//! Cart ledger.

use crate::cart::{CartLine, CartSnapshot, CartSummary};
use crate::catalog::{Product, StockPolicy};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use crate::notify::{
    Notification, NotificationSink, ITEM_ADDED_TO_CART, ITEM_ALREADY_IN_CART,
    PRODUCT_STOCK_LIMITED,
};
use std::collections::HashSet;

/// Result of a quantity operation.
///
/// Quantity operations never fail: hitting a bound is a policy outcome, not
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now has this quantity.
    Updated(u32),
    /// Incrementing would exceed stock; quantity unchanged.
    StockLimited(u32),
    /// Decrementing would go below one; quantity unchanged.
    AtFloor,
    /// No line for this product.
    NotInCart,
}

impl QuantityChange {
    /// Whether the ledger was mutated.
    pub fn is_updated(&self) -> bool {
        matches!(self, QuantityChange::Updated(_))
    }
}

/// The shopper's cart.
///
/// Holds at most one line per product, and every line satisfies
/// `1 <= qty <= stock`. Mutations only happen through the methods below.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartLedger {
    currency: Currency,
    lines: Vec<CartLine>,
}

impl CartLedger {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            lines: Vec::new(),
        }
    }

    /// Add a product to the cart.
    ///
    /// The requested quantity is clamped to the product's stock. Rejections
    /// are reported to `sink` and leave the ledger untouched:
    /// - `DuplicateItem` if the product already has a line
    /// - `OutOfStock` if the product has no stock
    pub fn add_item(
        &mut self,
        product: &Product,
        qty: u32,
        sink: &dyn NotificationSink,
    ) -> Result<&CartLine, CommerceError> {
        if self.contains(&product.id) {
            tracing::debug!(product_id = %product.id, "rejected duplicate cart item");
            sink.notify(Notification::error(ITEM_ALREADY_IN_CART));
            return Err(CommerceError::DuplicateItem(product.id.to_string()));
        }

        if StockPolicy::is_out_of_stock(product.stock) {
            tracing::debug!(product_id = %product.id, "rejected out-of-stock cart item");
            sink.notify(Notification::error(PRODUCT_STOCK_LIMITED));
            return Err(CommerceError::OutOfStock {
                product_id: product.id.to_string(),
                requested: qty,
                available: product.stock,
            });
        }

        if qty == 0 {
            return Err(CommerceError::InvalidQuantity(qty));
        }

        if product.discount_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: product.discount_price.currency.code().to_string(),
            });
        }

        let granted = StockPolicy::clamp(qty, product.stock);
        if granted < qty {
            tracing::warn!(
                product_id = %product.id,
                requested = qty,
                granted,
                "clamped cart quantity to stock"
            );
        }
        debug_assert!(StockPolicy::can_satisfy(granted, product.stock));

        self.lines.push(CartLine::from_product(product, granted));
        tracing::debug!(product_id = %product.id, qty = granted, "added cart item");
        sink.notify(Notification::success(ITEM_ADDED_TO_CART));

        let index = self.lines.len() - 1;
        Ok(&self.lines[index])
    }

    /// Remove a product's line. Returns whether a line was removed.
    ///
    /// Removing an absent product is a no-op.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|line| &line.product_id != product_id);
        let removed = self.lines.len() < len_before;
        if removed {
            tracing::debug!(%product_id, "removed cart item");
        }
        removed
    }

    /// Increase a line's quantity by one, bounded by its stock.
    ///
    /// At the stock ceiling the quantity is left alone and the shopper is
    /// told the stock is limited.
    pub fn increment_qty(
        &mut self,
        product_id: &ProductId,
        sink: &dyn NotificationSink,
    ) -> QuantityChange {
        let Some(line) = self.line_mut(product_id) else {
            return QuantityChange::NotInCart;
        };

        let next = line.qty.saturating_add(1);
        if StockPolicy::can_satisfy(next, line.stock) {
            line.qty = next;
            tracing::debug!(%product_id, qty = next, "incremented cart quantity");
            QuantityChange::Updated(next)
        } else {
            let current = line.qty;
            tracing::warn!(%product_id, qty = current, stock = line.stock, "cart quantity at stock limit");
            sink.notify(Notification::error(PRODUCT_STOCK_LIMITED));
            QuantityChange::StockLimited(current)
        }
    }

    /// Decrease a line's quantity by one.
    ///
    /// A quantity of one is the floor; removal is a separate operation.
    pub fn decrement_qty(&mut self, product_id: &ProductId) -> QuantityChange {
        let Some(line) = self.line_mut(product_id) else {
            return QuantityChange::NotInCart;
        };

        if line.qty <= 1 {
            return QuantityChange::AtFloor;
        }

        let next = line.qty - 1;
        if !StockPolicy::can_satisfy(next, line.stock) {
            return QuantityChange::StockLimited(line.qty);
        }
        line.qty = next;
        tracing::debug!(%product_id, qty = next, "decremented cart quantity");
        QuantityChange::Updated(next)
    }

    /// Number of distinct lines (not units).
    pub fn total_items(&self) -> usize {
        self.lines.len()
    }

    /// Sum of `qty * discount_price` over all lines.
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        let mut total = Money::zero(self.currency);
        for line in &self.lines {
            total = total
                .try_add(&line.line_total()?)
                .ok_or(CommerceError::Overflow)?;
        }
        Ok(total)
    }

    /// Current totals, with the empty cart as a distinct state.
    pub fn summary(&self) -> Result<CartSummary, CommerceError> {
        if self.is_empty() {
            return Ok(CartSummary::Empty);
        }
        Ok(CartSummary::Populated {
            items: self.total_items(),
            total: self.total_price()?,
        })
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Check if a product has a line.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.lines.iter().any(|line| &line.product_id == product_id)
    }

    /// Get a line by product ID.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product_id == product_id)
    }

    /// All lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Copy the ledger into a serializable snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            currency: self.currency,
            lines: self.lines.clone(),
        }
    }

    /// Rebuild a ledger from a persisted snapshot.
    ///
    /// Fails with `InvalidSnapshot` if the snapshot breaks uniqueness, the
    /// quantity bounds, or the currency rule.
    pub fn rehydrate(snapshot: CartSnapshot) -> Result<Self, CommerceError> {
        let mut seen = HashSet::new();
        for line in &snapshot.lines {
            if !seen.insert(&line.product_id) {
                return Err(CommerceError::InvalidSnapshot(format!(
                    "duplicate line for product {}",
                    line.product_id
                )));
            }
            if !StockPolicy::can_satisfy(line.qty, line.stock) {
                return Err(CommerceError::InvalidSnapshot(format!(
                    "quantity {} outside 1..={} for product {}",
                    line.qty, line.stock, line.product_id
                )));
            }
            if line.discount_price.currency != snapshot.currency {
                return Err(CommerceError::InvalidSnapshot(format!(
                    "product {} priced in {}, cart is {}",
                    line.product_id, line.discount_price.currency, snapshot.currency
                )));
            }
        }

        tracing::debug!(lines = snapshot.lines.len(), "rehydrated cart");
        Ok(Self {
            currency: snapshot.currency,
            lines: snapshot.lines,
        })
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| &line.product_id == product_id)
    }
}
