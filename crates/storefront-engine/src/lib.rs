//! Cart and inventory-aware quantity engine for the storefront.
//!
//! This crate holds the state behind the shopping UI:
//!
//! - **Catalog**: Products and the stock policy
//! - **Cart**: Cart ledger with dedup, stock limits, totals and snapshots
//! - **Wishlist**: Saved-for-later products
//! - **Countdown**: Deadline tracking for promotional events, with a
//!   one-shot deletion on expiry
//! - **Checkout**: Order submission through an [`checkout::OrderService`]
//!
//! # Example
//!
//! ```rust
//! use storefront_engine::prelude::*;
//!
//! let product = Product::new("1", "Rust Programming Book", Money::from_major(50, Currency::USD), 5);
//! let sink = RecordingSink::new();
//!
//! let mut cart = CartLedger::new(Currency::USD);
//! cart.add_item(&product, 2, &sink).unwrap();
//!
//! assert_eq!(cart.total_items(), 1);
//! assert_eq!(cart.total_price().unwrap().display(), "US$100");
//! assert_eq!(sink.last().unwrap().message, "Item added to cart successfully!");
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod notify;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod countdown;
pub mod wishlist;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::notify::{NoticeKind, Notification, NotificationSink, RecordingSink};

    // Catalog
    pub use crate::catalog::{ImageRef, Product, StockPolicy};

    // Cart
    pub use crate::cart::{CartLedger, CartLine, CartSnapshot, CartSummary, QuantityChange};

    // Wishlist
    pub use crate::wishlist::{WishlistEntry, WishlistLedger, WishlistSnapshot};

    // Countdown
    pub use crate::countdown::{
        Clock, CountdownConfig, CountdownController, CountdownHandle, CountdownState,
        CountdownTimer, DeletionAck, EntityDeletionService, SystemClock, TimeRemaining,
        TimedEntity,
    };

    // Checkout
    pub use crate::checkout::{
        Address, CheckoutOrchestrator, CheckoutOutcome, CheckoutPolicy, Customer, OrderRequest,
        OrderResponse, OrderService, PaymentInfo, PaymentMethod, ShippingInfo,
    };
}
