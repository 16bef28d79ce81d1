//! Wishlist module.
//!
//! Saved-for-later products. Independent of the cart, same product identity
//! rules, no quantities.

mod ledger;

pub use ledger::{WishlistEntry, WishlistLedger, WishlistSnapshot};
