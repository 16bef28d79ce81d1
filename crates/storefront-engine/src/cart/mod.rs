//! Shopping cart module.
//!
//! Contains the cart ledger, its line items, derived totals and the
//! persistence snapshot.

mod ledger;
mod line;
mod snapshot;
mod summary;

pub use ledger::{CartLedger, QuantityChange};
pub use line::CartLine;
pub use snapshot::CartSnapshot;
pub use summary::CartSummary;
