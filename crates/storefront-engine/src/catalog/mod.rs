//! Catalog module.
//!
//! Products as the engine sees them, and the stock policy every mutating
//! ledger operation consults.

mod product;
mod stock;

pub use product::{ImageRef, Product};
pub use stock::StockPolicy;
