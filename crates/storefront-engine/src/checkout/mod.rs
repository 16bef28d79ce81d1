//! Checkout module.
//!
//! Contains types for shipping addresses, payment methods, order requests,
//! and the orchestrator that submits a cart snapshot to the order service.

mod address;
mod orchestrator;
mod order;
mod payment;

pub use address::{Address, ShippingInfo};
pub use orchestrator::{
    CheckoutOrchestrator, CheckoutOutcome, CheckoutPolicy, OrderService, ORDER_SUCCESS_ROUTE,
};
pub use order::{Customer, OrderRequest, OrderResponse};
pub use payment::{PaymentInfo, PaymentMethod};
