//! Order request and response shapes.

use crate::cart::CartLine;
use crate::checkout::{Address, PaymentInfo};
use crate::ids::UserId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// The shopper placing the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Customer {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
        }
    }
}

/// Everything the order service needs to create an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub cart_items: Vec<CartLine>,
    pub shipping_address: Address,
    pub user: Customer,
    pub total_price: Money,
    /// `cash-on-delivery` or `gateway`.
    pub payment_method: String,
    pub payment_info: PaymentInfo,
}

/// Order service reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub success: bool,
}
