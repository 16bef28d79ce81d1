//! Payment methods.

use serde::{Deserialize, Serialize};

/// How the shopper pays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum PaymentMethod {
    CashOnDelivery,
    /// Paid through an online gateway before the order is created.
    Gateway { reference: String, status: String },
}

impl PaymentMethod {
    pub fn gateway(reference: impl Into<String>, status: impl Into<String>) -> Self {
        PaymentMethod::Gateway {
            reference: reference.into(),
            status: status.into(),
        }
    }

    /// Tag passed to the order service.
    pub fn tag(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cash-on-delivery",
            PaymentMethod::Gateway { .. } => "gateway",
        }
    }

    /// Payment details as recorded on the order.
    pub fn info(&self) -> PaymentInfo {
        match self {
            PaymentMethod::CashOnDelivery => PaymentInfo {
                kind: PaymentInfo::CASH_ON_DELIVERY.to_string(),
                id: None,
                status: None,
            },
            PaymentMethod::Gateway { reference, status } => PaymentInfo {
                kind: PaymentInfo::GATEWAY.to_string(),
                id: Some(reference.clone()),
                status: Some(status.clone()),
            },
        }
    }
}

/// `paymentInfo` block of an order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl PaymentInfo {
    pub const CASH_ON_DELIVERY: &'static str = "Cash On Delivery";
    pub const GATEWAY: &'static str = "Paystack";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        assert_eq!(PaymentMethod::CashOnDelivery.tag(), "cash-on-delivery");
        assert_eq!(PaymentMethod::gateway("ref", "success").tag(), "gateway");
    }

    #[test]
    fn test_cash_on_delivery_info() {
        let json = serde_json::to_value(PaymentMethod::CashOnDelivery.info()).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "Cash On Delivery" }));
    }

    #[test]
    fn test_gateway_info() {
        let info = PaymentMethod::gateway("T123", "success").info();
        assert_eq!(info.id.as_deref(), Some("T123"));
        assert_eq!(info.status.as_deref(), Some("success"));
    }
}
