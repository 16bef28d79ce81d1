//! Order submission.

use crate::cart::CartSnapshot;
use crate::checkout::{Customer, OrderRequest, OrderResponse, PaymentMethod, ShippingInfo};
use crate::error::CommerceError;
use crate::money::Money;
use crate::notify::{Notification, NotificationSink, ORDER_SUCCESSFUL};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// View the shopper is sent to after an accepted order.
pub const ORDER_SUCCESS_ROUTE: &str = "/order/success";

/// Creates orders on the server side.
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderResponse, CommerceError>;
}

#[async_trait]
impl<T: OrderService + ?Sized> OrderService for Arc<T> {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderResponse, CommerceError> {
        (**self).create_order(request).await
    }
}

/// Checkout rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPolicy {
    /// Submit orders even when the cart has no lines.
    #[serde(default)]
    pub allow_empty_cart: bool,
}

/// Terminal result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    Ordered {
        route: &'static str,
        total_price: Money,
        payment: &'static str,
    },
}

impl CheckoutOutcome {
    pub fn route(&self) -> &'static str {
        match self {
            CheckoutOutcome::Ordered { route, .. } => route,
        }
    }
}

/// Turns a cart snapshot into an order.
pub struct CheckoutOrchestrator<S> {
    service: S,
    policy: CheckoutPolicy,
}

impl<S: OrderService> CheckoutOrchestrator<S> {
    pub fn new(service: S) -> Self {
        Self::with_policy(service, CheckoutPolicy::default())
    }

    pub fn with_policy(service: S, policy: CheckoutPolicy) -> Self {
        Self { service, policy }
    }

    pub fn policy(&self) -> CheckoutPolicy {
        self.policy
    }

    /// Submit the snapshot as an order.
    ///
    /// Every failure is reported to `sink` with the error's message and
    /// returned. Nothing is retried and the caller's cart is not touched.
    pub async fn submit(
        &self,
        snapshot: &CartSnapshot,
        payment: PaymentMethod,
        shipping: ShippingInfo,
        customer: Customer,
        sink: &dyn NotificationSink,
    ) -> Result<CheckoutOutcome, CommerceError> {
        match self.try_submit(snapshot, &payment, shipping, customer).await {
            Ok(outcome) => {
                sink.notify(Notification::success(ORDER_SUCCESSFUL));
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(payment = payment.tag(), error = %e, "checkout failed");
                sink.notify(Notification::error(e.to_string()));
                Err(e)
            }
        }
    }

    async fn try_submit(
        &self,
        snapshot: &CartSnapshot,
        payment: &PaymentMethod,
        shipping: ShippingInfo,
        customer: Customer,
    ) -> Result<CheckoutOutcome, CommerceError> {
        if snapshot.is_empty() && !self.policy.allow_empty_cart {
            return Err(CommerceError::EmptyCart);
        }
        shipping.validate()?;

        let total_price = snapshot.total_price()?;
        let request = OrderRequest {
            cart_items: snapshot.lines.clone(),
            shipping_address: shipping.address,
            user: customer,
            total_price,
            payment_method: payment.tag().to_string(),
            payment_info: payment.info(),
        };

        tracing::info!(
            payment = payment.tag(),
            items = request.cart_items.len(),
            total = %total_price.display(),
            "submitting order"
        );

        let response = self.service.create_order(&request).await?;
        if !response.success {
            return Err(CommerceError::OrderRejected);
        }

        tracing::info!(user_id = %request.user.id, "order created");
        Ok(CheckoutOutcome::Ordered {
            route: ORDER_SUCCESS_ROUTE,
            total_price,
            payment: payment.tag(),
        })
    }
}
